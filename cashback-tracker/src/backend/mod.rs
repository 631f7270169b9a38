//! # Backend Module
//!
//! Contains all non-UI logic for the cashback tracker.
//!
//! - **Domain**: cards, the cashback calculator, the spend ledger and the card store
//! - **Storage**: the card snapshot and the tracker configuration
//! - **IO**: mapping between domain cards and the `shared` DTOs
//!
//! [`Backend`] wires these together for a presentation layer: it loads the
//! configuration, opens the card store and offers the form-driven entry points
//! a card list screen needs. All operations are synchronous.

pub mod domain;
pub mod storage;
pub mod io;

use anyhow::Result;
use log::info;
use std::path::Path;

use crate::backend::domain::commands::cards::{CreateCardResult, DeleteCardResult, RecordSpendResult, UpdateCardResult};
use crate::backend::domain::models::Card;
use crate::backend::domain::{CardFormService, CardStore, CardStoreError};
use crate::backend::io::CardMapper;
use crate::backend::storage::{CardRepository, CardStorage, ConfigRepository, JsonConnection, TrackerConfig};
use shared::{CardFormError, CardListResponse};

/// Asks the user whether a card may be deleted.
///
/// The store deletes unconditionally; obtaining consent is the caller's job.
/// Closures taking a `&Card` implement this trait.
pub trait DeleteConfirmation {
    fn confirm_delete(&self, card: &Card) -> bool;
}

impl<F> DeleteConfirmation for F
where
    F: Fn(&Card) -> bool,
{
    fn confirm_delete(&self, card: &Card) -> bool {
        self(card)
    }
}

/// Errors from the form-driven entry points
#[derive(Debug, thiserror::Error)]
pub enum FormSubmissionError {
    #[error("Form input is invalid ({} problems)", .0.len())]
    InvalidInput(Vec<CardFormError>),
    #[error(transparent)]
    Store(#[from] CardStoreError),
}

/// Result of submitting the add/edit card form
#[derive(Debug, Clone)]
pub enum CardFormOutcome {
    Created(CreateCardResult),
    Updated(UpdateCardResult),
}

/// Main backend struct holding the configuration, the card store and the form service
pub struct Backend<S: CardStorage = CardRepository> {
    pub config: TrackerConfig,
    pub card_store: CardStore<S>,
    pub card_form_service: CardFormService,
}

impl Backend<CardRepository> {
    /// Open the tracker in the default data directory
    pub fn new() -> Result<Self> {
        Self::with_connection(JsonConnection::new_default()?)
    }

    /// Open the tracker in a specific data directory
    pub fn with_data_directory<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_connection(JsonConnection::new(path)?)
    }

    fn with_connection(connection: JsonConnection) -> Result<Self> {
        info!("Loading tracker config from {}", connection.base_directory().display());
        let config = ConfigRepository::new(connection.clone()).load_or_create()?;

        info!("Opening card store");
        let storage = CardRepository::new(connection);
        Ok(Self::with_storage(storage, config)?)
    }
}

impl<S: CardStorage> Backend<S> {
    /// Build a backend on any card storage
    pub fn with_storage(storage: S, config: TrackerConfig) -> Result<Self, CardStoreError> {
        let card_store = CardStore::load(storage, config.seed_example_cards)?;
        let card_form_service = CardFormService::with_config(config.form.clone());
        Ok(Self {
            config,
            card_store,
            card_form_service,
        })
    }

    /// All cards with their cashback projection, rounded for display
    pub fn card_summaries(&self) -> CardListResponse {
        CardMapper::to_card_list_dto(self.card_store.list())
    }

    /// Submit the card form: creates a card when `card_id` is `None`,
    /// otherwise edits that card
    pub fn submit_card_form(
        &mut self,
        card_id: Option<&str>,
        name: &str,
        percent_input: &str,
        limit_input: &str,
    ) -> Result<CardFormOutcome, FormSubmissionError> {
        let validation = self.card_form_service.validate_card_form(name, percent_input, limit_input);

        match card_id {
            Some(card_id) => {
                let command = self
                    .card_form_service
                    .to_update_command(card_id, &validation)
                    .ok_or_else(|| FormSubmissionError::InvalidInput(validation.errors.clone()))?;
                Ok(CardFormOutcome::Updated(self.card_store.update_card(command)?))
            }
            None => {
                let command = self
                    .card_form_service
                    .to_create_command(&validation)
                    .ok_or_else(|| FormSubmissionError::InvalidInput(validation.errors.clone()))?;
                Ok(CardFormOutcome::Created(self.card_store.add_card(command)?))
            }
        }
    }

    /// Record a spend typed into the spend field of a card
    pub fn record_spend_input(&mut self, card_id: &str, amount_input: &str) -> Result<RecordSpendResult, FormSubmissionError> {
        let command = self
            .card_form_service
            .to_record_spend_command(card_id, amount_input)
            .map_err(|e| FormSubmissionError::InvalidInput(vec![e]))?;
        Ok(self.card_store.record_spend(command)?)
    }

    /// Delete a card once `confirmation` agrees.
    ///
    /// Returns `Ok(None)` without touching the store when the user declines.
    pub fn delete_card_with_confirmation(
        &mut self,
        card_id: &str,
        confirmation: &impl DeleteConfirmation,
    ) -> Result<Option<DeleteCardResult>, CardStoreError> {
        let card = self.card_store.get(card_id).ok_or_else(|| CardStoreError::NotFound {
            card_id: card_id.to_string(),
        })?;

        if !confirmation.confirm_delete(card) {
            info!("Deletion of card {} declined", card_id);
            return Ok(None);
        }

        self.card_store.delete_card(card_id).map(Some)
    }
}
