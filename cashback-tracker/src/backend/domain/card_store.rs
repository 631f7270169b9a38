//! Card store for the cashback tracker.
//!
//! The store owns the card collection for the whole session. Each mutating
//! operation validates its input, applies the change to a copy of the
//! collection, writes that copy as the new snapshot and only then keeps it. A
//! failed write therefore leaves the previous collection in place.

use chrono::Utc;
use log::{debug, info, warn};

use crate::backend::domain::cashback_calculator::CashbackTerms;
use crate::backend::domain::commands::cards::{
    CreateCardCommand, CreateCardResult, DeleteCardResult, RecordSpendCommand, RecordSpendResult,
    UpdateCardCommand, UpdateCardResult,
};
use crate::backend::domain::models::{Card, CardValidationError};
use crate::backend::domain::spend_ledger::{self, SpendValidationError};
use crate::backend::storage::CardStorage;

/// Errors returned by card store operations
#[derive(Debug, thiserror::Error)]
pub enum CardStoreError {
    #[error("Invalid card configuration: {0}")]
    InvalidCardConfig(#[from] CardValidationError),
    #[error("Card not found: {card_id}")]
    NotFound { card_id: String },
    #[error("Invalid spend amount: {0}")]
    InvalidSpendAmount(#[from] SpendValidationError),
    #[error("Card storage failed: {0:#}")]
    Storage(anyhow::Error),
}

/// The two cards a fresh tracker starts with when seeding is enabled
pub fn example_cards() -> Result<Vec<Card>, CardValidationError> {
    Ok(vec![
        Card::new("card1".to_string(), "卡片A", CashbackTerms::new(500.0, 2.0)?)?,
        Card::new("card2".to_string(), "卡片B", CashbackTerms::new(300.0, 1.5)?)?,
    ])
}

/// Owns the card collection and keeps the stored snapshot in step with it
pub struct CardStore<S: CardStorage> {
    storage: S,
    cards: Vec<Card>,
}

impl<S: CardStorage> CardStore<S> {
    /// Create an empty store without reading from storage
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            cards: Vec::new(),
        }
    }

    /// Rehydrate the store from storage.
    ///
    /// When nothing has been stored yet the store starts with the example cards
    /// if `seed_example_cards` is set, otherwise empty. The seed is not written
    /// back until the first change or an explicit [`CardStore::save`].
    pub fn load(storage: S, seed_example_cards: bool) -> Result<Self, CardStoreError> {
        let cards = match storage.load_cards().map_err(CardStoreError::Storage)? {
            Some(cards) => {
                info!("Loaded {} cards from storage", cards.len());
                cards
            }
            None if seed_example_cards => {
                info!("No stored cards found, starting with example cards");
                example_cards()?
            }
            None => {
                info!("No stored cards found, starting empty");
                Vec::new()
            }
        };

        Ok(Self { storage, cards })
    }

    /// Write the current collection as the stored snapshot
    pub fn save(&self) -> Result<(), CardStoreError> {
        self.storage.save_cards(&self.cards).map_err(CardStoreError::Storage)?;
        debug!("Saved snapshot of {} cards", self.cards.len());
        Ok(())
    }

    /// All cards in insertion order
    pub fn list(&self) -> &[Card] {
        &self.cards
    }

    pub fn get(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|card| card.id() == card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Add a new card with no spend recorded
    pub fn add_card(&mut self, command: CreateCardCommand) -> Result<CreateCardResult, CardStoreError> {
        info!(
            "Adding card: name={}, limit={}, percent={}",
            command.name, command.cashback_limit, command.cashback_percent
        );

        let terms = CashbackTerms::new(command.cashback_limit, command.cashback_percent)?;
        let card = Card::new(self.unused_card_id(), &command.name, terms)?;

        let mut candidate = self.cards.clone();
        candidate.push(card.clone());
        self.commit(candidate)?;

        info!("Added card: {} with ID: {}", card.name(), card.id());
        Ok(CreateCardResult { card })
    }

    /// Merge the given fields into an existing card and re-validate it
    pub fn update_card(&mut self, command: UpdateCardCommand) -> Result<UpdateCardResult, CardStoreError> {
        info!("Updating card: {}", command.card_id);

        let mut candidate = self.cards.clone();
        let card = candidate
            .iter_mut()
            .find(|card| card.id() == command.card_id)
            .ok_or_else(|| not_found(&command.card_id))?;

        let terms = CashbackTerms::new(
            command.cashback_limit.unwrap_or(card.cashback_limit()),
            command.cashback_percent.unwrap_or(card.cashback_percent()),
        )?;
        if let Some(name) = &command.name {
            card.rename(name)?;
        }
        card.set_terms(terms);
        let card = card.clone();

        self.commit(candidate)?;

        info!("Updated card: {} with ID: {}", card.name(), card.id());
        Ok(UpdateCardResult { card })
    }

    /// Remove a card. There is no undo.
    pub fn delete_card(&mut self, card_id: &str) -> Result<DeleteCardResult, CardStoreError> {
        info!("Deleting card: {}", card_id);

        let position = self
            .cards
            .iter()
            .position(|card| card.id() == card_id)
            .ok_or_else(|| not_found(card_id))?;

        let mut candidate = self.cards.clone();
        let card = candidate.remove(position);
        self.commit(candidate)?;

        info!("Deleted card: {} with ID: {}", card.name(), card.id());
        Ok(DeleteCardResult {
            success_message: format!("Card '{}' deleted successfully", card.name()),
            card,
        })
    }

    /// Record a spend on a card through the spend ledger
    pub fn record_spend(&mut self, command: RecordSpendCommand) -> Result<RecordSpendResult, CardStoreError> {
        info!("Recording spend of {} on card {}", command.amount, command.card_id);

        spend_ledger::validate_spend_amount(command.amount)?;

        let mut candidate = self.cards.clone();
        let card = candidate
            .iter_mut()
            .find(|card| card.id() == command.card_id)
            .ok_or_else(|| not_found(&command.card_id))?;

        let event = spend_ledger::record_spend(card, command.amount, Utc::now())?;
        let card = card.clone();

        self.commit(candidate)?;

        info!("Card {} has now spent {:.2}", card.id(), card.spent());
        Ok(RecordSpendResult { card, event })
    }

    /// Persist `candidate` and adopt it as the current collection
    fn commit(&mut self, candidate: Vec<Card>) -> Result<(), CardStoreError> {
        if let Err(e) = self.storage.save_cards(&candidate) {
            warn!("Failed to save card snapshot, keeping previous state: {:#}", e);
            return Err(CardStoreError::Storage(e));
        }
        self.cards = candidate;
        Ok(())
    }

    fn unused_card_id(&self) -> String {
        loop {
            let id = Card::generate_id();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn not_found(card_id: &str) -> CardStoreError {
    warn!("Card not found: {}", card_id);
    CardStoreError::NotFound {
        card_id: card_id.to_string(),
    }
}
