//! Domain model for a credit card and its spend history.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::backend::domain::cashback_calculator::{CashbackProjection, CashbackTerms};
use crate::backend::domain::spend_ledger;

/// Longest card name accepted by the store
pub const MAX_CARD_NAME_LENGTH: usize = 100;

/// One recorded addition to a card's cumulative spend
#[derive(Debug, Clone, PartialEq)]
pub struct SpendEvent {
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// A credit card's cashback configuration and spend state.
///
/// `spent` is never assigned directly. It is derived from `history`, which only
/// grows through [`spend_ledger::record_spend`].
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    id: String,
    name: String,
    terms: CashbackTerms,
    spent: f64,
    history: Vec<SpendEvent>,
}

impl Card {
    /// Generate a unique ID for a card
    pub fn generate_id() -> String {
        format!("card::{}", Uuid::new_v4())
    }

    /// Create a card with no spend recorded yet
    pub fn new(id: String, name: &str, terms: CashbackTerms) -> Result<Self, CardValidationError> {
        Self::with_history(id, name, terms, Vec::new())
    }

    /// Rebuild a card from stored parts. `spent` is recomputed from `history`.
    pub fn with_history(
        id: String,
        name: &str,
        terms: CashbackTerms,
        history: Vec<SpendEvent>,
    ) -> Result<Self, CardValidationError> {
        let name = validate_card_name(name)?;
        let spent = spend_ledger::total_spent(&history);
        Ok(Self {
            id,
            name,
            terms,
            spent,
            history,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> CashbackTerms {
        self.terms
    }

    pub fn cashback_limit(&self) -> f64 {
        self.terms.cashback_limit()
    }

    pub fn cashback_percent(&self) -> f64 {
        self.terms.cashback_percent()
    }

    pub fn spent(&self) -> f64 {
        self.spent
    }

    pub fn history(&self) -> &[SpendEvent] {
        &self.history
    }

    /// Cashback projection at the current spend level
    pub fn projection(&self) -> CashbackProjection {
        self.terms.project(self.spent)
    }

    pub(crate) fn rename(&mut self, name: &str) -> Result<(), CardValidationError> {
        self.name = validate_card_name(name)?;
        Ok(())
    }

    pub(crate) fn set_terms(&mut self, terms: CashbackTerms) {
        self.terms = terms;
    }

    pub(crate) fn append_spend(&mut self, event: SpendEvent) {
        self.history.push(event);
        self.spent = spend_ledger::total_spent(&self.history);
    }
}

/// Trim a card name and check it is usable as a display label
pub fn validate_card_name(name: &str) -> Result<String, CardValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CardValidationError::EmptyName);
    }
    let length = trimmed.chars().count();
    if length > MAX_CARD_NAME_LENGTH {
        return Err(CardValidationError::NameTooLong(length));
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CardValidationError {
    #[error("Card name cannot be empty")]
    EmptyName,
    #[error("Card name is too long ({0} characters, maximum is 100)")]
    NameTooLong(usize),
    #[error("Cashback limit must be a finite number")]
    NonFiniteLimit,
    #[error("Cashback limit cannot be negative")]
    NegativeLimit,
    #[error("Cashback percent must be a finite number")]
    NonFinitePercent,
    #[error("Cashback percent must be greater than 0")]
    NonPositivePercent,
    #[error("Cashback percent cannot exceed 100")]
    PercentOutOfRange,
}
