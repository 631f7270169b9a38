use serde::{Deserialize, Serialize};

/// A credit card as it crosses the presentation boundary and as it is
/// persisted in the card snapshot.
///
/// Field names are camelCase on the wire so that snapshots written by the
/// browser version of the tracker load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Opaque identifier, e.g. "card::2f1c..."
    pub id: String,
    pub name: String,
    /// Maximum cashback payout for a period
    pub cashback_limit: f64,
    /// Cashback rate as a percentage (2.0 means 2%)
    pub cashback_percent: f64,
    /// Cumulative spend, always the sum of `history`
    pub spent: f64,
    /// Spend events in insertion order. Older snapshots have no history.
    #[serde(default)]
    pub history: Vec<SpendEvent>,
}

/// One recorded addition to a card's cumulative spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendEvent {
    pub amount: f64,
    /// RFC 3339 timestamp assigned when the spend was recorded
    pub timestamp: String,
}

/// A card together with its cashback projection, ready for display.
/// Money values are rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub id: String,
    pub name: String,
    pub cashback_limit: f64,
    pub cashback_percent: f64,
    pub spent: f64,
    /// Spending level at which the cashback cap is reached
    pub max_spendable: f64,
    /// May be negative once the cap has been exceeded
    pub remaining: f64,
    /// Cashback earned so far, never above the limit
    pub cashback_earned: f64,
    pub is_capped: bool,
    pub spend_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<CardSummary>,
}

/// Request for creating a new card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardRequest {
    pub name: String,
    pub cashback_limit: f64,
    pub cashback_percent: f64,
}

/// Request for editing a card. Fields left as `None` are not changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub card_id: String,
    pub name: Option<String>,
    pub cashback_limit: Option<f64>,
    pub cashback_percent: Option<f64>,
}

/// Request for recording a spend against a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSpendRequest {
    pub card_id: String,
    pub amount: f64,
}

/// Whether the card form is creating a new card or editing an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFormMode {
    Create,
    Edit,
}

/// Form validation result for the add/edit card form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFormValidation {
    pub is_valid: bool,
    pub errors: Vec<CardFormError>,
    pub cleaned_name: Option<String>,
    pub cleaned_limit: Option<f64>,
    pub cleaned_percent: Option<f64>,
}

/// Specific validation errors for card and spend forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CardFormError {
    EmptyName,
    NameTooLong(usize),
    EmptyLimit,
    InvalidLimitFormat(String),
    NegativeLimit,
    LimitTooLarge(f64),
    EmptyPercent,
    InvalidPercentFormat(String),
    PercentNotPositive,
    PercentTooLarge,
    EmptySpendAmount,
    InvalidSpendFormat(String),
    SpendNotPositive,
    SpendTooLarge(f64),
}

/// Configuration for card form parsing and amount display.
/// Card names are limited by the card model itself, not by this config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardFormConfig {
    pub max_amount: f64,
    pub currency_symbol: String,
}

impl Default for CardFormConfig {
    fn default() -> Self {
        Self {
            max_amount: 1_000_000_000.0,
            currency_symbol: "$".to_string(),
        }
    }
}
