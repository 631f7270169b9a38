//! Domain-level command and result types for the card store.
//! The presentation layer maps the request DTOs in the `shared` crate to these
//! types before calling into the store.

pub mod cards {
    use crate::backend::domain::models::{Card, SpendEvent};

    /// Input for creating a new card.
    #[derive(Debug, Clone)]
    pub struct CreateCardCommand {
        pub name: String,
        pub cashback_limit: f64,
        pub cashback_percent: f64,
    }

    /// Input for editing a card. `None` fields keep their current value.
    #[derive(Debug, Clone, Default)]
    pub struct UpdateCardCommand {
        pub card_id: String,
        pub name: Option<String>,
        pub cashback_limit: Option<f64>,
        pub cashback_percent: Option<f64>,
    }

    /// Input for recording a spend.
    #[derive(Debug, Clone)]
    pub struct RecordSpendCommand {
        pub card_id: String,
        pub amount: f64,
    }

    #[derive(Debug, Clone)]
    pub struct CreateCardResult {
        pub card: Card,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateCardResult {
        pub card: Card,
    }

    #[derive(Debug, Clone)]
    pub struct RecordSpendResult {
        pub card: Card,
        pub event: SpendEvent,
    }

    #[derive(Debug, Clone)]
    pub struct DeleteCardResult {
        pub card: Card,
        pub success_message: String,
    }
}
