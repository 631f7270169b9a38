//! # Domain Module
//!
//! Business logic of the cashback tracker, independent of how cards are shown
//! or where they are stored.
//!
//! ## Module Organization
//!
//! - **models**: the card record and its spend events
//! - **cashback_calculator**: max spendable and remaining before the cashback cap
//! - **spend_ledger**: append-only spend history and the derived spend total
//! - **card_store**: the card collection and its add/edit/delete/spend operations
//! - **card_form**: parsing and validation of user-entered form text
//! - **commands**: inputs and results of card store operations
//!
//! ## Business Rules
//!
//! - Card names are non-empty; limits are non-negative; percentages are in (0, 100]
//! - Spend amounts are positive and finite
//! - A card's spent total is always the sum of its history
//! - Every change is persisted as a full snapshot before it becomes visible

pub mod models;
pub mod cashback_calculator;
pub mod spend_ledger;
pub mod card_store;
pub mod card_form;
pub mod commands;

pub use cashback_calculator::{CashbackProjection, CashbackTerms};
pub use spend_ledger::SpendValidationError;
pub use card_store::{CardStore, CardStoreError};
pub use card_form::CardFormService;
pub use commands::*;
