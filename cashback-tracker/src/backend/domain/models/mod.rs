pub mod card;

pub use card::{Card, CardValidationError, SpendEvent, MAX_CARD_NAME_LENGTH};
