//! Cashback tracker: keeps a list of credit cards with their cashback cap and
//! works out how much can still be spent on each before the cap is reached.
//!
//! ```no_run
//! use cashback_tracker::backend::Backend;
//! use cashback_tracker::backend::domain::commands::cards::CreateCardCommand;
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut backend = Backend::new()?;
//! backend.card_store.add_card(CreateCardCommand {
//!     name: "Visa".to_string(),
//!     cashback_limit: 500.0,
//!     cashback_percent: 2.0,
//! })?;
//! for card in backend.card_summaries().cards {
//!     println!("{}: {} left", card.name, card.remaining);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod logging;
