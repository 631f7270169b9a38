//! # Storage Module
//!
//! Persists the card collection and the tracker configuration.
//!
//! The card store only talks to the [`CardStorage`] trait, so the snapshot can
//! live in a JSON file on disk ([`json::CardRepository`]) or in an in-memory
//! blob ([`memory::InMemoryCardRepository`]) without the domain layer noticing.
//! Both implementations share the snapshot codec in [`snapshot`].

pub mod traits;
pub mod snapshot;
pub mod memory;
pub mod json;

pub use traits::CardStorage;
pub use memory::InMemoryCardRepository;
pub use json::{CardRepository, ConfigRepository, JsonConnection, TrackerConfig};
