//! # Storage Traits
//!
//! This module defines the storage abstraction that lets the card store persist
//! its collection without knowing where the snapshot ends up.

use anyhow::Result;

use crate::backend::domain::models::Card as DomainCard;

/// Trait defining the interface for card snapshot storage
///
/// The whole collection is written on every save; there are no partial
/// updates. Implementations must either write the complete snapshot or leave
/// the previous one in place.
pub trait CardStorage: Send + Sync {
    /// Load the stored collection in insertion order.
    /// Returns `None` when nothing has been stored yet.
    fn load_cards(&self) -> Result<Option<Vec<DomainCard>>>;

    /// Replace the stored collection with `cards`
    fn save_cards(&self, cards: &[DomainCard]) -> Result<()>;
}
