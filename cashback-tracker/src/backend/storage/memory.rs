//! In-memory card storage.
//!
//! Holds the serialized snapshot as a single string blob, the way a browser
//! key-value store would. Clones share the same blob, so a store built on one
//! clone can be reloaded from another.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use log::debug;

use super::snapshot::SnapshotCodec;
use super::traits::CardStorage;
use crate::backend::domain::models::Card as DomainCard;

#[derive(Clone, Default)]
pub struct InMemoryCardRepository {
    blob: Arc<Mutex<Option<String>>>,
    codec: SnapshotCodec,
}

impl InMemoryCardRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing serialized snapshot
    pub fn with_snapshot(json: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(Mutex::new(Some(json.into()))),
            codec: SnapshotCodec::new(),
        }
    }

    /// The currently stored snapshot, if any
    pub fn snapshot(&self) -> Result<Option<String>> {
        let blob = self.blob.lock().map_err(|_| anyhow!("Card snapshot lock poisoned"))?;
        Ok(blob.clone())
    }
}

impl CardStorage for InMemoryCardRepository {
    fn load_cards(&self) -> Result<Option<Vec<DomainCard>>> {
        match self.snapshot()? {
            Some(json) => Ok(Some(self.codec.decode(&json)?)),
            None => Ok(None),
        }
    }

    fn save_cards(&self, cards: &[DomainCard]) -> Result<()> {
        let json = self.codec.encode(cards)?;
        let mut blob = self.blob.lock().map_err(|_| anyhow!("Card snapshot lock poisoned"))?;
        *blob = Some(json);
        debug!("Stored in-memory snapshot of {} cards", cards.len());
        Ok(())
    }
}
