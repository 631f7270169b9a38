use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;

use super::connection::{write_atomically, JsonConnection};
use crate::backend::domain::models::Card as DomainCard;
use crate::backend::storage::snapshot::SnapshotCodec;
use crate::backend::storage::traits::CardStorage;

/// File-based card repository keeping the whole collection in `cards.json`
#[derive(Debug, Clone)]
pub struct CardRepository {
    connection: JsonConnection,
    codec: SnapshotCodec,
}

impl CardRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self {
            connection,
            codec: SnapshotCodec::new(),
        }
    }
}

impl CardStorage for CardRepository {
    fn load_cards(&self) -> Result<Option<Vec<DomainCard>>> {
        let file_path = self.connection.cards_file_path();

        if !file_path.exists() {
            debug!("No card snapshot at {:?}", file_path);
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read card snapshot {}", file_path.display()))?;
        let cards = self.codec.decode(&json)?;

        info!("Loaded {} cards from {:?}", cards.len(), file_path);
        Ok(Some(cards))
    }

    fn save_cards(&self, cards: &[DomainCard]) -> Result<()> {
        let file_path = self.connection.cards_file_path();
        let json = self.codec.encode(cards)?;

        write_atomically(&file_path, &json)?;

        debug!("Saved {} cards to {:?}", cards.len(), file_path);
        Ok(())
    }
}
