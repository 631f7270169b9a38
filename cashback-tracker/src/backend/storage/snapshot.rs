//! # Card Snapshot Format
//!
//! The snapshot is a JSON array of card objects, the same shape the browser
//! version of the tracker kept under its `cards` key:
//!
//! ```json
//! [
//!   {
//!     "id": "card1",
//!     "name": "卡片A",
//!     "cashbackLimit": 500.0,
//!     "cashbackPercent": 2.0,
//!     "spent": 1000.0,
//!     "history": [{ "amount": 1000.0, "timestamp": "2025-03-01T12:00:00+00:00" }]
//!   }
//! ]
//! ```
//!
//! Records that cannot be loaded (malformed fields, invalid terms, duplicate
//! ids) are skipped with a warning so that one bad entry does not hide the rest
//! of the collection. They are kept verbatim and appended after the loaded
//! cards on the next write, so a save never drops data the tracker could not
//! read. A snapshot that is not a JSON array is an error.
//!
//! The two example cards a fresh tracker starts with are named `卡片A` and
//! `卡片B`, matching snapshots written by the browser version.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde_json::Value;

use crate::backend::domain::models::Card as DomainCard;
use crate::backend::io::CardMapper;
use shared::Card as SharedCard;

/// Cards decoded from a snapshot together with the records that were skipped
#[derive(Debug, Default)]
pub struct DecodedSnapshot {
    pub cards: Vec<DomainCard>,
    /// Raw records that could not be loaded, in stored order
    pub rejected: Vec<Value>,
}

/// Serialize the full collection followed by any previously rejected records
pub fn encode_snapshot(cards: &[DomainCard], rejected: &[Value]) -> Result<String> {
    let mut records = Vec::with_capacity(cards.len() + rejected.len());
    for card in cards {
        let record = serde_json::to_value(CardMapper::to_dto(card))
            .with_context(|| format!("Failed to serialize card {}", card.id()))?;
        records.push(record);
    }
    records.extend(rejected.iter().cloned());

    serde_json::to_string_pretty(&records).context("Failed to serialize card snapshot")
}

/// Deserialize a collection, keeping the stored order
pub fn decode_snapshot(json: &str) -> Result<DecodedSnapshot> {
    let records: Vec<Value> = serde_json::from_str(json).context("Failed to parse card snapshot")?;
    let now = Utc::now();

    let mut seen_ids = HashSet::new();
    let mut decoded = DecodedSnapshot::default();
    for record in records {
        match decode_record(&record, &seen_ids, now) {
            Ok(card) => {
                seen_ids.insert(card.id().to_string());
                decoded.cards.push(card);
            }
            Err(e) => {
                warn!("Skipping card {} in snapshot: {:#}", record_label(&record), e);
                decoded.rejected.push(record);
            }
        }
    }

    debug!(
        "Decoded {} cards from snapshot, {} skipped",
        decoded.cards.len(),
        decoded.rejected.len()
    );
    Ok(decoded)
}

fn decode_record(record: &Value, seen_ids: &HashSet<String>, now: DateTime<Utc>) -> Result<DomainCard> {
    let dto: SharedCard = serde_json::from_value(record.clone()).context("Unreadable card record")?;
    if seen_ids.contains(&dto.id) {
        return Err(anyhow!("Duplicate card id {}", dto.id));
    }
    CardMapper::to_domain(dto, now)
}

fn record_label(record: &Value) -> &str {
    record.get("id").and_then(Value::as_str).unwrap_or("<without id>")
}

/// Snapshot codec shared by the storage implementations.
///
/// Remembers the records skipped by the last decode and writes them back on
/// every encode. Clones share that memory.
#[derive(Debug, Clone, Default)]
pub struct SnapshotCodec {
    rejected: Arc<Mutex<Vec<Value>>>,
}

impl SnapshotCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&self, json: &str) -> Result<Vec<DomainCard>> {
        let decoded = decode_snapshot(json)?;
        let mut rejected = self.rejected.lock().map_err(|_| anyhow!("Snapshot codec lock poisoned"))?;
        *rejected = decoded.rejected;
        Ok(decoded.cards)
    }

    pub fn encode(&self, cards: &[DomainCard]) -> Result<String> {
        let rejected = self.rejected.lock().map_err(|_| anyhow!("Snapshot codec lock poisoned"))?;
        encode_snapshot(cards, &rejected)
    }

    /// Number of stored records the last decode could not load
    pub fn rejected_count(&self) -> Result<usize> {
        let rejected = self.rejected.lock().map_err(|_| anyhow!("Snapshot codec lock poisoned"))?;
        Ok(rejected.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::cashback_calculator::CashbackTerms;
    use crate::backend::domain::spend_ledger;

    fn sample_cards() -> Vec<DomainCard> {
        let mut visa = DomainCard::new(
            DomainCard::generate_id(),
            "Visa",
            CashbackTerms::new(500.0, 2.0).unwrap(),
        )
        .unwrap();
        for amount in [100.0, 250.5, 12.25] {
            spend_ledger::record_spend(&mut visa, amount, Utc::now()).unwrap();
        }
        let untouched = DomainCard::new(
            DomainCard::generate_id(),
            "Untouched",
            CashbackTerms::new(0.0, 1.0).unwrap(),
        )
        .unwrap();
        let master = DomainCard::new(
            DomainCard::generate_id(),
            "Mastercard",
            CashbackTerms::new(300.0, 1.5).unwrap(),
        )
        .unwrap();
        vec![visa, untouched, master]
    }

    #[test]
    fn test_snapshot_round_trip_keeps_order_and_history() {
        let cards = sample_cards();

        let json = encode_snapshot(&cards, &[]).unwrap();
        let restored = decode_snapshot(&json).unwrap().cards;

        assert_eq!(restored, cards);
        let amounts: Vec<f64> = restored[0].history().iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![100.0, 250.5, 12.25]);
        assert!(restored[1].history().is_empty());
    }

    #[test]
    fn test_empty_snapshot() {
        let json = encode_snapshot(&[], &[]).unwrap();
        assert_eq!(json.trim(), "[]");
        let decoded = decode_snapshot(&json).unwrap();
        assert!(decoded.cards.is_empty());
        assert!(decoded.rejected.is_empty());
    }

    #[test]
    fn test_invalid_and_duplicate_records_are_skipped() {
        let json = r#"[
            {"id":"card1","name":"Card A","cashbackLimit":500,"cashbackPercent":2,"spent":0,"history":[]},
            {"id":"card2","name":"Broken","cashbackLimit":300,"cashbackPercent":0,"spent":0,"history":[]},
            {"id":"card1","name":"Again","cashbackLimit":100,"cashbackPercent":1,"spent":0,"history":[]},
            {"id":"card3","name":"Card C","cashbackLimit":100,"cashbackPercent":1,"spent":0}
        ]"#;

        let decoded = decode_snapshot(json).unwrap();
        let ids: Vec<&str> = decoded.cards.iter().map(|c| c.id()).collect();
        assert_eq!(ids, vec!["card1", "card3"]);
        assert_eq!(decoded.cards[0].name(), "Card A");

        let rejected: Vec<&str> = decoded.rejected.iter().map(|r| r["name"].as_str().unwrap()).collect();
        assert_eq!(rejected, vec!["Broken", "Again"]);
    }

    #[test]
    fn test_null_fields_do_not_hide_other_cards() {
        // NaN totals were written as null by the browser version
        let json = r#"[
            {"id":"card1","name":"卡片A","cashbackLimit":500,"cashbackPercent":2,"spent":null},
            {"id":"card2","name":"卡片B","cashbackLimit":300,"cashbackPercent":1.5,"spent":0}
        ]"#;

        let decoded = decode_snapshot(json).unwrap();
        assert_eq!(decoded.cards.len(), 1);
        assert_eq!(decoded.cards[0].id(), "card2");
        assert_eq!(decoded.rejected.len(), 1);
        assert!(decoded.rejected[0]["spent"].is_null());
    }

    #[test]
    fn test_rejected_records_are_written_back() {
        let json = r#"[
            {"id":"card1","name":"卡片A","cashbackLimit":500,"cashbackPercent":0,"spent":0},
            {"id":"card2","name":"卡片B","cashbackLimit":300,"cashbackPercent":1.5,"spent":0}
        ]"#;
        let codec = SnapshotCodec::new();
        let mut cards = codec.decode(json).unwrap();
        assert_eq!(codec.rejected_count().unwrap(), 1);

        cards.extend(sample_cards());
        let written = codec.encode(&cards).unwrap();

        let records: Vec<Value> = serde_json::from_str(&written).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[4]["id"], "card1");
        assert_eq!(records[4]["cashbackPercent"], 0);

        let reloaded = codec.decode(&written).unwrap();
        assert_eq!(reloaded, cards);
        assert_eq!(codec.rejected_count().unwrap(), 1);
    }

    #[test]
    fn test_amounts_survive_round_trip_exactly() {
        let mut card = DomainCard::new(
            DomainCard::generate_id(),
            "Precise",
            CashbackTerms::new(1.0 / 3.0, 100.0 / 7.0).unwrap(),
        )
        .unwrap();
        let amounts = [27.352572057142858, 0.1 + 0.2, 1.0 / 3.0, 2.0_f64.sqrt() * 1000.0, 1e-7, 123456.789012345];
        for amount in amounts {
            spend_ledger::record_spend(&mut card, amount, Utc::now()).unwrap();
        }

        let json = encode_snapshot(&[card.clone()], &[]).unwrap();
        let restored = decode_snapshot(&json).unwrap().cards;

        assert_eq!(restored, vec![card.clone()]);
        let restored_amounts: Vec<f64> = restored[0].history().iter().map(|e| e.amount).collect();
        assert_eq!(restored_amounts, amounts.to_vec());
        assert_eq!(restored[0].spent().to_bits(), card.spent().to_bits());
        assert_eq!(restored[0].cashback_limit().to_bits(), (1.0_f64 / 3.0).to_bits());
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        assert!(decode_snapshot("{not json").is_err());
        assert!(decode_snapshot(r#"{"cards": []}"#).is_err());
    }
}
