//! # JSON File Storage
//!
//! File-based storage for the tracker. The data directory holds two files:
//!
//! ```text
//! Cashback Tracker/
//! ├── cards.json     ← full card snapshot, rewritten after every change
//! └── config.yaml    ← tracker configuration
//! ```
//!
//! Both files are written through a temp file and a rename, so a failed write
//! never leaves a half-written file behind.

pub mod connection;
pub mod card_repository;
pub mod config_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use card_repository::CardRepository;
pub use config_repository::{ConfigRepository, TrackerConfig};
