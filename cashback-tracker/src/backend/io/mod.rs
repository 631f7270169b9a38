//! # IO Module
//!
//! Boundary between the domain layer and whatever presents or persists it.
//! The mappers translate domain cards into the `shared` DTOs used both by the
//! presentation layer and by the stored snapshot.

pub mod mappers;

pub use mappers::CardMapper;
