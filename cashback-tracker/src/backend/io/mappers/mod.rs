pub mod card_mapper;

pub use card_mapper::CardMapper;
