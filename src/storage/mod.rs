//! Storage implementations for content collections

pub mod in_memory;
pub mod json_file;

pub use in_memory::{InMemoryDataService, InMemoryDocument};
pub use json_file::{JsonFileDataService, JsonFileDocument};
