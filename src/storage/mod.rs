//! Storage backends implementing the inventory API contract

pub mod in_memory;

pub use in_memory::InMemoryInventory;
