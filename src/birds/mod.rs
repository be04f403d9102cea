// Bird resource module
// In-memory store plus the list/create request handlers

pub mod form;
pub mod handlers;
mod store;

pub use store::{Bird, BirdStore};
