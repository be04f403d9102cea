// Application state module

use super::types::Config;
use crate::birds::BirdStore;

/// Shared application state
///
/// Built once in `main` and handed to every handler behind an `Arc`,
/// so the bird store has exactly one owner and no global fixtures.
pub struct AppState {
    pub config: Config,
    pub birds: BirdStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            birds: BirdStore::new(),
        }
    }
}
