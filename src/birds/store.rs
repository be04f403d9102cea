//! In-memory bird store
//!
//! An insertion-ordered, append-only sequence of birds. The mutex
//! keeps concurrent creates from losing appends; readers take a
//! snapshot so serialization happens outside the lock.

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// The sole domain entity: a species/description pair.
///
/// Both fields are free text and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bird {
    pub species: String,
    pub description: String,
}

/// Ordered collection of birds, alive for the process lifetime.
///
/// The sequence only ever grows; there is no update or delete.
#[derive(Debug, Default)]
pub struct BirdStore {
    birds: Mutex<Vec<Bird>>,
}

impl BirdStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bird to the end of the sequence.
    pub async fn push(&self, bird: Bird) {
        self.birds.lock().await.push(bird);
    }

    /// Clone of the current sequence, in insertion order.
    pub async fn snapshot(&self) -> Vec<Bird> {
        self.birds.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.birds.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
