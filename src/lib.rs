//! birdhouse - a small async HTTP service
//!
//! Serves static assets and a tiny in-memory bird API over Hyper/Tokio.
//! All state lives in [`config::AppState`], built once at startup and
//! shared with every handler.

pub mod birds;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
