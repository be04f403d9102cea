// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub assets: AssetsConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads; defaults to the number of CPU cores
    pub workers: Option<usize>,
}

/// Static assets configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Directory asset requests are served from
    pub dir: String,
    /// URL prefix for asset requests; also the create handler's redirect target
    pub route_prefix: String,
    /// Files tried in order when a directory is requested
    pub index_files: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}
