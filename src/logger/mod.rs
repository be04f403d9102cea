//! Logger module
//!
//! Console logging for the HTTP server: startup banner, timestamped
//! access lines, errors and warnings. Access logging can be turned off
//! in the configuration; errors always go to stderr.

use crate::config::Config;
use chrono::Local;
use hyper::Method;
use std::net::SocketAddr;

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Bird service started");
    println!("Listening on: http://{addr}");
    println!(
        "Assets: {} -> {}",
        config.assets.route_prefix, config.assets.dir
    );
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

/// Access log line, one per dispatched request
pub fn log_request(method: &Method, path: &str) {
    println!("[{}] {method} {path}", timestamp());
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}
