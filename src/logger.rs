//! Operator-facing logging.
//!
//! Everything goes to stdout/stderr; there is no log file or structured
//! channel. The startup banner mirrors what operators of the original
//! camera test setup expect to see.

use crate::config::PAGES;
use chrono::Local;
use hyper::{Method, Uri, Version};
use std::path::Path;

/// Startup banner, printed after the listener is bound so every URL
/// carries the port actually in use.
pub fn log_server_start(port: u16, root: &Path) {
    println!("======================================");
    println!("Starting camera test server on http://localhost:{port}");
    println!("Camera access requires HTTP/HTTPS, not the file:// protocol");
    println!();
    println!("Available pages:");
    for (label, path) in PAGES {
        println!("  - {label}: http://localhost:{port}{path}");
    }
    println!();
    println!("Serving root: {}", root.display());
    println!("Press Ctrl+C to stop the server");
    println!("======================================\n");
}

pub fn log_port_in_use(port: u16, next_port: u16) {
    println!("Port {port} is already in use. Trying port {next_port}...");
}

// Operator-visible failure, so stdout like the rest of the status text.
pub fn log_bind_error(err: &std::io::Error) {
    println!("Error starting server: {err}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    println!(
        "[Request] [{}] {} {} {:?}",
        Local::now().format("%d/%b/%Y:%H:%M:%S"),
        method,
        uri,
        version
    );
}

pub fn log_response(status: u16, size: usize) {
    println!("[Response] {status} ({size} bytes)");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_shutdown() {
    println!("\nServer stopped.");
}
