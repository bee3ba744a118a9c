//! Request handler module
//!
//! Routing dispatch plus static file serving against the configured root.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
