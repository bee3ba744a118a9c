//! HTTP protocol layer module
//!
//! Protocol-level building blocks shared by the request handlers:
//! CORS injection, MIME lookup, conditional requests, response builders.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_304_response, build_404_response, build_405_response, build_html_response,
    build_options_response, build_redirect_response,
};
