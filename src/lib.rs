//! camserve - local static-file server with permissive CORS
//!
//! Browsers only expose `getUserMedia` camera access in HTTP(S) contexts,
//! so display pages cannot be tested from `file://` URLs. This crate serves
//! a directory of HTML/JS pages over plain HTTP and attaches permissive
//! CORS headers to every response, successful or not.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
