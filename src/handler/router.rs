//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, dispatch to
//! the static file handler, and CORS injection on the way out. Every
//! response, error or not, passes through `cors::apply` exactly once.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, cors};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating what the static file handler needs
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub access_log: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let path = uri.path();
    let is_head = *method == Method::HEAD;

    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(method, uri, req.version());
    }

    let mut response = match *method {
        Method::GET | Method::HEAD => {
            let ctx = RequestContext {
                path,
                is_head,
                if_none_match: req
                    .headers()
                    .get("if-none-match")
                    .and_then(|v| v.to_str().ok())
                    .map(ToString::to_string),
                access_log,
            };
            static_files::serve(&ctx, &state.root).await
        }
        Method::OPTIONS => http::build_options_response(),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            http::build_405_response()
        }
    };

    // Request-method-independent: 404s and 405s get the headers too.
    cors::apply(response.headers_mut());

    Ok(response)
}
