// Configuration module
// Defaults mirror the observed behavior of the original camera test setup;
// an optional camserve.toml can override them. The environment is never read.

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default listening port; port+1 is tried once when this one is occupied.
pub const DEFAULT_PORT: u16 = 8080;

/// Pages listed in the startup banner. Not enforced, just the endpoints
/// expected to exist under the serving root.
pub const PAGES: &[(&str, &str)] = &[
    ("Test Camera", "/display2-test.html"),
    ("Conference Camera", "/display2-conference.html"),
    ("Original Display", "/display2.html"),
];

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub browser: BrowserConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Serving root; defaults to the directory containing the executable.
    pub root: Option<String>,
}

/// Browser auto-launch configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    /// Open the default browser after a successful bind.
    pub open: bool,
    /// Page the browser is pointed at, relative to the serving root.
    pub start_page: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

impl Config {
    /// Load configuration from the default `camserve.toml` (optional).
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("camserve")
    }

    /// Load configuration from the specified file path (without extension).
    /// Missing files are fine: every key has a default.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("browser.open", true)?
            .set_default("browser.start_page", "/display2-test.html")?
            .set_default("logging.access_log", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Resolve the serving root without touching the process working
    /// directory. Unset root means the directory holding the executable,
    /// so the pages travel with the binary regardless of invocation dir.
    pub fn resolve_root(&self) -> PathBuf {
        match &self.server.root {
            Some(root) => PathBuf::from(root),
            None => std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Immutable per-process state shared across request handlers.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    pub root: PathBuf,
}

impl AppState {
    #[must_use]
    pub fn new(config: Config, root: PathBuf) -> Self {
        Self { config, root }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_config_file() {
        let cfg = Config::load_from("no-such-config-file").expect("defaults should load");
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, DEFAULT_PORT);
        assert!(cfg.server.root.is_none());
        assert!(cfg.browser.open);
        assert_eq!(cfg.browser.start_page, "/display2-test.html");
        assert!(cfg.logging.access_log);
    }

    #[test]
    fn socket_addr_from_defaults() {
        let cfg = Config::load_from("no-such-config-file").unwrap();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn explicit_root_wins_over_exe_dir() {
        let mut cfg = Config::load_from("no-such-config-file").unwrap();
        cfg.server.root = Some("/srv/pages".to_string());
        assert_eq!(cfg.resolve_root(), PathBuf::from("/srv/pages"));
    }

    #[test]
    fn banner_pages_use_known_paths() {
        let paths: Vec<&str> = PAGES.iter().map(|(_, p)| *p).collect();
        assert_eq!(
            paths,
            ["/display2-test.html", "/display2-conference.html", "/display2.html"]
        );
    }
}
