// Browser launch module
// Post-bind hook: points the default browser at the test page. Explicitly
// invoked after a successful bind so automated environments can disable it
// through config, and the URL always carries the port actually bound.

use crate::logger;

/// Open the host's default browser at `url`. Failure is a warning, never
/// fatal: the operator can still navigate manually.
pub fn launch(url: &str) {
    if let Err(e) = open::that(url) {
        logger::log_warning(&format!(
            "Failed to open browser: {e}. Please navigate to {url} manually."
        ));
    }
}
