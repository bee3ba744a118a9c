use camserve::config::{AppState, Config};
use camserve::{logger, server};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let root = cfg.resolve_root();
    let addr = cfg.socket_addr()?;

    // Bind before printing anything URL-shaped: the banner and the browser
    // must show the port actually in use, which may be port+1.
    let (listener, port) = match server::listener::bind_with_fallback(addr) {
        Ok(bound) => bound,
        Err(e) => {
            logger::log_bind_error(&e);
            std::process::exit(1);
        }
    };

    logger::log_server_start(port, &root);

    if cfg.browser.open {
        server::browser::launch(&format!("http://localhost:{port}{}", cfg.browser.start_page));
    }

    let state = Arc::new(AppState::new(cfg, root));
    server::run(listener, state).await
}
