mod config;
mod wiring;

use std::error::Error;

use runtime::logging::{init_tracing, DEFAULT_LOG_FILTER};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    init_tracing(DEFAULT_LOG_FILTER)?;

    let config = config::Config::from_env()?;
    let ledger = wiring::build_ledger(&config);
    let _feed = wiring::build_feed(&config).spawn(ledger.clone());

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(addr = %config.listen_addr, "sim server listening");

    axum::serve(listener, wiring::build_app(ledger, &config)).await?;
    Ok(())
}
