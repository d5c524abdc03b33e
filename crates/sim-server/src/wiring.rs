use api::AppState;
use axum::Router;
use core_sim::{PositionLedger, PriceGenerator};
use runtime::{MarketFeed, SharedLedger};

use crate::config::Config;

/// Builds the process-wide ledger once from configuration.
pub fn build_ledger(config: &Config) -> SharedLedger {
    SharedLedger::new(PositionLedger::from_config(&config.sim))
}

pub fn build_feed(config: &Config) -> MarketFeed {
    let generator = match config.feed_seed {
        Some(seed) => PriceGenerator::seeded(seed, config.tick_amplitude),
        None => PriceGenerator::new(config.tick_amplitude),
    };
    MarketFeed::new(generator, config.tick_interval)
}

pub fn build_app(ledger: SharedLedger, config: &Config) -> Router {
    let state = AppState::new(ledger, config.sim.vault_balance);
    api::app(state)
}
