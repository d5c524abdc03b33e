use std::time::Duration;

use core_sim::PriceGenerator;
use tokio::{
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tracing::info;

use crate::shared::SharedLedger;

/// Background task that moves the shared market price once per period for
/// as long as the runtime lives.
#[derive(Debug)]
pub struct MarketFeed {
    generator: PriceGenerator,
    period: Duration,
}

impl MarketFeed {
    pub fn new(generator: PriceGenerator, period: Duration) -> Self {
        assert!(!period.is_zero(), "feed period must be non-zero");
        Self { generator, period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn spawn(self, ledger: SharedLedger) -> JoinHandle<()> {
        tokio::spawn(self.run(ledger))
    }

    async fn run(mut self, ledger: SharedLedger) {
        info!(
            period = ?self.period,
            amplitude = self.generator.amplitude(),
            "market feed started"
        );

        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            ledger.tick(self.generator.next_multiplier());
        }
    }
}
