use std::sync::Arc;

use core_sim::{LedgerSnapshot, PositionLedger, TradeCommand, TradeOutcome};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::events::LedgerEvent;

const EVENT_CAPACITY: usize = 256;

/// Cloneable handle to the process-wide ledger.
///
/// Balance, position and price sit behind a single mutex: ticks, trades and
/// snapshots each take it once, so no reader ever sees a price from one
/// instant paired with a balance or position from another.
#[derive(Clone, Debug)]
pub struct SharedLedger {
    inner: Arc<Mutex<PositionLedger>>,
    events_tx: broadcast::Sender<LedgerEvent>,
}

impl SharedLedger {
    pub fn new(ledger: PositionLedger) -> Self {
        let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Mutex::new(ledger)),
            events_tx,
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn tick(&self, multiplier: f64) -> f64 {
        let (tick, market_price) = {
            let mut ledger = self.inner.lock();
            let market_price = ledger.apply_tick(multiplier);
            (ledger.tick_count(), market_price)
        };

        debug!(tick, market_price, "market price ticked");
        let _ = self.publish(LedgerEvent::price_ticked(tick, market_price));
        market_price
    }

    pub fn execute(&self, command: TradeCommand) -> TradeOutcome {
        let outcome = self.inner.lock().execute(command);

        let event = match &outcome {
            TradeOutcome::Opened(opened) => {
                if let Some(replaced) = opened.replaced {
                    warn!(
                        previous_side = replaced.side.as_str(),
                        discarded_pnl = opened.discarded_pnl,
                        "open replaced a live position without realizing its pnl"
                    );
                }
                info!(
                    side = opened.position.side.as_str(),
                    size = opened.position.size,
                    leverage = opened.position.leverage,
                    entry_price = opened.position.entry_price,
                    "position opened"
                );
                Some(LedgerEvent::position_opened(opened))
            }
            TradeOutcome::Closed(closed) => {
                if closed.closed.is_some() {
                    info!(
                        realized_pnl = closed.realized_pnl,
                        balance = closed.balance,
                        "position closed"
                    );
                    Some(LedgerEvent::position_closed(
                        closed.realized_pnl,
                        closed.balance,
                    ))
                } else {
                    debug!("close requested with no open position");
                    None
                }
            }
        };
        if let Some(event) = event {
            let _ = self.publish(event);
        }

        outcome
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events_tx.subscribe()
    }

    /// Fails only when nobody is subscribed, which callers may ignore.
    pub fn publish(
        &self,
        event: LedgerEvent,
    ) -> Result<usize, broadcast::error::SendError<LedgerEvent>> {
        self.events_tx.send(event)
    }
}

impl Default for SharedLedger {
    fn default() -> Self {
        Self::new(PositionLedger::default())
    }
}
