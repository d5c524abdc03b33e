use core_sim::{LedgerSnapshot, OpenOutcome, Side};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum LedgerEvent {
    Connected {
        tick: u64,
        market_price: f64,
    },
    PriceTicked {
        tick: u64,
        market_price: f64,
    },
    PositionOpened {
        side: Side,
        size: f64,
        leverage: f64,
        entry_price: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        discarded_pnl: Option<f64>,
    },
    PositionClosed {
        realized_pnl: f64,
        balance: f64,
    },
}

impl LedgerEvent {
    pub fn connected(snapshot: &LedgerSnapshot) -> Self {
        Self::Connected {
            tick: snapshot.tick,
            market_price: snapshot.market_price,
        }
    }

    pub fn price_ticked(tick: u64, market_price: f64) -> Self {
        Self::PriceTicked { tick, market_price }
    }

    pub fn position_opened(outcome: &OpenOutcome) -> Self {
        Self::PositionOpened {
            side: outcome.position.side,
            size: outcome.position.size,
            leverage: outcome.position.leverage,
            entry_price: outcome.position.entry_price,
            discarded_pnl: outcome.replaced.map(|_| outcome.discarded_pnl),
        }
    }

    pub fn position_closed(realized_pnl: f64, balance: f64) -> Self {
        Self::PositionClosed {
            realized_pnl,
            balance,
        }
    }
}
