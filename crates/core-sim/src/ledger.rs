//! Account balance, the single open position and the market price, kept
//! together so every derived figure is computed from one consistent state.
//!
//! `PositionLedger` does no locking of its own; callers that share it across
//! threads wrap the whole ledger in one lock.

use crate::{
    command::{OpenOrder, TradeCommand},
    config::SimConfig,
    state::{OpenPosition, Position},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerSnapshot {
    pub balance: f64,
    pub position: Position,
    pub market_price: f64,
    pub unrealized_pnl: f64,
    pub total_equity: f64,
    pub tick: u64,
}

/// Result of opening a position. When a position was already open it is
/// replaced without being realized: `replaced` holds it and `discarded_pnl`
/// the unrealized PnL that was dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenOutcome {
    pub position: OpenPosition,
    pub replaced: Option<OpenPosition>,
    pub discarded_pnl: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseOutcome {
    pub closed: Option<OpenPosition>,
    pub realized_pnl: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TradeOutcome {
    Opened(OpenOutcome),
    Closed(CloseOutcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionLedger {
    balance: f64,
    position: Position,
    market_price: f64,
    tick: u64,
}

impl PositionLedger {
    pub fn new(starting_balance: f64, starting_price: f64) -> Self {
        assert!(
            starting_balance.is_finite(),
            "starting_balance must be finite"
        );
        assert!(
            starting_price.is_finite() && starting_price > 0.0,
            "starting_price must be finite and positive"
        );

        Self {
            balance: starting_balance,
            position: Position::Flat,
            market_price: starting_price,
            tick: 0,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.starting_balance, config.starting_price)
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn market_price(&self) -> f64 {
        self.market_price
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Moves the price by one market tick. Only the price and the tick
    /// counter change.
    pub fn apply_tick(&mut self, multiplier: f64) -> f64 {
        self.market_price *= multiplier;
        self.tick += 1;
        self.market_price
    }

    pub fn unrealized_pnl(&self) -> f64 {
        self.position.pnl_at(self.market_price)
    }

    pub fn open_or_replace(&mut self, order: OpenOrder) -> OpenOutcome {
        let replaced = self.position.as_open().copied();
        let discarded_pnl = self.unrealized_pnl();
        let position = OpenPosition {
            side: order.side(),
            size: order.size(),
            leverage: order.leverage(),
            entry_price: self.market_price,
        };

        self.position = Position::Open(position);

        OpenOutcome {
            position,
            replaced,
            discarded_pnl,
        }
    }

    /// Realizes the open position's PnL into the balance and goes flat.
    /// Closing while flat realizes nothing.
    pub fn close(&mut self) -> CloseOutcome {
        let closed = self.position.as_open().copied();
        let realized_pnl = self.unrealized_pnl();

        self.balance += realized_pnl;
        self.position = Position::Flat;

        CloseOutcome {
            closed,
            realized_pnl,
            balance: self.balance,
        }
    }

    pub fn execute(&mut self, command: TradeCommand) -> TradeOutcome {
        match command {
            TradeCommand::Open(order) => TradeOutcome::Opened(self.open_or_replace(order)),
            TradeCommand::Close => TradeOutcome::Closed(self.close()),
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let unrealized_pnl = self.unrealized_pnl();

        LedgerSnapshot {
            balance: self.balance,
            position: self.position,
            market_price: self.market_price,
            unrealized_pnl,
            total_equity: self.balance + unrealized_pnl,
            tick: self.tick,
        }
    }
}

impl Default for PositionLedger {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}
