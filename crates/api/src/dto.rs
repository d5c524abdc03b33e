use core_sim::{LedgerSnapshot, Position, Side};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDto {
    pub size: f64,
    pub entry: f64,
    pub leverage: f64,
    pub side: Option<Side>,
}

impl From<Position> for PositionDto {
    fn from(position: Position) -> Self {
        Self {
            size: position.size(),
            entry: position.entry_price(),
            leverage: position.leverage(),
            side: position.side(),
        }
    }
}

/// Account view polled by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PulseResponse {
    pub balance: f64,
    pub vault_balance: f64,
    pub active_position: PositionDto,
    /// Trade history is not recorded; always empty.
    pub history: Vec<serde_json::Value>,
    pub market_price: String,
    pub total_equity: f64,
    pub unrealized_pnl: f64,
}

impl PulseResponse {
    pub fn new(snapshot: LedgerSnapshot, vault_balance: f64) -> Self {
        Self {
            balance: snapshot.balance,
            vault_balance,
            active_position: snapshot.position.into(),
            history: Vec::new(),
            market_price: format!("{:.2}", snapshot.market_price),
            total_equity: snapshot.total_equity,
            unrealized_pnl: snapshot.unrealized_pnl,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeResponse {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
