mod command;
mod config;
mod generators;
mod ledger;
mod state;

pub use command::{NumericField, OpenOrder, TradeCommand, TradeRequest, ValidationError};
pub use config::SimConfig;
pub use generators::PriceGenerator;
pub use ledger::{CloseOutcome, LedgerSnapshot, OpenOutcome, PositionLedger, TradeOutcome};
pub use state::{OpenPosition, Position, Side};
