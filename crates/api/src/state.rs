use core_sim::{LedgerSnapshot, SimConfig, TradeCommand, TradeOutcome};
use runtime::{LedgerEvent, SharedLedger};
use tokio::sync::broadcast;

#[derive(Clone, Debug)]
pub struct AppState {
    ledger: SharedLedger,
    vault_balance: f64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(SharedLedger::default(), SimConfig::default().vault_balance)
    }
}

impl AppState {
    pub fn new(ledger: SharedLedger, vault_balance: f64) -> Self {
        Self {
            ledger,
            vault_balance,
        }
    }

    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    pub fn vault_balance(&self) -> f64 {
        self.vault_balance
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    pub fn execute(&self, command: TradeCommand) -> TradeOutcome {
        self.ledger.execute(command)
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<LedgerEvent> {
        self.ledger.subscribe_events()
    }
}
