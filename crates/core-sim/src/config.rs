#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub starting_balance: f64,
    /// Reported alongside the account but never touched by trading.
    pub vault_balance: f64,
    pub starting_price: f64,
    /// Full width of the uniform per-tick return, so each tick moves the
    /// price by at most `tick_amplitude / 2` in either direction.
    pub tick_amplitude: f64,
    pub tick_interval_ms: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            starting_balance: 2_557_031.10,
            vault_balance: 150_000.0,
            starting_price: 2_500.0,
            tick_amplitude: 0.0006,
            tick_interval_ms: 2_000,
        }
    }
}
