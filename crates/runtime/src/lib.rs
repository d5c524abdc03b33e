pub mod events;
pub mod feed;
pub mod logging;
pub mod shared;

pub use events::LedgerEvent;
pub use feed::MarketFeed;
pub use shared::SharedLedger;
