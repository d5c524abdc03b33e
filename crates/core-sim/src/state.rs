use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("long") {
            Some(Self::Long)
        } else if value.eq_ignore_ascii_case("short") {
            Some(Self::Short)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Long => "LONG",
            Self::Short => "SHORT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenPosition {
    pub side: Side,
    pub size: f64,
    pub leverage: f64,
    pub entry_price: f64,
}

impl OpenPosition {
    /// Leveraged PnL of this position marked at `market_price`.
    pub fn pnl_at(&self, market_price: f64) -> f64 {
        let price_delta = (market_price - self.entry_price) / self.entry_price;
        let raw_pnl = self.size * self.leverage * price_delta;

        match self.side {
            Side::Long => raw_pnl,
            Side::Short => -raw_pnl,
        }
    }
}

/// At most one position exists. `Flat` reports size 0, entry 0 and
/// leverage 1, so "no side" always coincides with a zero size and entry.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Position {
    #[default]
    Flat,
    Open(OpenPosition),
}

impl Position {
    pub fn side(&self) -> Option<Side> {
        match self {
            Self::Flat => None,
            Self::Open(open) => Some(open.side),
        }
    }

    pub fn size(&self) -> f64 {
        match self {
            Self::Flat => 0.0,
            Self::Open(open) => open.size,
        }
    }

    pub fn leverage(&self) -> f64 {
        match self {
            Self::Flat => 1.0,
            Self::Open(open) => open.leverage,
        }
    }

    pub fn entry_price(&self) -> f64 {
        match self {
            Self::Flat => 0.0,
            Self::Open(open) => open.entry_price,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn as_open(&self) -> Option<&OpenPosition> {
        match self {
            Self::Flat => None,
            Self::Open(open) => Some(open),
        }
    }

    pub fn pnl_at(&self, market_price: f64) -> f64 {
        self.as_open()
            .map_or(0.0, |open| open.pnl_at(market_price))
    }
}

#[cfg(test)]
mod tests {
    use super::{OpenPosition, Position, Side};

    fn open(side: Side) -> OpenPosition {
        OpenPosition {
            side,
            size: 10.0,
            leverage: 2.0,
            entry_price: 100.0,
        }
    }

    #[test]
    fn long_gains_when_price_rises() {
        assert_eq!(open(Side::Long).pnl_at(110.0), 2.0);
    }

    #[test]
    fn short_loses_when_price_rises() {
        assert_eq!(open(Side::Short).pnl_at(110.0), -2.0);
    }

    #[test]
    fn flat_position_has_zero_pnl_at_any_price() {
        for price in [0.01, 100.0, 2_500.0, 1e9] {
            assert_eq!(Position::Flat.pnl_at(price), 0.0);
        }
    }

    #[test]
    fn flat_position_reports_zeroed_fields() {
        let flat = Position::default();

        assert_eq!(flat.side(), None);
        assert_eq!(flat.size(), 0.0);
        assert_eq!(flat.entry_price(), 0.0);
        assert_eq!(flat.leverage(), 1.0);
        assert!(!flat.is_open());
    }

    #[test]
    fn side_parsing_ignores_case_and_rejects_unknown_values() {
        assert_eq!(Side::parse("LONG"), Some(Side::Long));
        assert_eq!(Side::parse("short"), Some(Side::Short));
        assert_eq!(Side::parse("sideways"), None);
        assert_eq!(Side::parse(""), None);
    }
}
