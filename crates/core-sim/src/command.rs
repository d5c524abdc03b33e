use serde::Deserialize;
use thiserror::Error;

use crate::state::Side;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{field} must be numeric, got {value:?}")]
    NonNumeric { field: &'static str, value: String },
    #[error("size must be a finite number greater than 0, got {0}")]
    InvalidSize(f64),
    #[error("leverage must be a finite number of at least 1, got {0}")]
    InvalidLeverage(f64),
    #[error("size {size} at leverage {leverage} overflows the position exposure")]
    ExposureOverflow { size: f64, leverage: f64 },
    #[error("side must be LONG or SHORT, got {0:?}")]
    UnknownSide(String),
    #[error("action must be OPEN or CLOSE, got {0:?}")]
    UnknownAction(String),
}

/// Clients send quantities either as JSON numbers or as numeric strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Number(f64),
    Text(String),
}

impl NumericField {
    fn parse(&self, field: &'static str) -> Result<f64, ValidationError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ValidationError::NonNumeric {
                    field,
                    value: text.clone(),
                }),
        }
    }
}

/// Unvalidated trade request as it arrives from a client.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TradeRequest {
    pub size: Option<NumericField>,
    pub leverage: Option<NumericField>,
    pub side: Option<String>,
    pub action: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenOrder {
    side: Side,
    size: f64,
    leverage: f64,
}

impl OpenOrder {
    pub fn new(side: Side, size: f64, leverage: f64) -> Result<Self, ValidationError> {
        if !size.is_finite() || size <= 0.0 {
            return Err(ValidationError::InvalidSize(size));
        }
        if !leverage.is_finite() || leverage < 1.0 {
            return Err(ValidationError::InvalidLeverage(leverage));
        }
        if !(size * leverage).is_finite() {
            return Err(ValidationError::ExposureOverflow { size, leverage });
        }

        Ok(Self {
            side,
            size,
            leverage,
        })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn leverage(&self) -> f64 {
        self.leverage
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TradeCommand {
    Open(OpenOrder),
    Close,
}

impl TryFrom<TradeRequest> for TradeCommand {
    type Error = ValidationError;

    fn try_from(request: TradeRequest) -> Result<Self, Self::Error> {
        match request.action.as_deref().map(str::trim) {
            Some(action) if action.eq_ignore_ascii_case("close") => return Ok(Self::Close),
            Some(action) if action.eq_ignore_ascii_case("open") => {}
            None => {}
            Some(other) => return Err(ValidationError::UnknownAction(other.to_owned())),
        }

        let size = request
            .size
            .as_ref()
            .ok_or(ValidationError::MissingField("size"))?
            .parse("size")?;
        let leverage = request
            .leverage
            .as_ref()
            .ok_or(ValidationError::MissingField("leverage"))?
            .parse("leverage")?;
        let side_text = request
            .side
            .as_deref()
            .ok_or(ValidationError::MissingField("side"))?;
        let side = Side::parse(side_text.trim())
            .ok_or_else(|| ValidationError::UnknownSide(side_text.to_owned()))?;

        OpenOrder::new(side, size, leverage).map(Self::Open)
    }
}
