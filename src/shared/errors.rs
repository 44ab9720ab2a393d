//! Error handling for the application

use thiserror::Error;

use crate::shared::types::AssetSymbol;

/// Market source errors.
///
/// Only the metadata listing reports these; a failed price lookup is
/// absorbed by the adapter and surfaces as a missing price instead.
#[derive(Error, Debug, Clone)]
pub enum SourceError {
    #[error("Market source unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed market source payload: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::Malformed(err.to_string())
        } else {
            SourceError::Unavailable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Malformed(err.to_string())
    }
}

/// A scan parameter outside its allowed range
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid parameter {field}: {reason}")]
pub struct ParamError {
    pub field: &'static str,
    pub reason: String,
}

impl ParamError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Fatal scan errors. All of them end the scan without a result.
#[derive(Error, Debug, Clone)]
pub enum ScanError {
    #[error(transparent)]
    InvalidParams(#[from] ParamError),

    #[error("Intermediate price unavailable for {base}{quote}")]
    IntermediatePriceUnavailable { base: AssetSymbol, quote: AssetSymbol },

    #[error(transparent)]
    SourceUnavailable(#[from] SourceError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid parameter {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl From<ParamError> for ConfigError {
    fn from(err: ParamError) -> Self {
        ConfigError::Invalid {
            field: err.field,
            reason: err.reason,
        }
    }
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_messages() {
        let err = ScanError::IntermediatePriceUnavailable {
            base: AssetSymbol::new("BNB"),
            quote: AssetSymbol::new("USDT"),
        };
        assert_eq!(err.to_string(), "Intermediate price unavailable for BNBUSDT");

        let err: ScanError = SourceError::Unavailable("connection refused".to_string()).into();
        assert_eq!(err.to_string(), "Market source unavailable: connection refused");

        let err: ScanError = ParamError::new("fee_rate", "must be in [0, 1), got 1").into();
        assert_eq!(err.to_string(), "Invalid parameter fee_rate: must be in [0, 1), got 1");
    }

    #[test]
    fn test_param_error_converts_to_config_error() {
        let err: ConfigError = ParamError::new("initial_capital", "must be positive").into();
        assert!(matches!(err, ConfigError::Invalid { field: "initial_capital", .. }));
    }

    #[test]
    fn test_malformed_json_maps_to_malformed() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: SourceError = json_err.into();
        assert!(matches!(err, SourceError::Malformed(_)));
    }
}
