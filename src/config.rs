use serde::Deserialize;
use std::{fs, path::Path};

use crate::exchanges::api_clients::DEFAULT_BASE_URL;
use crate::opportunity::types::{
    ListingMarket, DEFAULT_CANDIDATE_LIMIT, DEFAULT_FEE_RATE, DEFAULT_INITIAL_CAPITAL,
    DEFAULT_INTERMEDIATE_ASSET, DEFAULT_QUOTE_CURRENCY, DEFAULT_STABLE_ALIASES,
};
use crate::shared::errors::ConfigError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExchangeCfg {
    pub base_url: String,
    pub price_timeout_secs: u64,
    pub metadata_timeout_secs: u64,
}

impl Default for ExchangeCfg {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            price_timeout_secs: 5,
            metadata_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TradeCfg {
    pub initial_capital: f64,
    pub fee_rate: f64,
    pub quote_currency: String,
    pub intermediate_asset: String,
}

impl Default for TradeCfg {
    fn default() -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            fee_rate: DEFAULT_FEE_RATE,
            quote_currency: DEFAULT_QUOTE_CURRENCY.to_string(),
            intermediate_asset: DEFAULT_INTERMEDIATE_ASSET.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanCfg {
    pub candidate_limit: usize,
    pub stable_aliases: Vec<String>,
    pub listing_market: ListingMarket,
    pub concurrency: usize,
    pub pacing_ms: u64,
}

impl Default for ScanCfg {
    fn default() -> Self {
        Self {
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            stable_aliases: DEFAULT_STABLE_ALIASES.iter().map(|s| s.to_string()).collect(),
            listing_market: ListingMarket::Quote,
            concurrency: 1,
            pacing_ms: 150,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub exchange: ExchangeCfg,
    pub trade: TradeCfg,
    pub scan: ScanCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.exchange.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.exchange.price_timeout_secs, 5);
        assert_eq!(cfg.trade.initial_capital, 100.0);
        assert_eq!(cfg.trade.fee_rate, 0.001);
        assert_eq!(cfg.trade.quote_currency, "USDT");
        assert_eq!(cfg.trade.intermediate_asset, "BNB");
        assert_eq!(cfg.scan.candidate_limit, 40);
        assert_eq!(cfg.scan.stable_aliases, vec!["BUSD", "USDC"]);
        assert_eq!(cfg.scan.listing_market, ListingMarket::Quote);
        assert_eq!(cfg.scan.pacing_ms, 150);
    }

    #[test]
    fn test_partial_config() {
        let cfg = Config::from_toml(
            r#"
            [trade]
            initial_capital = 250.0
            intermediate_asset = "ETH"

            [scan]
            listing_market = "intermediate"
            concurrency = 4
            stable_aliases = ["FDUSD"]
            "#,
        )
        .unwrap();

        assert_eq!(cfg.trade.initial_capital, 250.0);
        assert_eq!(cfg.trade.fee_rate, 0.001);
        assert_eq!(cfg.trade.intermediate_asset, "ETH");
        assert_eq!(cfg.scan.listing_market, ListingMarket::Intermediate);
        assert_eq!(cfg.scan.concurrency, 4);
        assert_eq!(cfg.scan.stable_aliases, vec!["FDUSD"]);
        assert_eq!(cfg.scan.candidate_limit, 40);
    }

    #[test]
    fn test_bad_config() {
        assert!(matches!(
            Config::from_toml("[trade]\ninitial_capital = \"lots\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_file("/nonexistent/Config.toml"),
            Err(ConfigError::Read { .. })
        ));
    }
}
