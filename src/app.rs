// src/app.rs
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::config::Config;
use crate::exchanges::BinanceClient;
use crate::opportunity::scanner::{AsyncOpportunityScanner, TriangularScanner};
use crate::opportunity::types::{ListingMarket, ScanParams};
use crate::report::ScanReport;
use crate::shared::errors::ConfigError;
use crate::shared::types::AssetSymbol;

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub base_url: String,
    pub price_timeout: Duration,
    pub metadata_timeout: Duration,

    pub initial_capital: f64,
    pub fee_rate: f64,
    pub quote_currency: String,
    pub intermediate_asset: String,
    pub candidate_limit: usize,
    pub stable_aliases: Vec<String>,
    pub listing_market: ListingMarket,

    pub concurrency: usize,
    pub pacing: Duration,

    pub json_output: bool,
    pub repeat_every: Option<Duration>,
}

impl AppCfg {
    pub fn from_config(cfg: Config) -> Self {
        Self {
            base_url: cfg.exchange.base_url,
            price_timeout: Duration::from_secs(cfg.exchange.price_timeout_secs),
            metadata_timeout: Duration::from_secs(cfg.exchange.metadata_timeout_secs),
            initial_capital: cfg.trade.initial_capital,
            fee_rate: cfg.trade.fee_rate,
            quote_currency: cfg.trade.quote_currency,
            intermediate_asset: cfg.trade.intermediate_asset,
            candidate_limit: cfg.scan.candidate_limit,
            stable_aliases: cfg.scan.stable_aliases,
            listing_market: cfg.scan.listing_market,
            concurrency: cfg.scan.concurrency,
            pacing: Duration::from_millis(cfg.scan.pacing_ms),
            json_output: false,
            repeat_every: None,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scan_params().validate()?;
        if self.concurrency == 0 {
            return Err(ConfigError::invalid("concurrency", "must be at least 1"));
        }
        if self.price_timeout.is_zero() || self.metadata_timeout.is_zero() {
            return Err(ConfigError::invalid("timeout", "request timeouts must be non-zero"));
        }
        if matches!(self.repeat_every, Some(d) if d.is_zero()) {
            return Err(ConfigError::invalid("repeat_secs", "must be at least 1"));
        }
        Ok(())
    }

    pub fn scan_params(&self) -> ScanParams {
        ScanParams {
            initial_capital: self.initial_capital,
            fee_rate: self.fee_rate,
            quote_currency: AssetSymbol::new(&self.quote_currency),
            intermediate_asset: AssetSymbol::new(&self.intermediate_asset),
            candidate_limit: self.candidate_limit,
            stable_aliases: self.stable_aliases.iter().map(AssetSymbol::new).collect(),
            listing_market: self.listing_market,
        }
    }
}

impl Default for AppCfg {
    fn default() -> Self {
        Self::from_config(Config::default())
    }
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    app_cfg.validate().context("invalid configuration")?;
    info!("Starting triangular arbitrage scanner");
    info!("Configuration: {:?}", app_cfg);

    let client = BinanceClient::new(
        app_cfg.base_url.clone(),
        app_cfg.price_timeout,
        app_cfg.metadata_timeout,
    )
    .context("failed to build HTTP client")?;
    info!("Using market source {}", client.base_url());

    let scanner = TriangularScanner::new(Arc::new(client))
        .with_concurrency(app_cfg.concurrency)
        .with_pacing(app_cfg.pacing);

    match app_cfg.repeat_every {
        Some(period) => run_polling_mode(&app_cfg, &scanner, period).await,
        None => run_once(&app_cfg, &scanner).await,
    }
}

async fn run_once(app_cfg: &AppCfg, scanner: &impl AsyncOpportunityScanner) -> Result<()> {
    let params = app_cfg.scan_params();
    let result = scanner.try_scan(&params).await;
    if let Err(e) = &result {
        error!("❌ Scan aborted: {}", e);
    }

    let report = ScanReport::new(params, result);
    if app_cfg.json_output {
        println!("{}", report.to_json().context("failed to serialize report")?);
    } else {
        println!("{report}");
    }
    Ok(())
}

async fn run_polling_mode(
    app_cfg: &AppCfg,
    scanner: &impl AsyncOpportunityScanner,
    period: Duration,
) -> Result<()> {
    info!("Running in polling mode, every {:?}", period);

    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        run_once(app_cfg, scanner).await?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cfg_is_valid() {
        let cfg = AppCfg::default();
        assert!(cfg.validate().is_ok());

        let params = cfg.scan_params();
        assert_eq!(params.initial_capital, 100.0);
        assert_eq!(params.quote_currency.as_str(), "USDT");
        assert_eq!(params.intermediate_asset.as_str(), "BNB");
        assert_eq!(params.stable_aliases.len(), 2);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad: Vec<AppCfg> = vec![
            AppCfg { initial_capital: 0.0, ..AppCfg::default() },
            AppCfg { initial_capital: f64::NAN, ..AppCfg::default() },
            AppCfg { fee_rate: 1.0, ..AppCfg::default() },
            AppCfg { fee_rate: -0.1, ..AppCfg::default() },
            AppCfg { intermediate_asset: "usdt".to_string(), ..AppCfg::default() },
            AppCfg { quote_currency: " ".to_string(), ..AppCfg::default() },
            AppCfg { intermediate_asset: String::new(), ..AppCfg::default() },
            AppCfg { concurrency: 0, ..AppCfg::default() },
            AppCfg { price_timeout: Duration::ZERO, ..AppCfg::default() },
            AppCfg { repeat_every: Some(Duration::ZERO), ..AppCfg::default() },
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(ConfigError::Invalid { .. })),
                "expected invalid: {cfg:?}"
            );
        }
    }

    #[test]
    fn test_validate_reports_the_scan_param_field() {
        let cfg = AppCfg { initial_capital: 0.0, ..AppCfg::default() };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Invalid { field: "initial_capital", .. })
        ));
    }

    #[test]
    fn test_zero_fee_is_valid() {
        let cfg = AppCfg { fee_rate: 0.0, ..AppCfg::default() };
        assert!(cfg.validate().is_ok());
    }

    #[tokio::test]
    async fn test_run_once_reports_without_failing_when_source_is_down() {
        use crate::exchanges::mock::MockMarketSource;
        use crate::shared::errors::SourceError;

        let source = Arc::new(MockMarketSource::failing_listing(SourceError::Unavailable(
            "offline".to_string(),
        )));
        let scanner = TriangularScanner::new(source).with_pacing(Duration::ZERO);

        assert!(run_once(&AppCfg::default(), &scanner).await.is_ok());
    }
}
