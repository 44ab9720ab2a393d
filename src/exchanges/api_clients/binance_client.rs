use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::exchanges::types::{ExchangeInfo, TickerPrice};
use crate::exchanges::MarketSource;
use crate::shared::errors::SourceError;
use crate::shared::types::{AssetSymbol, Price, TradingPair};

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com/api/v3";

/// Binance spot REST client
pub struct BinanceClient {
    http_client: Client,
    base_url: String,
    price_timeout: Duration,
    metadata_timeout: Duration,
}

impl BinanceClient {
    pub fn new(
        base_url: impl Into<String>,
        price_timeout: Duration,
        metadata_timeout: Duration,
    ) -> Result<Self, SourceError> {
        let http_client = Client::builder()
            .user_agent(concat!("triarb/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            price_timeout,
            metadata_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_exchange_info(&self) -> Result<ExchangeInfo, SourceError> {
        let url = format!("{}/exchangeInfo", self.base_url);
        info!("🔍 Fetching exchange info from: {}", url);

        let response = self
            .http_client
            .get(&url)
            .timeout(self.metadata_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SourceError::Unavailable(format!(
                "exchangeInfo request failed with status: {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        ExchangeInfo::from_json(&body)
    }

    async fn fetch_price(&self, pair: &TradingPair) -> Result<Option<Price>, reqwest::Error> {
        let url = format!("{}/ticker/price", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("symbol", pair.symbol())])
            .timeout(self.price_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            debug!("Price request for {} returned status {}", pair, response.status());
            return Ok(None);
        }

        let body = response.text().await?;
        Ok(TickerPrice::parse_price(&body))
    }
}

#[async_trait]
impl MarketSource for BinanceClient {
    async fn list_base_assets(
        &self,
        quote: &AssetSymbol,
        status: &str,
    ) -> Result<Vec<AssetSymbol>, SourceError> {
        let info = self.fetch_exchange_info().await?;
        let assets = info.base_assets(quote, status);
        info!(
            "✅ {} of {} listed symbols are {} pairs with status {}",
            assets.len(),
            info.symbols.len(),
            quote,
            status
        );
        Ok(assets)
    }

    async fn get_last_price(&self, base: &AssetSymbol, quote: &AssetSymbol) -> Option<Price> {
        let pair = TradingPair::new(base.clone(), quote.clone());
        match self.fetch_price(&pair).await {
            Ok(Some(price)) => Some(price),
            Ok(None) => {
                debug!("No usable price for {}", pair);
                None
            }
            Err(e) => {
                if e.is_timeout() {
                    warn!("⚠️ Price request for {} timed out", pair);
                } else {
                    debug!("Price request for {} failed: {}", pair, e);
                }
                None
            }
        }
    }
}
