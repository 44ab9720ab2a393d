pub mod api_clients;
pub mod types;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

use crate::shared::errors::SourceError;
use crate::shared::types::{AssetSymbol, Price};

pub use api_clients::binance_client::BinanceClient;

/// Status value of instruments that are open for trading.
pub const TRADING_STATUS: &str = "TRADING";

/// Market data source the scanner pulls prices and listings from.
#[async_trait]
pub trait MarketSource: Send + Sync {
    /// Base assets of all pairs quoted in `quote` whose status equals `status`.
    async fn list_base_assets(
        &self,
        quote: &AssetSymbol,
        status: &str,
    ) -> Result<Vec<AssetSymbol>, SourceError>;

    /// Last traded price of `base`/`quote`, or `None` when it cannot be fetched.
    async fn get_last_price(&self, base: &AssetSymbol, quote: &AssetSymbol) -> Option<Price>;
}
