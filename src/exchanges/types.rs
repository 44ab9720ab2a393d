use serde::Deserialize;

use crate::shared::errors::SourceError;
use crate::shared::types::{AssetSymbol, Price};

/// `GET /exchangeInfo` response, only the fields the scanner needs
#[derive(Debug, Deserialize)]
pub struct ExchangeInfo {
    pub symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
pub struct SymbolInfo {
    #[serde(rename = "baseAsset")]
    pub base_asset: String,
    #[serde(rename = "quoteAsset")]
    pub quote_asset: String,
    pub status: String,
}

/// `GET /ticker/price?symbol=...` response
#[derive(Debug, Deserialize)]
pub struct TickerPrice {
    #[serde(default)]
    pub symbol: Option<String>,
    pub price: String,
}

impl ExchangeInfo {
    pub fn from_json(body: &str) -> Result<Self, SourceError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Base assets quoted in `quote` with the given status, in listing order.
    pub fn base_assets(&self, quote: &AssetSymbol, status: &str) -> Vec<AssetSymbol> {
        self.symbols
            .iter()
            .filter(|s| s.status == status && AssetSymbol::new(&s.quote_asset) == *quote)
            .map(|s| AssetSymbol::new(&s.base_asset))
            .collect()
    }
}

impl TickerPrice {
    /// `None` if the body is not a ticker or the price is not a positive number.
    pub fn parse_price(body: &str) -> Option<Price> {
        let ticker: TickerPrice = serde_json::from_str(body).ok()?;
        Price::parse(&ticker.price)
    }
}
