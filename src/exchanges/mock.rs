//! In-memory market source for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::exchanges::MarketSource;
use crate::shared::errors::SourceError;
use crate::shared::types::{AssetSymbol, Price, TradingPair};

pub struct MockMarketSource {
    listing: Result<Vec<AssetSymbol>, SourceError>,
    prices: HashMap<String, f64>,
    price_requests: Mutex<Vec<String>>,
    listing_requests: AtomicUsize,
}

impl MockMarketSource {
    pub fn new(listing: &[&str]) -> Self {
        Self {
            listing: Ok(listing.iter().map(AssetSymbol::new).collect()),
            prices: HashMap::new(),
            price_requests: Mutex::new(Vec::new()),
            listing_requests: AtomicUsize::new(0),
        }
    }

    pub fn failing_listing(err: SourceError) -> Self {
        Self {
            listing: Err(err),
            ..Self::new(&[])
        }
    }

    /// Registers the price of `symbol` (e.g. `ETHBNB`).
    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_uppercase(), price);
        self
    }

    pub fn price_requests(&self) -> Vec<String> {
        self.price_requests.lock().unwrap().clone()
    }

    pub fn listing_requests(&self) -> usize {
        self.listing_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketSource for MockMarketSource {
    async fn list_base_assets(
        &self,
        _quote: &AssetSymbol,
        _status: &str,
    ) -> Result<Vec<AssetSymbol>, SourceError> {
        self.listing_requests.fetch_add(1, Ordering::SeqCst);
        self.listing.clone()
    }

    async fn get_last_price(&self, base: &AssetSymbol, quote: &AssetSymbol) -> Option<Price> {
        let symbol = TradingPair::new(base.clone(), quote.clone()).symbol();
        self.price_requests.lock().unwrap().push(symbol.clone());
        self.prices.get(&symbol).copied().and_then(Price::new)
    }
}
