use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::math::{self, LegAmounts};
use crate::shared::errors::ParamError;
use crate::shared::types::{AssetSymbol, Price};

pub const DEFAULT_INITIAL_CAPITAL: f64 = 100.0;
pub const DEFAULT_FEE_RATE: f64 = 0.001;
pub const DEFAULT_QUOTE_CURRENCY: &str = "USDT";
pub const DEFAULT_INTERMEDIATE_ASSET: &str = "BNB";
pub const DEFAULT_CANDIDATE_LIMIT: usize = 40;
pub const DEFAULT_STABLE_ALIASES: [&str; 2] = ["BUSD", "USDC"];

/// Which listing the candidate coins are taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingMarket {
    /// Pairs quoted in the quote currency
    #[default]
    Quote,
    /// Pairs quoted in the intermediate asset
    Intermediate,
}

/// Everything one scan needs
#[derive(Debug, Clone, Serialize)]
pub struct ScanParams {
    pub initial_capital: f64,
    pub fee_rate: f64,
    pub quote_currency: AssetSymbol,
    pub intermediate_asset: AssetSymbol,
    pub candidate_limit: usize,
    pub stable_aliases: Vec<AssetSymbol>,
    pub listing_market: ListingMarket,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            fee_rate: DEFAULT_FEE_RATE,
            quote_currency: AssetSymbol::new(DEFAULT_QUOTE_CURRENCY),
            intermediate_asset: AssetSymbol::new(DEFAULT_INTERMEDIATE_ASSET),
            candidate_limit: DEFAULT_CANDIDATE_LIMIT,
            stable_aliases: DEFAULT_STABLE_ALIASES.iter().map(AssetSymbol::new).collect(),
            listing_market: ListingMarket::Quote,
        }
    }
}

impl ScanParams {
    /// Rejects values that would make the leg amounts or the profit meaningless.
    pub fn validate(&self) -> Result<(), ParamError> {
        if !(self.initial_capital.is_finite() && self.initial_capital > 0.0) {
            return Err(ParamError::new(
                "initial_capital",
                format!("must be a positive number, got {}", self.initial_capital),
            ));
        }
        if !(0.0..1.0).contains(&self.fee_rate) {
            return Err(ParamError::new(
                "fee_rate",
                format!("must be in [0, 1), got {}", self.fee_rate),
            ));
        }
        if self.quote_currency.is_empty() {
            return Err(ParamError::new("quote_currency", "must not be empty"));
        }
        if self.intermediate_asset.is_empty() {
            return Err(ParamError::new("intermediate_asset", "must not be empty"));
        }
        if self.quote_currency == self.intermediate_asset {
            return Err(ParamError::new(
                "intermediate_asset",
                "must differ from the quote currency",
            ));
        }
        Ok(())
    }

    /// Quote asset used to list candidate coins
    pub fn listing_quote(&self) -> &AssetSymbol {
        match self.listing_market {
            ListingMarket::Quote => &self.quote_currency,
            ListingMarket::Intermediate => &self.intermediate_asset,
        }
    }

    /// Whether `asset` may never be a candidate
    pub fn is_excluded(&self, asset: &AssetSymbol) -> bool {
        *asset == self.quote_currency
            || *asset == self.intermediate_asset
            || self.stable_aliases.contains(asset)
    }
}

/// Prices for the three legs of one candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegQuotes {
    /// intermediate priced in quote (P0)
    pub intermediate: Price,
    /// candidate priced in intermediate (P1)
    pub candidate_intermediate: Price,
    /// candidate priced in quote (P2)
    pub candidate_quote: Price,
}

impl LegQuotes {
    pub fn new(intermediate: Price, candidate_intermediate: Price, candidate_quote: Price) -> Self {
        Self {
            intermediate,
            candidate_intermediate,
            candidate_quote,
        }
    }
}

/// Evaluated three-leg path for one candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Opportunity {
    pub candidate: AssetSymbol,
    pub quotes: LegQuotes,
    pub initial_capital: f64,
    pub intermediate_amount: f64,
    pub candidate_amount: f64,
    pub final_amount: f64,
    pub profit_pct: f64,
}

impl Opportunity {
    pub fn evaluate(candidate: AssetSymbol, quotes: LegQuotes, initial_capital: f64, fee_rate: f64) -> Self {
        let LegAmounts {
            intermediate_amount,
            candidate_amount,
            final_amount,
        } = math::convert_three_legs(initial_capital, fee_rate, &quotes);

        Self {
            candidate,
            quotes,
            initial_capital,
            intermediate_amount,
            candidate_amount,
            final_amount,
            profit_pct: math::profit_pct(initial_capital, final_amount),
        }
    }

    pub fn is_profitable(&self) -> bool {
        self.profit_pct > 0.0
    }
}

/// Counters collected while scanning
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    pub listed: usize,
    pub candidates: usize,
    pub evaluated: usize,
    pub skipped: usize,
    #[serde(with = "duration_ms")]
    pub elapsed: Duration,
}

/// Result of a scan that ran to completion
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanOutcome {
    pub best: Option<Opportunity>,
    pub stats: ScanStats,
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}
