use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::exchanges::{MarketSource, TRADING_STATUS};
use crate::opportunity::scanner::{AsyncOpportunityScanner, RequestPacer};
use crate::opportunity::types::{LegQuotes, Opportunity, ScanOutcome, ScanParams, ScanStats};
use crate::shared::errors::ScanError;
use crate::shared::types::{AssetSymbol, Price};

pub const DEFAULT_PACING: Duration = Duration::from_millis(150);

/// Scans quote -> intermediate -> candidate -> quote paths and keeps the best one.
pub struct TriangularScanner {
    source: Arc<dyn MarketSource>,
    pacer: RequestPacer,
    concurrency: usize,
}

impl TriangularScanner {
    pub fn new(source: Arc<dyn MarketSource>) -> Self {
        Self {
            source,
            pacer: RequestPacer::new(DEFAULT_PACING),
            concurrency: 1,
        }
    }

    /// Minimum spacing between two candidate evaluations.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacer = RequestPacer::new(pacing);
        self
    }

    /// Number of candidates evaluated at once. Values below 1 are raised to 1.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    async fn evaluate_candidate(
        &self,
        candidate: AssetSymbol,
        intermediate_price: Price,
        params: &ScanParams,
    ) -> Option<Opportunity> {
        self.pacer.acquire().await;

        let candidate_intermediate = self
            .source
            .get_last_price(&candidate, &params.intermediate_asset)
            .await;
        let candidate_quote = self
            .source
            .get_last_price(&candidate, &params.quote_currency)
            .await;

        let (Some(candidate_intermediate), Some(candidate_quote)) =
            (candidate_intermediate, candidate_quote)
        else {
            debug!(
                "Skipping {}: no price for {}{} or {}{}",
                candidate, candidate, params.intermediate_asset, candidate, params.quote_currency
            );
            return None;
        };

        let quotes = LegQuotes::new(intermediate_price, candidate_intermediate, candidate_quote);
        let opportunity = Opportunity::evaluate(
            candidate,
            quotes,
            params.initial_capital,
            params.fee_rate,
        );
        debug!(
            "📊 {}: {} {} -> {} {} -> {} {} -> {} {} ({:.4}%)",
            opportunity.candidate,
            params.initial_capital,
            params.quote_currency,
            opportunity.intermediate_amount,
            params.intermediate_asset,
            opportunity.candidate_amount,
            opportunity.candidate,
            opportunity.final_amount,
            params.quote_currency,
            opportunity.profit_pct
        );
        Some(opportunity)
    }
}

/// Filters the listing down to the ordered, deduplicated candidate set.
pub fn build_candidate_set(listed: Vec<AssetSymbol>, params: &ScanParams) -> Vec<AssetSymbol> {
    let mut seen = HashSet::new();
    listed
        .into_iter()
        .filter(|asset| !asset.is_empty() && !params.is_excluded(asset))
        .filter(|asset| seen.insert(asset.clone()))
        .take(params.candidate_limit)
        .collect()
}

/// Replaces `best` only when `candidate` is strictly more profitable, so the first of equals wins.
pub fn keep_best(best: &mut Option<Opportunity>, candidate: Opportunity) {
    let replace = match best {
        Some(current) => candidate.profit_pct > current.profit_pct,
        None => true,
    };
    if replace {
        *best = Some(candidate);
    }
}

#[async_trait]
impl AsyncOpportunityScanner for TriangularScanner {
    async fn try_scan(&self, params: &ScanParams) -> Result<ScanOutcome, ScanError> {
        params.validate()?;
        let started = Instant::now();
        info!(
            "🔍 Starting scan: {} {} via {}, fee {} per leg",
            params.initial_capital, params.quote_currency, params.intermediate_asset, params.fee_rate
        );

        let intermediate_price = self
            .source
            .get_last_price(&params.intermediate_asset, &params.quote_currency)
            .await
            .ok_or_else(|| ScanError::IntermediatePriceUnavailable {
                base: params.intermediate_asset.clone(),
                quote: params.quote_currency.clone(),
            })?;
        info!("✅ {}/{} = {}", params.intermediate_asset, params.quote_currency, intermediate_price);

        let listed = self
            .source
            .list_base_assets(params.listing_quote(), TRADING_STATUS)
            .await?;
        let mut stats = ScanStats {
            listed: listed.len(),
            ..ScanStats::default()
        };

        let candidates = build_candidate_set(listed, params);
        stats.candidates = candidates.len();
        if candidates.is_empty() {
            info!("⚠️ No candidates left after exclusions");
            stats.elapsed = started.elapsed();
            return Ok(ScanOutcome { best: None, stats });
        }
        info!(
            "🔧 Evaluating {} candidates (concurrency {}, pacing {:?})",
            candidates.len(),
            self.concurrency,
            self.pacer.period()
        );

        // `buffered` yields in candidate order, so this loop is the only writer of `best`.
        let evaluations = stream::iter(candidates)
            .map(|candidate| self.evaluate_candidate(candidate, intermediate_price, params))
            .buffered(self.concurrency);
        futures::pin_mut!(evaluations);

        let mut best = None;
        while let Some(result) = evaluations.next().await {
            match result {
                Some(opportunity) => {
                    stats.evaluated += 1;
                    keep_best(&mut best, opportunity);
                }
                None => stats.skipped += 1,
            }
        }

        stats.elapsed = started.elapsed();
        match &best {
            Some(opportunity) => info!(
                "🎯 Best of {} evaluated: {} at {:.4}% ({}, {} skipped, {:?})",
                stats.evaluated,
                opportunity.candidate,
                opportunity.profit_pct,
                if opportunity.is_profitable() { "profitable" } else { "loss after fees" },
                stats.skipped,
                stats.elapsed
            ),
            None => info!("❌ No candidate had both prices ({} skipped)", stats.skipped),
        }

        Ok(ScanOutcome { best, stats })
    }
}
