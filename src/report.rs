// src/report.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{self, Write as _};

use crate::opportunity::types::{Opportunity, ScanOutcome, ScanParams, ScanStats};
use crate::shared::errors::ScanError;
use crate::shared::utils::{format_fee_pct, generate_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanStatus {
    Found,
    #[serde(rename = "none")]
    NotFound,
    Aborted,
}

#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub scan_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: ScanStatus,
    /// Set when the scan ended early
    pub reason: Option<String>,
    pub params: ScanParams,
    pub best: Option<Opportunity>,
    pub stats: Option<ScanStats>,
}

impl ScanReport {
    pub fn new(params: ScanParams, result: Result<ScanOutcome, ScanError>) -> Self {
        let (status, reason, best, stats) = match result {
            Ok(ScanOutcome { best: Some(best), stats }) => (ScanStatus::Found, None, Some(best), Some(stats)),
            Ok(ScanOutcome { best: None, stats }) => (ScanStatus::NotFound, None, None, Some(stats)),
            Err(e) => (ScanStatus::Aborted, Some(e.to_string()), None, None),
        };

        Self {
            scan_id: generate_id(),
            timestamp: Utc::now(),
            status,
            reason,
            params,
            best,
            stats,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn write_opportunity(&self, out: &mut String, best: &Opportunity) -> fmt::Result {
        let p = &self.params;
        let (quote, mid, coin) = (&p.quote_currency, &p.intermediate_asset, &best.candidate);

        writeln!(out, "⏳ Searching completed. Best opportunity identified.")?;
        writeln!(out)?;
        writeln!(out, "🏆 ARBITRAGE OPPORTUNITY DETECTED")?;
        writeln!(out, "────────────────────────────────")?;
        writeln!(out, "📊 Current Market Prices")?;
        writeln!(out, "------------------------")?;
        writeln!(out, "{:<16}: {}", format!("{mid}/{quote}"), best.quotes.intermediate)?;
        writeln!(out, "{:<16}: {}", format!("{coin}/{mid}"), best.quotes.candidate_intermediate)?;
        writeln!(out, "{:<16}: {}", format!("{coin}/{quote}"), best.quotes.candidate_quote)?;
        writeln!(out)?;
        writeln!(out, "1️⃣ Buy {mid} using {quote}")?;
        writeln!(out, "   {} {quote} → {} {mid}", best.initial_capital, best.intermediate_amount)?;
        writeln!(out)?;
        writeln!(out, "2️⃣ Buy {coin} using {mid}")?;
        writeln!(out, "   {} {mid} → {} {coin}", best.intermediate_amount, best.candidate_amount)?;
        writeln!(out)?;
        writeln!(out, "3️⃣ Sell {coin} back to {quote}")?;
        writeln!(out, "   {} {coin} → {} {quote}", best.candidate_amount, best.final_amount)?;
        writeln!(out)?;
        writeln!(out, "📈 Estimated Profit: {} %", best.profit_pct)?;
        writeln!(out, "⚠️ Theoretical calculation based on last price only")?;
        writeln!(out, "⚠️ Slippage, depth, and latency are NOT considered")?;
        writeln!(out, "⚠️ Educational purpose only")
    }
}

impl fmt::Display for ScanReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        writeln!(out, "🕒 Timestamp: {}", self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
        writeln!(out, "💰 Initial Capital: {} {}", self.params.initial_capital, self.params.quote_currency)?;
        writeln!(out, "💸 Trading Fee: {} per transaction", format_fee_pct(self.params.fee_rate))?;
        writeln!(out)?;

        match &self.best {
            Some(best) => self.write_opportunity(&mut out, best)?,
            None => {
                writeln!(out, "❌ No arbitrage opportunity found")?;
                if let Some(reason) = &self.reason {
                    writeln!(out, "   Scan aborted: {reason}")?;
                }
            }
        }

        f.write_str(&out)
    }
}
