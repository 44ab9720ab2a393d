use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use triarb::app::{self, AppCfg};
use triarb::config::Config;
use triarb::opportunity::ListingMarket;

#[derive(Parser, Debug)]
#[command(version, about = "Triangular arbitrage scanner: quote -> intermediate -> coin -> quote")]
struct Args {
    /// Path to config file (optional)
    #[arg(long)]
    config: Option<String>,

    /// Starting capital in the quote currency
    #[arg(long)]
    capital: Option<f64>,

    /// Fee charged on every conversion, as a fraction (0.001 = 0.1%)
    #[arg(long)]
    fee_rate: Option<f64>,

    /// Quote currency the capital is held in
    #[arg(long)]
    quote: Option<String>,

    /// Intermediate asset of the path
    #[arg(long)]
    intermediate: Option<String>,

    /// Maximum number of candidate coins to evaluate
    #[arg(long)]
    limit: Option<usize>,

    /// Stable-coin aliases to exclude (comma-separated)
    #[arg(long)]
    exclude: Option<String>,

    /// List candidates from pairs quoted in the intermediate asset instead of the quote currency
    #[arg(long)]
    list_by_intermediate: bool,

    /// Candidates evaluated concurrently
    #[arg(long)]
    concurrency: Option<usize>,

    /// Minimum delay between candidate evaluations in milliseconds
    #[arg(long)]
    pacing_ms: Option<u64>,

    /// Exchange REST base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Rescan every N seconds instead of exiting after one scan
    #[arg(long)]
    repeat_secs: Option<u64>,
}

impl Args {
    /// CLI has priority over the config file, which has priority over defaults.
    fn into_app_cfg(self) -> Result<AppCfg> {
        let base_config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        let mut app_cfg = AppCfg::from_config(base_config);

        if let Some(capital) = self.capital {
            app_cfg.initial_capital = capital;
        }
        if let Some(fee_rate) = self.fee_rate {
            app_cfg.fee_rate = fee_rate;
        }
        if let Some(quote) = self.quote {
            app_cfg.quote_currency = quote;
        }
        if let Some(intermediate) = self.intermediate {
            app_cfg.intermediate_asset = intermediate;
        }
        if let Some(limit) = self.limit {
            app_cfg.candidate_limit = limit;
        }
        if let Some(exclude) = self.exclude {
            app_cfg.stable_aliases = exclude
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if self.list_by_intermediate {
            app_cfg.listing_market = ListingMarket::Intermediate;
        }
        if let Some(concurrency) = self.concurrency {
            app_cfg.concurrency = concurrency;
        }
        if let Some(pacing_ms) = self.pacing_ms {
            app_cfg.pacing = Duration::from_millis(pacing_ms);
        }
        if let Some(base_url) = self.base_url {
            app_cfg.base_url = base_url;
        }
        app_cfg.json_output = self.json;
        app_cfg.repeat_every = self.repeat_secs.map(Duration::from_secs);

        Ok(app_cfg)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the report on stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    app::run(args.into_app_cfg()?).await
}
