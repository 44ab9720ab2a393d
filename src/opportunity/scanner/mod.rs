pub mod pacer;
pub mod triangular_scanner;

pub use pacer::RequestPacer;
pub use triangular_scanner::TriangularScanner;

use async_trait::async_trait;
use tracing::warn;

use crate::opportunity::types::{Opportunity, ScanOutcome, ScanParams};
use crate::shared::errors::ScanError;

#[async_trait]
pub trait AsyncOpportunityScanner: Send + Sync {
    /// Runs one scan, keeping the reason a scan was aborted.
    async fn try_scan(&self, params: &ScanParams) -> Result<ScanOutcome, ScanError>;

    /// Best opportunity of one scan. Aborted scans are logged and yield `None`.
    async fn scan(&self, params: &ScanParams) -> Option<Opportunity> {
        match self.try_scan(params).await {
            Ok(outcome) => outcome.best,
            Err(e) => {
                warn!("❌ Scan aborted: {}", e);
                None
            }
        }
    }
}
