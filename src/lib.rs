//! triarb - triangular arbitrage scanner
//! Looks for quote -> intermediate -> coin -> quote loops on spot exchange REST prices

pub mod app;
pub mod config;
pub mod exchanges;
pub mod math;
pub mod opportunity;
pub mod report;
pub mod shared;

// Re-export main types for convenience
pub use exchanges::{BinanceClient, MarketSource};
pub use opportunity::{AsyncOpportunityScanner, Opportunity, ScanParams, TriangularScanner};
pub use report::ScanReport;
