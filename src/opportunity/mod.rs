pub mod scanner;
pub mod types;

pub use scanner::{AsyncOpportunityScanner, TriangularScanner};
pub use types::{ListingMarket, Opportunity, ScanOutcome, ScanParams};
