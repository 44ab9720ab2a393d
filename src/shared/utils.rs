//! Utility functions and helpers

/// Generate unique ID
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Format a fee fraction as a percentage string, `0.001` -> `0.1%`
pub fn format_fee_pct(fee_rate: f64) -> String {
    format!("{}%", fee_rate * 100.0)
}
