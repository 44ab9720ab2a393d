// src/math.rs
use crate::opportunity::types::LegQuotes;

/// Amounts held after each leg of quote -> intermediate -> candidate -> quote
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegAmounts {
    pub intermediate_amount: f64,
    pub candidate_amount: f64,
    pub final_amount: f64,
}

/// Apply a proportional fee to an amount
pub fn after_fee(amount: f64, fee_rate: f64) -> f64 {
    amount * (1.0 - fee_rate)
}

/// Walk the capital through the three legs, charging the fee on every conversion.
pub fn convert_three_legs(initial_capital: f64, fee_rate: f64, quotes: &LegQuotes) -> LegAmounts {
    // Step 1: quote -> intermediate
    let intermediate_amount = after_fee(initial_capital / quotes.intermediate.value(), fee_rate);
    // Step 2: intermediate -> candidate
    let candidate_amount = after_fee(intermediate_amount / quotes.candidate_intermediate.value(), fee_rate);
    // Step 3: candidate -> quote
    let final_amount = after_fee(candidate_amount * quotes.candidate_quote.value(), fee_rate);

    LegAmounts {
        intermediate_amount,
        candidate_amount,
        final_amount,
    }
}

/// Profit relative to the starting capital, in percent
pub fn profit_pct(initial_capital: f64, final_amount: f64) -> f64 {
    (final_amount - initial_capital) / initial_capital * 100.0
}
