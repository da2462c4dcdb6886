use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Monetary values in BRL.
pub type Money = Decimal;

/// Fractions (0.82 = 82%). Used for effectiveness factors, margins and
/// multipliers.
pub type Rate = Decimal;

/// Percentage points (18 = 18%). Used for tax burdens and ICMS rates.
pub type Pct = Decimal;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
    /// Version tag of the reference table set the result was computed with
    pub reference_data: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    reference_data: &str,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
            reference_data: reference_data.to_string(),
        },
    }
}

/// Midpoint of a closed range.
pub(crate) fn midpoint(min: Decimal, max: Decimal) -> Decimal {
    (min + max) / Decimal::TWO
}
