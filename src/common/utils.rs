// src/common/utils.rs
use crate::common::EngineError;

// Parse a string to a f64, return an EngineError if the parsing fails
pub fn parse_f64(value: &str, field_name: &str) -> Result<f64, EngineError> {
    value
        .parse::<f64>()
        .map_err(|_| EngineError::ApiError(format!("Invalid {} format", field_name)))
}

// get timestamp in milliseconds
pub fn get_timestamp_millis() -> u64 {
    chrono::Utc::now()
        .timestamp_millis()
        .try_into()
        .unwrap_or(0)
}

/// Number of decimal places in an increment string, e.g. "0.00001" → 5, "1" → 0.
/// Venues that publish increments instead of precisions go through this.
pub fn decimal_places(increment: &str) -> u32 {
    match increment.split_once('.') {
        Some((_, frac)) => frac.trim_end_matches('0').len() as u32,
        None => 0,
    }
}

/// Normalize a venue asset code to its common form so the same logical pair
/// groups across venues. Kraken prefixes fiat with Z and crypto with X, and
/// calls Bitcoin XBT.
pub fn normalize_asset_code(code: &str) -> String {
    let upper = code.to_uppercase();
    let stripped = if upper.len() == 4 && (upper.starts_with('X') || upper.starts_with('Z')) {
        &upper[1..]
    } else {
        upper.as_str()
    };
    match stripped {
        "XBT" => "BTC".to_string(),
        other => other.to_string(),
    }
}
