//! # Form Input Parsing
//!
//! Lenient number parsing for values typed by a user. A decimal comma is
//! accepted in place of a decimal point, so `"2,5"` and `"2.5"` both parse
//! to 2.5.
//!
//! ```rust
//! use wirecalc_core::parsing::parse_decimal;
//!
//! assert_eq!(parse_decimal("length_m", " 12,5 ").unwrap(), 12.5);
//! assert!(parse_decimal("length_m", "abc").is_err());
//! ```

use tracing::warn;

use crate::errors::{CalcError, CalcResult};

/// Parse a user-entered decimal number, naming `field` in the error.
pub fn parse_decimal(field: &str, text: &str) -> CalcResult<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CalcError::invalid_input(field, text, "A value is required"));
    }

    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(CalcError::invalid_input(
            field,
            text,
            "Value must be a finite number",
        )),
        Err(_) => {
            warn!(field, input = text, "rejected non-numeric input");
            Err(CalcError::invalid_input(
                field,
                text,
                "Please enter a valid number",
            ))
        }
    }
}
