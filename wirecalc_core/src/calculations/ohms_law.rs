//! # Ohm's Law
//!
//! Resistance and power of a resistive load from a measured voltage and
//! current: `R = U / I`, `P = U · I`.
//!
//! ## Example
//!
//! ```rust
//! use wirecalc_core::calculations::ohms_law::{calculate, OhmsLawInput};
//!
//! let result = calculate(&OhmsLawInput::new(230.0, 10.0)).unwrap();
//! assert_eq!(result.resistance_ohms, 23.0);
//! assert_eq!(result.power_w, 2300.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_finite, CalcError, CalcResult};
use crate::units::{Amps, Ohms, Volts, Watts};

/// Measured voltage and current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhmsLawInput {
    /// User label
    #[serde(default)]
    pub label: String,

    /// Voltage across the load (V)
    pub voltage_v: f64,

    /// Current through the load (A)
    pub current_a: f64,
}

impl OhmsLawInput {
    pub fn new(voltage_v: f64, current_a: f64) -> Self {
        OhmsLawInput {
            label: String::new(),
            voltage_v,
            current_a,
        }
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_finite("voltage_v", self.voltage_v)?;
        require_finite("current_a", self.current_a)?;
        if self.current_a == 0.0 {
            return Err(CalcError::invalid_input(
                "current_a",
                self.current_a.to_string(),
                "Current cannot be zero",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhmsLawResult {
    /// R = U / I (Ω)
    pub resistance_ohms: f64,
    /// P = U · I (W)
    pub power_w: f64,
}

impl OhmsLawResult {
    pub fn summary(&self) -> String {
        format!("Result: {:.2} Ω", self.resistance_ohms)
    }
}

pub fn calculate(input: &OhmsLawInput) -> CalcResult<OhmsLawResult> {
    input.validate()?;

    let volts = Volts(input.voltage_v);
    let amps = Amps(input.current_a);
    let resistance = Ohms(volts.0 / amps.0);
    let power = Watts(volts.0 * amps.0);

    debug!(resistance_ohms = resistance.0, power_w = power.0, "applied ohm's law");

    Ok(OhmsLawResult {
        resistance_ohms: resistance.value(),
        power_w: power.value(),
    })
}
