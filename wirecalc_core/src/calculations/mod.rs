//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` / `*Request` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - a pure function from input to `CalcResult<*Result>`
//!
//! ## Available Calculations
//!
//! - [`cable`] - Cable cross-section, power loss and standard gauge
//! - [`ohms_law`] - Resistance and power from voltage and current
//! - [`speaker_delay`] - Loudspeaker time-alignment delay

pub mod cable;
pub mod ohms_law;
pub mod speaker_delay;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::settings::Settings;

// Re-export commonly used types
pub use cable::{Load, SizingRequest, SizingResult, StandardGauge, SystemType};
pub use ohms_law::{OhmsLawInput, OhmsLawResult};
pub use speaker_delay::{Dimension, SpeakerDelayInput, SpeakerDelayResult};

/// Enum wrapper for all calculation types.
///
/// Lets a single JSON document describe any calculation:
///
/// ```json
/// { "type": "OhmsLaw", "voltage_v": 12.0, "current_a": 0.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// Cable sizing
    CableSizing(SizingRequest),
    /// Ohm's law
    OhmsLaw(OhmsLawInput),
    /// Speaker delay
    SpeakerDelay(SpeakerDelayInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::CableSizing(c) => &c.label,
            CalculationItem::OhmsLaw(o) => &o.label,
            CalculationItem::SpeakerDelay(s) => &s.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::CableSizing(_) => "CableSizing",
            CalculationItem::OhmsLaw(_) => "OhmsLaw",
            CalculationItem::SpeakerDelay(_) => "SpeakerDelay",
        }
    }

    /// Run the calculation.
    ///
    /// Cable requests carry their own power factor and voltage drop; the
    /// speaker delay takes the speed of sound from `settings`.
    pub fn evaluate(&self, settings: &Settings) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::CableSizing(request) => {
                cable::size_cable(request).map(CalculationOutput::CableSizing)
            }
            CalculationItem::OhmsLaw(input) => {
                ohms_law::calculate(input).map(CalculationOutput::OhmsLaw)
            }
            CalculationItem::SpeakerDelay(input) => {
                speaker_delay::calculate(input, &settings.acoustics)
                    .map(CalculationOutput::SpeakerDelay)
            }
        }
    }
}

/// Result of any calculation, tagged the same way as [`CalculationItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    CableSizing(SizingResult),
    OhmsLaw(OhmsLawResult),
    SpeakerDelay(SpeakerDelayResult),
}

impl CalculationOutput {
    /// One-line summary for display
    pub fn summary(&self) -> String {
        match self {
            CalculationOutput::CableSizing(r) => r.summary(),
            CalculationOutput::OhmsLaw(r) => r.summary(),
            CalculationOutput::SpeakerDelay(r) => r.summary(),
        }
    }
}
