//! # Speaker Delay
//!
//! Time-alignment delay for a loudspeaker placed some distance from the
//! main array. The offset is measured in centimeters along one, two or
//! three axes; the delay is the travel time of sound over the straight-line
//! distance.
//!
//! ## Example
//!
//! ```rust
//! use wirecalc_core::calculations::speaker_delay::{calculate, Dimension, SpeakerDelayInput};
//! use wirecalc_core::settings::AcousticSettings;
//!
//! let input = SpeakerDelayInput::new(Dimension::OneDimensional, 343.0, 0.0, 0.0);
//! let result = calculate(&input, &AcousticSettings::default()).unwrap();
//! assert!((result.delay_ms - 10.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_non_negative, require_positive, CalcResult};
use crate::settings::AcousticSettings;
use crate::units::{Centimeters, Meters, Milliseconds, Seconds};

/// Number of axes the offset is measured along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Dimension {
    /// Distance along X only
    #[default]
    OneDimensional,
    /// X and Y
    TwoDimensional,
    /// X, Y and Z
    ThreeDimensional,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [
        Dimension::OneDimensional,
        Dimension::TwoDimensional,
        Dimension::ThreeDimensional,
    ];

    /// Number of axes used
    pub fn axes(&self) -> usize {
        match self {
            Dimension::OneDimensional => 1,
            Dimension::TwoDimensional => 2,
            Dimension::ThreeDimensional => 3,
        }
    }
}

/// Speaker offset from the reference point.
///
/// Axes beyond `dimension` are ignored, so a 1D input may leave `y_cm` and
/// `z_cm` at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerDelayInput {
    #[serde(default)]
    pub label: String,

    pub dimension: Dimension,

    /// Offset along X (cm)
    pub x_cm: f64,

    /// Offset along Y (cm)
    #[serde(default)]
    pub y_cm: f64,

    /// Offset along Z (cm)
    #[serde(default)]
    pub z_cm: f64,
}

impl SpeakerDelayInput {
    pub fn new(dimension: Dimension, x_cm: f64, y_cm: f64, z_cm: f64) -> Self {
        SpeakerDelayInput {
            label: String::new(),
            dimension,
            x_cm,
            y_cm,
            z_cm,
        }
    }

    /// Validate the axes in use.
    pub fn validate(&self) -> CalcResult<()> {
        let axes = [("x_cm", self.x_cm), ("y_cm", self.y_cm), ("z_cm", self.z_cm)];
        for (field, value) in axes.into_iter().take(self.dimension.axes()) {
            require_non_negative(field, value, "Distance cannot be negative")?;
        }
        Ok(())
    }

    /// Straight-line distance over the axes in use.
    pub fn distance(&self) -> Centimeters {
        let (x, y, z) = (self.x_cm, self.y_cm, self.z_cm);
        match self.dimension {
            Dimension::OneDimensional => Centimeters(x),
            Dimension::TwoDimensional => Centimeters((x * x + y * y).sqrt()),
            Dimension::ThreeDimensional => Centimeters((x * x + y * y + z * z).sqrt()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerDelayResult {
    /// Straight-line distance (cm)
    pub distance_cm: f64,
    /// Required delay (ms)
    pub delay_ms: f64,
}

impl SpeakerDelayResult {
    pub fn summary(&self) -> String {
        format!("Delay: {:.2} ms", self.delay_ms)
    }
}

/// Compute the delay for `input` at the configured speed of sound.
pub fn calculate(
    input: &SpeakerDelayInput,
    acoustics: &AcousticSettings,
) -> CalcResult<SpeakerDelayResult> {
    input.validate()?;
    let speed = require_positive(
        "speed_of_sound_mps",
        acoustics.speed_of_sound_mps,
        "Speed of sound must be positive",
    )?;

    let distance = input.distance();
    let meters: Meters = distance.into();
    let delay: Milliseconds = Seconds(meters.0 / speed).into();

    debug!(distance_cm = distance.0, delay_ms = delay.0, "computed speaker delay");

    Ok(SpeakerDelayResult {
        distance_cm: distance.value(),
        delay_ms: delay.value(),
    })
}
