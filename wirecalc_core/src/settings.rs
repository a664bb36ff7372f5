//! # Settings
//!
//! Explicit configuration for the calculators. A front end loads a
//! [`Settings`] value once and passes the relevant part into each
//! calculation; nothing in the library reads global state.
//!
//! Settings files are JSON. Every field has a default, so a partial file
//! only overrides what it names:
//!
//! ```json
//! {
//!   "sizing": { "power_factor": 0.85, "allowed_voltage_drop_v": 6.9 },
//!   "acoustics": { "speed_of_sound_mps": 343.0 }
//! }
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wirecalc_core::settings::Settings;
//!
//! let settings = Settings::from_json(r#"{ "sizing": { "power_factor": 0.8 } }"#).unwrap();
//! assert_eq!(settings.sizing.power_factor, 0.8);
//! assert_eq!(settings.sizing.allowed_voltage_drop_v, 5.0);
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_positive, CalcError, CalcResult};

/// Default power factor cos φ applied when a request doesn't give one
pub const DEFAULT_POWER_FACTOR: f64 = 0.9;

/// Default allowed voltage drop along a cable run (V)
pub const DEFAULT_ALLOWED_VOLTAGE_DROP_V: f64 = 5.0;

/// Speed of sound in air at 20 °C (m/s)
pub const DEFAULT_SPEED_OF_SOUND_MPS: f64 = 343.0;

/// Root settings container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Defaults for cable sizing requests
    pub sizing: SizingDefaults,

    /// Acoustic constants for the speaker delay calculator
    pub acoustics: AcousticSettings,
}

/// Defaults for values a cable sizing form doesn't ask for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingDefaults {
    /// Power factor cos φ, in (0, 1]
    pub power_factor: f64,

    /// Allowed voltage drop ΔU in volts
    pub allowed_voltage_drop_v: f64,
}

impl Default for SizingDefaults {
    fn default() -> Self {
        SizingDefaults {
            power_factor: DEFAULT_POWER_FACTOR,
            allowed_voltage_drop_v: DEFAULT_ALLOWED_VOLTAGE_DROP_V,
        }
    }
}

/// Acoustic constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcousticSettings {
    /// Speed of sound in m/s
    pub speed_of_sound_mps: f64,
}

impl Default for AcousticSettings {
    fn default() -> Self {
        AcousticSettings {
            speed_of_sound_mps: DEFAULT_SPEED_OF_SOUND_MPS,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them.
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    ///
    /// # Errors
    ///
    /// * `FileError` - the file can't be opened or read
    /// * `SerializationError` - the file isn't valid settings JSON
    /// * `InvalidInput` - a value is out of range
    pub fn load(path: &Path) -> CalcResult<Self> {
        let mut file = File::open(path).map_err(|e| {
            CalcError::file_error("open", path.display().to_string(), e.to_string())
        })?;

        let mut contents = String::new();
        file.read_to_string(&mut contents).map_err(|e| {
            CalcError::file_error("read", path.display().to_string(), e.to_string())
        })?;

        let settings: Settings =
            serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", path.display(), e),
            })?;
        settings.validate()?;

        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> CalcResult<()> {
        let pf = self.sizing.power_factor;
        if !(pf.is_finite() && pf > 0.0 && pf <= 1.0) {
            return Err(CalcError::invalid_input(
                "sizing.power_factor",
                pf.to_string(),
                "Power factor must be in (0, 1]",
            ));
        }
        require_positive(
            "sizing.allowed_voltage_drop_v",
            self.sizing.allowed_voltage_drop_v,
            "Allowed voltage drop must be positive",
        )?;
        require_positive(
            "acoustics.speed_of_sound_mps",
            self.acoustics.speed_of_sound_mps,
            "Speed of sound must be positive",
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wirecalc_settings_{}_{}", std::process::id(), name))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.sizing.power_factor, 0.9);
        assert_eq!(settings.sizing.allowed_voltage_drop_v, 5.0);
        assert_eq!(settings.acoustics.speed_of_sound_mps, 343.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "acoustics": { "speed_of_sound_mps": 340.0 } }"#)
            .unwrap();
        assert_eq!(settings.acoustics.speed_of_sound_mps, 340.0);
        assert_eq!(settings.sizing, SizingDefaults::default());

        let empty = Settings::from_json("{}").unwrap();
        assert_eq!(empty, Settings::default());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let err = Settings::from_json(r#"{ "sizing": { "power_factor": 1.2 } }"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err =
            Settings::from_json(r#"{ "sizing": { "allowed_voltage_drop_v": 0 } }"#).unwrap_err();
        assert!(err.to_string().contains("allowed_voltage_drop_v"));
    }

    #[test]
    fn test_bad_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_path("ok.json");
        {
            let mut file = File::create(&path).unwrap();
            write!(file, r#"{{ "sizing": {{ "power_factor": 0.8, "allowed_voltage_drop_v": 10.0 }} }}"#)
                .unwrap();
        }

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.sizing.power_factor, 0.8);
        assert_eq!(settings.sizing.allowed_voltage_drop_v, 10.0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_missing_file() {
        let path = temp_path("does_not_exist.json");
        let err = Settings::load(&path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
