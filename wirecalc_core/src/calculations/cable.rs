//! # Cable Sizing
//!
//! Sizes a conductor for a cable run from the permitted voltage drop, then
//! reports the resulting resistive loss and the next standard cable size.
//!
//! ## Formulas
//!
//! With run length `L` (m), load current `I` (A), power factor `cos φ`,
//! conductivity `κ` and allowed voltage drop `ΔU` (V):
//!
//! - Single-phase AC and DC: `A = 2·L·I·cos φ / (κ·ΔU)`
//! - Three-phase AC: `A = √3·L·I·cos φ / (κ·ΔU)`
//!
//! When the load is given as power `P` (W) the current is `I = P / U` for
//! single-phase and DC, and `I = P / (√3·U)` for three-phase.
//!
//! The loss over the run with resistivity `ρ` is `P_loss = 2·ρ·L·I² / A`.
//!
//! ## Example
//!
//! ```rust
//! use wirecalc_core::calculations::cable::{size_cable, Load, SizingRequest, SystemType};
//! use wirecalc_core::materials::ConductorMaterial;
//!
//! let request = SizingRequest::new(
//!     30.0,
//!     SystemType::SinglePhase,
//!     ConductorMaterial::Copper,
//!     230.0,
//!     Load::Amps(50.0),
//! )
//! .with_power_factor(0.8)
//! .with_allowed_voltage_drop(10.0);
//!
//! let result = size_cable(&request).unwrap();
//! assert!((result.cross_section_mm2 - 4.29).abs() < 0.01);
//! assert_eq!(result.recommended_gauge, "6.0 mm²");
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};
use crate::materials::ConductorMaterial;
use crate::settings::{SizingDefaults, DEFAULT_ALLOWED_VOLTAGE_DROP_V, DEFAULT_POWER_FACTOR};
use crate::units::{Amps, SqMm, Volts, Watts};

/// √3, the line-to-phase factor of a balanced three-phase system
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

// ============================================================================
// System Type
// ============================================================================

/// Kind of supply the cable is part of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemType {
    /// AC single-phase (outgoing and return conductor)
    SinglePhase,
    /// AC three-phase, balanced load
    ThreePhase,
    /// Direct current (outgoing and return conductor)
    #[serde(rename = "DC")]
    Dc,
}

impl SystemType {
    /// All system types for UI selection
    pub const ALL: [SystemType; 3] = [SystemType::SinglePhase, SystemType::ThreePhase, SystemType::Dc];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            SystemType::SinglePhase => "AC Single-phase",
            SystemType::ThreePhase => "AC Three-phase",
            SystemType::Dc => "DC",
        }
    }

    /// True for the alternating current systems
    pub fn is_ac(&self) -> bool {
        !matches!(self, SystemType::Dc)
    }

    /// Conductor path factor of the sizing formula: 2 for a go-and-return
    /// pair, √3 for three-phase.
    pub fn path_factor(&self) -> f64 {
        match self {
            SystemType::ThreePhase => SQRT_3,
            SystemType::SinglePhase | SystemType::Dc => 2.0,
        }
    }

    /// Parse from common string representations, e.g. "AC Three-phase",
    /// "three_phase", "3ph", "dc".
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized: String = s
            .to_uppercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        let normalized = normalized.strip_prefix("AC").unwrap_or(&normalized);

        match normalized {
            "SINGLEPHASE" | "SINGLE" | "1PHASE" | "1PH" => Ok(SystemType::SinglePhase),
            "THREEPHASE" | "THREE" | "3PHASE" | "3PH" => Ok(SystemType::ThreePhase),
            "DC" => Ok(SystemType::Dc),
            _ => Err(CalcError::invalid_input(
                "system_type",
                s,
                "Unknown system type, expected AC Single-phase, AC Three-phase or DC",
            )),
        }
    }
}

impl FromStr for SystemType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SystemType::from_str_flexible(s)
    }
}

impl std::fmt::Display for SystemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Standard Voltages
// ============================================================================

/// Standard supply voltages offered per system type, in display order.
pub const STANDARD_VOLTAGES: [(&str, f64, SystemType); 9] = [
    ("110V", 110.0, SystemType::SinglePhase),
    ("220V", 220.0, SystemType::SinglePhase),
    ("230V", 230.0, SystemType::SinglePhase),
    ("380V", 380.0, SystemType::ThreePhase),
    ("400V", 400.0, SystemType::ThreePhase),
    ("415V", 415.0, SystemType::ThreePhase),
    ("12V", 12.0, SystemType::Dc),
    ("24V", 24.0, SystemType::Dc),
    ("48V", 48.0, SystemType::Dc),
];

/// Convert a standard voltage label such as `"230V"` to volts.
///
/// Only the exact labels in [`STANDARD_VOLTAGES`] are accepted; callers
/// trim user text before looking it up. A "Custom" choice
/// has to be resolved by the caller (see [`VoltageSelection`]).
///
/// ```rust
/// use wirecalc_core::calculations::cable::parse_standard_voltage;
///
/// assert_eq!(parse_standard_voltage("230V").unwrap(), 230.0);
/// assert!(parse_standard_voltage("Custom").is_err());
/// ```
pub fn parse_standard_voltage(label: &str) -> CalcResult<f64> {
    STANDARD_VOLTAGES
        .iter()
        .find(|(known, _, _)| *known == label)
        .map(|(_, volts, _)| *volts)
        .ok_or_else(|| {
            CalcError::invalid_input("voltage", label, "Not a standard voltage selection")
        })
}

/// Standard voltage labels for a system type.
pub fn standard_voltages(system_type: SystemType) -> Vec<&'static str> {
    STANDARD_VOLTAGES
        .iter()
        .filter(|(_, _, system)| *system == system_type)
        .map(|(label, _, _)| *label)
        .collect()
}

/// A voltage picked from the standard list or typed in by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoltageSelection {
    /// One of the standard labels, e.g. "400V"
    Standard(String),
    /// A user-entered voltage in volts
    Custom(f64),
}

impl VoltageSelection {
    /// Resolve the selection to a positive voltage.
    pub fn resolve(&self) -> CalcResult<f64> {
        match self {
            VoltageSelection::Standard(label) => parse_standard_voltage(label),
            VoltageSelection::Custom(volts) => {
                require_positive("voltage", *volts, "Voltage must be positive")
            }
        }
    }
}

// ============================================================================
// Standard Gauges
// ============================================================================

/// Standard conductor cross-sections, ordered from smallest to largest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StandardGauge {
    /// 1.5 mm²
    Mm2_1_5,
    /// 2.5 mm²
    Mm2_2_5,
    /// 4.0 mm²
    Mm2_4,
    /// 6.0 mm²
    Mm2_6,
    /// 10.0 mm²
    Mm2_10,
    /// 16.0 mm²
    Mm2_16,
    /// Larger than the biggest standard size handled here
    Oversize,
}

impl StandardGauge {
    /// All gauges in ascending order
    pub const ALL: [StandardGauge; 7] = [
        StandardGauge::Mm2_1_5,
        StandardGauge::Mm2_2_5,
        StandardGauge::Mm2_4,
        StandardGauge::Mm2_6,
        StandardGauge::Mm2_10,
        StandardGauge::Mm2_16,
        StandardGauge::Oversize,
    ];

    /// Nominal area in mm², `None` for [`StandardGauge::Oversize`]
    pub fn nominal_mm2(&self) -> Option<f64> {
        match self {
            StandardGauge::Mm2_1_5 => Some(1.5),
            StandardGauge::Mm2_2_5 => Some(2.5),
            StandardGauge::Mm2_4 => Some(4.0),
            StandardGauge::Mm2_6 => Some(6.0),
            StandardGauge::Mm2_10 => Some(10.0),
            StandardGauge::Mm2_16 => Some(16.0),
            StandardGauge::Oversize => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            StandardGauge::Mm2_1_5 => "1.5 mm²",
            StandardGauge::Mm2_2_5 => "2.5 mm²",
            StandardGauge::Mm2_4 => "4.0 mm²",
            StandardGauge::Mm2_6 => "6.0 mm²",
            StandardGauge::Mm2_10 => "10.0 mm²",
            StandardGauge::Mm2_16 => "16.0 mm²",
            StandardGauge::Oversize => "Greater than 16.0 mm² (consult a professional)",
        }
    }

    /// Smallest standard gauge whose nominal area is at least `cross_section_mm2`.
    /// Upper bounds are inclusive, so exactly 2.5 mm² maps to 2.5 mm².
    pub fn for_cross_section(cross_section_mm2: f64) -> StandardGauge {
        StandardGauge::ALL
            .into_iter()
            .find(|gauge| match gauge.nominal_mm2() {
                Some(nominal) => cross_section_mm2 <= nominal,
                None => true,
            })
            .unwrap_or(StandardGauge::Oversize)
    }
}

impl std::fmt::Display for StandardGauge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Label of the standard gauge recommended for a computed cross-section.
pub fn recommend_standard_gauge(cross_section_mm2: f64) -> &'static str {
    StandardGauge::for_cross_section(cross_section_mm2).label()
}

// ============================================================================
// Request / Result
// ============================================================================

/// The load carried by the cable, as current or as power.
///
/// JSON: `{ "amps": 16.0 }` or `{ "watts": 3680.0 }`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Load {
    /// Load current in amperes
    Amps(f64),
    /// Load power in watts
    Watts(f64),
}

impl Load {
    fn raw(&self) -> f64 {
        match self {
            Load::Amps(v) | Load::Watts(v) => *v,
        }
    }

    fn field(&self) -> &'static str {
        match self {
            Load::Amps(_) => "load.amps",
            Load::Watts(_) => "load.watts",
        }
    }
}

/// Input parameters for cable sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Workshop feed",
///   "length_m": 50.0,
///   "system_type": "ThreePhase",
///   "material": "Copper",
///   "voltage_v": 400.0,
///   "load": { "watts": 22000.0 },
///   "power_factor": 0.9,
///   "allowed_voltage_drop_v": 5.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingRequest {
    /// User label for this cable run
    #[serde(default)]
    pub label: String,

    /// One-way run length in meters
    pub length_m: f64,

    /// Supply system
    pub system_type: SystemType,

    /// Conductor material
    pub material: ConductorMaterial,

    /// System voltage in volts (line-to-line for three-phase)
    pub voltage_v: f64,

    /// Load current or power
    pub load: Load,

    /// Power factor cos φ, in (0, 1]
    #[serde(default = "default_power_factor")]
    pub power_factor: f64,

    /// Allowed voltage drop along the run in volts
    #[serde(default = "default_allowed_voltage_drop")]
    pub allowed_voltage_drop_v: f64,
}

fn default_power_factor() -> f64 {
    DEFAULT_POWER_FACTOR
}

fn default_allowed_voltage_drop() -> f64 {
    DEFAULT_ALLOWED_VOLTAGE_DROP_V
}

impl SizingRequest {
    /// Create a request with the built-in power factor and voltage drop.
    pub fn new(
        length_m: f64,
        system_type: SystemType,
        material: ConductorMaterial,
        voltage_v: f64,
        load: Load,
    ) -> Self {
        SizingRequest {
            label: String::new(),
            length_m,
            system_type,
            material,
            voltage_v,
            load,
            power_factor: DEFAULT_POWER_FACTOR,
            allowed_voltage_drop_v: DEFAULT_ALLOWED_VOLTAGE_DROP_V,
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the power factor cos φ
    pub fn with_power_factor(mut self, power_factor: f64) -> Self {
        self.power_factor = power_factor;
        self
    }

    /// Set the allowed voltage drop in volts
    pub fn with_allowed_voltage_drop(mut self, volts: f64) -> Self {
        self.allowed_voltage_drop_v = volts;
        self
    }

    /// Take power factor and voltage drop from configured defaults
    pub fn with_defaults(mut self, defaults: &SizingDefaults) -> Self {
        self.power_factor = defaults.power_factor;
        self.allowed_voltage_drop_v = defaults.allowed_voltage_drop_v;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("length_m", self.length_m, "Length must be positive")?;
        require_positive("voltage_v", self.voltage_v, "Voltage must be positive")?;
        require_non_negative(self.load.field(), self.load.raw(), "Load cannot be negative")?;
        if !(self.power_factor.is_finite() && self.power_factor > 0.0 && self.power_factor <= 1.0) {
            return Err(CalcError::invalid_input(
                "power_factor",
                self.power_factor.to_string(),
                "Power factor must be in (0, 1]",
            ));
        }
        require_positive(
            "allowed_voltage_drop_v",
            self.allowed_voltage_drop_v,
            "Allowed voltage drop must be positive",
        )?;
        Ok(())
    }

    /// Load current in amperes, derived from power where needed.
    pub fn current_a(&self) -> f64 {
        let volts = Volts(self.voltage_v);
        let current = match self.load {
            Load::Amps(a) => Amps(a),
            Load::Watts(w) => match self.system_type {
                SystemType::ThreePhase => Amps(w / (volts.0 * SQRT_3)),
                SystemType::SinglePhase | SystemType::Dc => Amps(w / volts.0),
            },
        };
        current.value()
    }

    /// Load power in watts, derived from current where needed.
    pub fn power_w(&self) -> f64 {
        let power = match self.load {
            Load::Watts(w) => Watts(w),
            Load::Amps(a) => match self.system_type {
                SystemType::ThreePhase => Watts(SQRT_3 * self.voltage_v * a),
                SystemType::SinglePhase | SystemType::Dc => Watts(self.voltage_v * a),
            },
        };
        power.value()
    }
}

/// Results from cable sizing.
///
/// ## JSON Example
///
/// ```json
/// {
///   "cross_section_mm2": 4.29,
///   "recommended_gauge": "6.0 mm²",
///   "power_loss_w": 595.0,
///   "current_a": 50.0,
///   "power_w": 11500.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    /// Required conductor cross-section (mm²)
    pub cross_section_mm2: f64,

    /// Label of the recommended standard gauge
    pub recommended_gauge: String,

    /// Resistive loss over the run at the required cross-section (W)
    pub power_loss_w: f64,

    /// Load current (A)
    pub current_a: f64,

    /// Load power (W)
    pub power_w: f64,
}

impl SizingResult {
    /// The recommended gauge as a typed value
    pub fn gauge(&self) -> StandardGauge {
        StandardGauge::for_cross_section(self.cross_section_mm2)
    }

    /// Loss as a percentage of the transmitted power, 0 for an idle cable
    pub fn loss_percent(&self) -> f64 {
        if self.power_w > 0.0 {
            self.power_loss_w / self.power_w * 100.0
        } else {
            0.0
        }
    }

    /// One-line summary for display
    pub fn summary(&self) -> String {
        format!(
            "Cross-section: {:.2} mm², Standard Wiring: {}, Power Loss: {:.2} W",
            self.cross_section_mm2, self.recommended_gauge, self.power_loss_w
        )
    }
}

// ============================================================================
// Calculations
// ============================================================================

/// Required cross-section in mm² for the permitted voltage drop.
///
/// A zero load gives 0 mm², which is not an error.
///
/// # Errors
///
/// `InvalidInput` for a non-positive length, voltage or voltage drop, a
/// negative load, or a power factor outside (0, 1]. Inputs large enough to
/// overflow the result are reported against the request, not the area.
pub fn compute_cross_section(request: &SizingRequest) -> CalcResult<f64> {
    request.validate()?;

    let current = request.current_a();
    let area = request.system_type.path_factor() * request.length_m * current * request.power_factor
        / (request.material.conductivity() * request.allowed_voltage_drop_v);

    if !area.is_finite() {
        return Err(CalcError::invalid_input(
            "length_m/load",
            format!("{} m, {} A", request.length_m, current),
            "Length and load are too large to size a cable",
        ));
    }

    Ok(SqMm(area).value())
}

/// Resistive power loss in watts over a cable run.
///
/// # Errors
///
/// `InvalidInput` for a non-positive length or cross-section, or a negative
/// current.
pub fn compute_power_loss(
    length_m: f64,
    current_a: f64,
    material: ConductorMaterial,
    cross_section_mm2: f64,
) -> CalcResult<f64> {
    require_positive("length_m", length_m, "Length must be positive")?;
    require_non_negative("current_a", current_a, "Current cannot be negative")?;
    require_positive(
        "cross_section_mm2",
        cross_section_mm2,
        "Cross-section must be positive",
    )?;

    let loss = 2.0 * material.resistivity() * length_m * current_a.powi(2) / cross_section_mm2;
    if !loss.is_finite() {
        return Err(CalcError::invalid_input(
            "current_a",
            current_a.to_string(),
            "Current is too large to compute a power loss",
        ));
    }

    Ok(loss)
}

/// Size a cable run: cross-section, recommended gauge and power loss.
///
/// With zero load the cross-section is 0 mm², the smallest gauge is
/// recommended and the reported loss is 0 W.
pub fn size_cable(request: &SizingRequest) -> CalcResult<SizingResult> {
    let cross_section_mm2 = compute_cross_section(request)?;
    let current_a = request.current_a();

    let power_loss_w = if cross_section_mm2 > 0.0 {
        compute_power_loss(request.length_m, current_a, request.material, cross_section_mm2)?
    } else {
        0.0
    };

    let gauge = StandardGauge::for_cross_section(cross_section_mm2);
    debug!(
        label = %request.label,
        system = %request.system_type,
        material = %request.material,
        current_a,
        cross_section_mm2,
        power_loss_w,
        gauge = gauge.label(),
        "sized cable run"
    );

    Ok(SizingResult {
        cross_section_mm2,
        recommended_gauge: gauge.label().to_string(),
        power_loss_w,
        current_a,
        power_w: request.power_w(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_phase_request() -> SizingRequest {
        SizingRequest::new(
            50.0,
            SystemType::ThreePhase,
            ConductorMaterial::Copper,
            400.0,
            Load::Amps(100.0),
        )
        .with_power_factor(0.9)
        .with_allowed_voltage_drop(5.0)
    }

    fn single_phase_request() -> SizingRequest {
        SizingRequest::new(
            30.0,
            SystemType::SinglePhase,
            ConductorMaterial::Copper,
            230.0,
            Load::Amps(50.0),
        )
        .with_power_factor(0.8)
        .with_allowed_voltage_drop(10.0)
    }

    #[test]
    fn test_three_phase_cross_section() {
        // A = √3 * 50 * 100 * 0.9 / (56 * 5) = 27.84
        let area = compute_cross_section(&three_phase_request()).unwrap();
        assert!((area - 28.29).abs() < 0.5);
        assert!((area - 27.84).abs() < 0.01);
    }

    #[test]
    fn test_three_phase_from_power() {
        // I = 100 kW / (400 * √3) = 144.34 A, A = 50 * 250 * 0.9 / 280 = 40.18
        let mut request = three_phase_request();
        request.load = Load::Watts(100_000.0);
        assert!((request.current_a() - 144.34).abs() < 0.01);
        let area = compute_cross_section(&request).unwrap();
        assert!((area - 40.18).abs() < 0.01);
    }

    #[test]
    fn test_single_phase_cross_section() {
        // A = 2 * 30 * 50 * 0.8 / (56 * 10) = 4.2857
        let area = compute_cross_section(&single_phase_request()).unwrap();
        assert!((area - 4.29).abs() < 0.01);
    }

    #[test]
    fn test_dc_from_power() {
        // 120 W at 12 V is 10 A; A = 2 * 10 * 10 * 1.0 / (56 * 0.6) = 5.95
        let request = SizingRequest::new(
            10.0,
            SystemType::Dc,
            ConductorMaterial::Copper,
            12.0,
            Load::Watts(120.0),
        )
        .with_power_factor(1.0)
        .with_allowed_voltage_drop(0.6);

        assert!((request.current_a() - 10.0).abs() < 1e-12);
        let result = size_cable(&request).unwrap();
        assert!((result.cross_section_mm2 - 5.952).abs() < 0.001);
        assert_eq!(result.recommended_gauge, "6.0 mm²");
        assert!((result.power_w - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_current() {
        let mut request = three_phase_request();
        request.load = Load::Amps(0.0);

        assert_eq!(compute_cross_section(&request).unwrap(), 0.0);

        let result = size_cable(&request).unwrap();
        assert_eq!(result.cross_section_mm2, 0.0);
        assert_eq!(result.recommended_gauge, "1.5 mm²");
        assert_eq!(result.power_loss_w, 0.0);
        assert_eq!(result.loss_percent(), 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut request = three_phase_request();
        request.length_m = -50.0;
        let err = compute_cross_section(&request).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let mut request = three_phase_request();
        request.voltage_v = 0.0;
        assert!(compute_cross_section(&request).is_err());

        let mut request = three_phase_request();
        request.load = Load::Watts(-1.0);
        assert!(compute_cross_section(&request).is_err());

        let mut request = three_phase_request();
        request.power_factor = 1.1;
        assert!(compute_cross_section(&request).is_err());

        let mut request = three_phase_request();
        request.power_factor = 0.0;
        assert!(compute_cross_section(&request).is_err());

        let mut request = three_phase_request();
        request.allowed_voltage_drop_v = 0.0;
        assert!(compute_cross_section(&request).is_err());

        let mut request = three_phase_request();
        request.length_m = f64::NAN;
        assert!(compute_cross_section(&request).is_err());
    }

    #[test]
    fn test_overflowing_inputs_name_the_request() {
        let mut request = three_phase_request();
        request.length_m = f64::MAX;
        request.load = Load::Amps(f64::MAX);

        let err = compute_cross_section(&request).unwrap_err();
        match &err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "length_m/load"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = size_cable(&request).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_ne!(field, "cross_section_mm2"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_system_type() {
        assert_eq!(
            "AC Three-phase".parse::<SystemType>().unwrap(),
            SystemType::ThreePhase
        );
        assert_eq!(
            "AC Single-phase".parse::<SystemType>().unwrap(),
            SystemType::SinglePhase
        );
        assert_eq!("dc".parse::<SystemType>().unwrap(), SystemType::Dc);
        assert_eq!("3ph".parse::<SystemType>().unwrap(), SystemType::ThreePhase);

        let err = "Two-phase".parse::<SystemType>().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_power_loss() {
        // 2 * 0.017 * 100 * 75² / 10 = 1912.5
        let loss = compute_power_loss(100.0, 75.0, ConductorMaterial::Copper, 10.0).unwrap();
        assert!((loss - 1912.5).abs() < 0.01);

        // 2 * 0.028 * 100 * 75² / 10 = 3150
        let aluminum = compute_power_loss(100.0, 75.0, ConductorMaterial::Aluminum, 10.0).unwrap();
        assert!((aluminum - 3150.0).abs() < 0.01);
    }

    #[test]
    fn test_power_loss_invalid() {
        assert!(compute_power_loss(100.0, 75.0, ConductorMaterial::Copper, 0.0).is_err());
        assert!(compute_power_loss(100.0, 75.0, ConductorMaterial::Copper, -2.5).is_err());
        assert!(compute_power_loss(0.0, 75.0, ConductorMaterial::Copper, 10.0).is_err());
        assert!(compute_power_loss(100.0, -1.0, ConductorMaterial::Copper, 10.0).is_err());
        assert!(compute_power_loss(100.0, 1e200, ConductorMaterial::Copper, 10.0).is_err());

        // Unknown materials never reach the formula
        let err = "Steel"
            .parse::<ConductorMaterial>()
            .and_then(|m| compute_power_loss(100.0, 75.0, m, 10.0))
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_recommended_gauge() {
        assert_eq!(recommend_standard_gauge(1.2), "1.5 mm²");
        assert_eq!(recommend_standard_gauge(2.0), "2.5 mm²");
        assert_eq!(recommend_standard_gauge(3.5), "4.0 mm²");
        assert_eq!(recommend_standard_gauge(5.0), "6.0 mm²");
        assert_eq!(recommend_standard_gauge(8.5), "10.0 mm²");
        assert_eq!(recommend_standard_gauge(12.0), "16.0 mm²");
        assert_eq!(
            recommend_standard_gauge(20.0),
            "Greater than 16.0 mm² (consult a professional)"
        );
        assert_eq!(recommend_standard_gauge(0.0), "1.5 mm²");
    }

    #[test]
    fn test_gauge_boundaries_are_inclusive() {
        assert_eq!(recommend_standard_gauge(1.5), "1.5 mm²");
        assert_eq!(recommend_standard_gauge(2.5), "2.5 mm²");
        assert_eq!(recommend_standard_gauge(4.0), "4.0 mm²");
        assert_eq!(recommend_standard_gauge(6.0), "6.0 mm²");
        assert_eq!(recommend_standard_gauge(10.0), "10.0 mm²");
        assert_eq!(recommend_standard_gauge(16.0), "16.0 mm²");
        assert_eq!(StandardGauge::for_cross_section(16.0001), StandardGauge::Oversize);
    }

    #[test]
    fn test_parse_standard_voltage() {
        assert_eq!(parse_standard_voltage("230V").unwrap(), 230.0);
        assert_eq!(parse_standard_voltage("12V").unwrap(), 12.0);
        assert_eq!(parse_standard_voltage("415V").unwrap(), 415.0);

        let err = parse_standard_voltage("Custom").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(parse_standard_voltage("999V").is_err());
        assert!(parse_standard_voltage("").is_err());
    }

    #[test]
    fn test_standard_voltage_labels_are_exact() {
        assert!(parse_standard_voltage(" 230V ").is_err());
        assert!(parse_standard_voltage("230v").is_err());
        assert!(parse_standard_voltage("230").is_err());
    }

    #[test]
    fn test_standard_voltages_per_system() {
        assert_eq!(standard_voltages(SystemType::SinglePhase), vec!["110V", "220V", "230V"]);
        assert_eq!(standard_voltages(SystemType::ThreePhase), vec!["380V", "400V", "415V"]);
        assert_eq!(standard_voltages(SystemType::Dc), vec!["12V", "24V", "48V"]);
    }

    #[test]
    fn test_voltage_selection() {
        assert_eq!(VoltageSelection::Standard("400V".into()).resolve().unwrap(), 400.0);
        assert_eq!(VoltageSelection::Custom(690.0).resolve().unwrap(), 690.0);
        assert!(VoltageSelection::Custom(0.0).resolve().is_err());
        assert!(VoltageSelection::Standard("Custom".into()).resolve().is_err());
    }

    #[test]
    fn test_size_cable_summary() {
        let result = size_cable(&single_phase_request()).unwrap();
        // Loss = 2 * 0.017 * 30 * 50² / (30/7) = 595 W
        assert!((result.power_loss_w - 595.0).abs() < 1e-6);
        assert_eq!(result.gauge(), StandardGauge::Mm2_6);
        assert_eq!(
            result.summary(),
            "Cross-section: 4.29 mm², Standard Wiring: 6.0 mm², Power Loss: 595.00 W"
        );
        assert!((result.power_w - 11_500.0).abs() < 1e-9);
    }

    #[test]
    fn test_with_defaults() {
        let defaults = SizingDefaults {
            power_factor: 0.85,
            allowed_voltage_drop_v: 6.9,
        };
        let request = single_phase_request().with_defaults(&defaults);
        assert_eq!(request.power_factor, 0.85);
        assert_eq!(request.allowed_voltage_drop_v, 6.9);
    }

    #[test]
    fn test_request_json_defaults() {
        let json = r#"{
            "length_m": 50.0,
            "system_type": "DC",
            "material": "Aluminum",
            "voltage_v": 48.0,
            "load": { "watts": 960.0 }
        }"#;
        let request: SizingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.system_type, SystemType::Dc);
        assert_eq!(request.load, Load::Watts(960.0));
        assert_eq!(request.power_factor, DEFAULT_POWER_FACTOR);
        assert_eq!(request.allowed_voltage_drop_v, DEFAULT_ALLOWED_VOLTAGE_DROP_V);
        assert!(request.label.is_empty());
        assert!((request.current_a() - 20.0).abs() < 1e-12);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ordered(a: f64, b: f64) -> (f64, f64) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn system_type() -> impl Strategy<Value = SystemType> {
        prop_oneof![
            Just(SystemType::SinglePhase),
            Just(SystemType::ThreePhase),
            Just(SystemType::Dc),
        ]
    }

    fn request(system: SystemType, length: f64, voltage: f64, load: Load) -> SizingRequest {
        SizingRequest::new(length, system, ConductorMaterial::Copper, voltage, load)
            .with_power_factor(0.9)
            .with_allowed_voltage_drop(5.0)
    }

    proptest! {
        #[test]
        fn cross_section_grows_with_length(
            system in system_type(),
            a in 0.1_f64..1000.0,
            b in 0.1_f64..1000.0,
            amps in 0.0_f64..500.0,
        ) {
            let (short, long) = ordered(a, b);
            let small = compute_cross_section(&request(system, short, 230.0, Load::Amps(amps))).unwrap();
            let large = compute_cross_section(&request(system, long, 230.0, Load::Amps(amps))).unwrap();
            prop_assert!(small <= large);
        }

        #[test]
        fn cross_section_grows_with_current(
            system in system_type(),
            a in 0.0_f64..500.0,
            b in 0.0_f64..500.0,
        ) {
            let (low, high) = ordered(a, b);
            let small = compute_cross_section(&request(system, 40.0, 400.0, Load::Amps(low))).unwrap();
            let large = compute_cross_section(&request(system, 40.0, 400.0, Load::Amps(high))).unwrap();
            prop_assert!(small <= large);
        }

        #[test]
        fn cross_section_shrinks_with_voltage(
            system in system_type(),
            a in 1.0_f64..1000.0,
            b in 1.0_f64..1000.0,
            watts in 0.0_f64..50_000.0,
        ) {
            let (low, high) = ordered(a, b);
            let at_low = compute_cross_section(&request(system, 25.0, low, Load::Watts(watts))).unwrap();
            let at_high = compute_cross_section(&request(system, 25.0, high, Load::Watts(watts))).unwrap();
            prop_assert!(at_high <= at_low);
        }

        #[test]
        fn better_conductor_needs_less_area(
            system in system_type(),
            length in 0.1_f64..1000.0,
            amps in 0.0_f64..500.0,
        ) {
            let copper = request(system, length, 230.0, Load::Amps(amps));
            let mut aluminum = copper.clone();
            aluminum.material = ConductorMaterial::Aluminum;
            let cu = compute_cross_section(&copper).unwrap();
            let al = compute_cross_section(&aluminum).unwrap();
            prop_assert!(cu <= al);
        }

        #[test]
        fn gauge_is_monotonic(a in 0.0_f64..40.0, b in 0.0_f64..40.0) {
            let (small, large) = ordered(a, b);
            prop_assert!(
                StandardGauge::for_cross_section(small) <= StandardGauge::for_cross_section(large)
            );
        }
    }
}
