//! Conductor Materials
//!
//! Electrical constants for cable conductors. Resistivity drives the power
//! loss formula, conductivity drives cross-section sizing. The two values
//! are the customary installer's table values and are kept independently
//! rather than derived from each other.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Fixed electrical constants for one conductor material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialConstants {
    /// Specific resistance ρ (Ω·mm²/m)
    pub resistivity_ohm_mm2_per_m: f64,
    /// Conductivity κ (S·m/mm², commonly written as "S/m")
    pub conductivity_s_per_m: f64,
}

impl MaterialConstants {
    /// Copper: ρ = 0.017, κ = 56
    pub const COPPER: MaterialConstants = MaterialConstants {
        resistivity_ohm_mm2_per_m: 0.017,
        conductivity_s_per_m: 56.0,
    };

    /// Aluminum: ρ = 0.028, κ = 37
    pub const ALUMINUM: MaterialConstants = MaterialConstants {
        resistivity_ohm_mm2_per_m: 0.028,
        conductivity_s_per_m: 37.0,
    };
}

/// Conductor material of a cable run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConductorMaterial {
    /// Copper (Cu)
    #[default]
    Copper,
    /// Aluminum (Al)
    Aluminum,
}

impl ConductorMaterial {
    /// All conductor materials for UI selection
    pub const ALL: [ConductorMaterial; 2] = [ConductorMaterial::Copper, ConductorMaterial::Aluminum];

    /// Chemical symbol
    pub fn code(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Cu",
            ConductorMaterial::Aluminum => "Al",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Copper",
            ConductorMaterial::Aluminum => "Aluminum",
        }
    }

    /// Look up the material's constants
    pub fn constants(&self) -> MaterialConstants {
        match self {
            ConductorMaterial::Copper => MaterialConstants::COPPER,
            ConductorMaterial::Aluminum => MaterialConstants::ALUMINUM,
        }
    }

    /// Specific resistance ρ (Ω·mm²/m)
    pub fn resistivity(&self) -> f64 {
        self.constants().resistivity_ohm_mm2_per_m
    }

    /// Conductivity κ (S/m)
    pub fn conductivity(&self) -> f64 {
        self.constants().conductivity_s_per_m
    }

    /// Parse from common string representations.
    ///
    /// Accepts the display name, the chemical symbol and the British
    /// spelling, case-insensitively. Anything else is `InvalidInput`.
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_uppercase().as_str() {
            "COPPER" | "CU" => Ok(ConductorMaterial::Copper),
            "ALUMINUM" | "ALUMINIUM" | "AL" => Ok(ConductorMaterial::Aluminum),
            _ => Err(CalcError::invalid_input(
                "material",
                s,
                "Unsupported conductor material, expected Copper or Aluminum",
            )),
        }
    }
}

impl FromStr for ConductorMaterial {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConductorMaterial::from_str_flexible(s)
    }
}

impl std::fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
