//! # wirecalc_core - Electrical Calculation Engine
//!
//! `wirecalc_core` is the computational heart of Wirecalc: cable
//! cross-section sizing with power loss and standard gauge recommendation,
//! plus the small companion calculators (ohm's law, speaker delay). All
//! inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **Typed choices**: system type and conductor material are enums, not strings
//! - **Explicit configuration**: defaults live in [`settings::Settings`] and are passed in
//! - **Rich Errors**: Structured error types naming the offending field
//!
//! ## Quick Start
//!
//! ```rust
//! use wirecalc_core::calculations::cable::{size_cable, Load, SizingRequest, SystemType};
//! use wirecalc_core::materials::ConductorMaterial;
//! use wirecalc_core::settings::Settings;
//!
//! let settings = Settings::default();
//! let request = SizingRequest::new(
//!     50.0,
//!     SystemType::ThreePhase,
//!     ConductorMaterial::Copper,
//!     400.0,
//!     Load::Amps(100.0),
//! )
//! .with_defaults(&settings.sizing);
//!
//! let result = size_cable(&request).unwrap();
//! println!("{}", result.summary());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Cable sizing, ohm's law, speaker delay
//! - [`materials`] - Conductor materials and constants
//! - [`units`] - Type-safe unit wrappers
//! - [`parsing`] - Lenient parsing of user-entered numbers
//! - [`settings`] - Explicit configuration
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod parsing;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::cable::{
    compute_cross_section, compute_power_loss, parse_standard_voltage, recommend_standard_gauge,
    size_cable,
};
pub use calculations::{CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use materials::ConductorMaterial;
pub use settings::Settings;
