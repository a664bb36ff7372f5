//! # Materials Database
//!
//! Conductor materials and their fixed electrical constants.
//!
//! ## Example
//!
//! ```rust
//! use wirecalc_core::materials::{ConductorMaterial, MaterialConstants};
//!
//! let copper = ConductorMaterial::Copper;
//! assert_eq!(copper.constants(), MaterialConstants::COPPER);
//! println!("{}: rho = {} Ohm*mm2/m", copper, copper.resistivity());
//! ```

pub mod conductor;

pub use conductor::{ConductorMaterial, MaterialConstants};
