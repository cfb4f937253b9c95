//! cf-gas: working-fluid models for compflow.
//!
//! Provides:
//! - Gas dynamic functions of the reduced velocity λ (`gdf`)
//! - `GasModel` trait with power-law transport properties
//! - Species catalogue (air, nitrogen, carbon dioxide, water vapour)
//! - Mass-fraction mixtures, including methane combustion products
//!
//! Every gas exposes the same surface: gas constant, density, conductivity,
//! viscosity, kinematic viscosity, heat capacity, Prandtl number and the
//! heat-capacity ratio `k`. Mixtures weight each component property by its
//! normalised fraction.
//!
//! # Example
//!
//! ```
//! use cf_gas::{GasModel, Species, gdf};
//!
//! let air = Species::Air.model().unwrap();
//! let k = air.k(288.0);
//! let a_crit = gdf::a_crit(k, air.r(), 288.0).unwrap();
//! assert!((a_crit - 310.5).abs() < 0.5);
//! ```

pub mod error;
pub mod fit;
pub mod gdf;
pub mod mixture;
pub mod model;
pub mod species;

pub use error::{GasError, GasResult};
pub use fit::{PowerLawFit, fit_power_law};
pub use mixture::Mixture;
pub use model::{GasModel, PowerLawGas};
pub use species::Species;
