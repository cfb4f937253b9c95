//! cf-stage: single-stage building blocks of the mean-line compressor model.
//!
//! Modules:
//! - `triangle`: dimensionless velocity triangles (absolute and complete)
//! - `velocity_law`: spanwise twist laws (exponential family, constant reactivity)
//! - `geometry`: flow-path stations, diameter laws and outlet sizing
//! - `blading`: blade-row geometry computed on demand
//! - `thermal`: stagnation state bookkeeping
//! - `stage`: the solved stage model

pub mod blading;
pub mod error;
pub mod geometry;
pub mod stage;
pub mod thermal;
pub mod triangle;
pub mod velocity_law;

pub use blading::{BladeRowParams, BladingGeometry};
pub use error::{StageError, StageResult, check_finite};
pub use geometry::{DiameterLaw, StageGeometry, annulus_area, mean_radius_rel, outlet_parameters};
pub use stage::{StageBlading, StageModel};
pub use thermal::ThermalInfo;
pub use triangle::{AbsoluteTriangle, FlowTriangle, VelocityTriangle};
pub use velocity_law::{VelocityLaw, VelocityLawKind};
