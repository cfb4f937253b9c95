//! cf-core: shared foundation for compflow.
//!
//! Contains:
//! - units (uom SI types + constructors used at API boundaries)
//! - numeric (Real, tolerances, float guards, sweep helpers)
//! - error (shared error type)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{CfError, CfResult};
pub use numeric::*;
pub use units::*;
