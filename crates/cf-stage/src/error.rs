//! Error types for stage-level models.

use cf_core::CfError;
use cf_gas::GasError;
use thiserror::Error;

/// Errors that can occur while evaluating stage geometry, velocity laws or
/// stage-derived quantities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StageError {
    /// Radial-equilibrium or other algebra left the real domain
    /// (negative radicand, NaN).
    #[error("Numeric domain error in {what}: {value}")]
    NumericDomain { what: &'static str, value: f64 },

    /// The annulus cannot pass the required outlet area.
    #[error("Impossible geometry: outlet hub ratio {d_rel_3} for outlet area {area_3} m²")]
    ImpossibleGeometry { d_rel_3: f64, area_3: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Gas model error: {0}")]
    Gas(#[from] GasError),
}

pub type StageResult<T> = Result<T, StageError>;

impl From<CfError> for StageError {
    fn from(e: CfError) -> Self {
        match e {
            CfError::NonFinite { what, value } | CfError::OutOfRange { what, value, .. } => {
                StageError::NumericDomain { what, value }
            }
            CfError::InvalidArg { what } | CfError::Invariant { what } => {
                StageError::InvalidArg { what }
            }
        }
    }
}

/// Ensure a value is finite, returning `StageError::NumericDomain` if not.
pub fn check_finite(value: f64, what: &'static str) -> StageResult<f64> {
    Ok(cf_core::ensure_finite(value, what)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StageError::ImpossibleGeometry {
            d_rel_3: f64::NAN,
            area_3: 0.1,
        };
        assert!(err.to_string().contains("Impossible geometry"));
    }

    #[test]
    fn gas_error_wraps() {
        let err: StageError = GasError::InvalidArg { what: "k" }.into();
        assert!(matches!(err, StageError::Gas(_)));
    }

    #[test]
    fn check_finite_maps_to_domain_error() {
        assert_eq!(check_finite(1.5, "x"), Ok(1.5));
        assert!(matches!(
            check_finite(f64::NAN, "x"),
            Err(StageError::NumericDomain { what: "x", .. })
        ));
    }
}
