//! Gas model errors.

use cf_core::CfError;
use thiserror::Error;

/// Result type for gas operations.
pub type GasResult<T> = Result<T, GasError>;

/// Errors raised by gas dynamic functions and gas models.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// A gas dynamic function was evaluated outside its real domain
    /// (λ beyond the limiting reduced velocity).
    #[error("Numeric domain error in {what}: lambda={lambda}, k={k}")]
    NumericDomain { what: &'static str, lambda: f64, k: f64 },

    /// Non-physical input or result (negative temperature, NaN, ...).
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Least-squares property fit did not produce usable coefficients.
    #[error("Property fit failed for {what}")]
    FitFailed { what: &'static str },
}

impl From<CfError> for GasError {
    fn from(err: CfError) -> Self {
        match err {
            CfError::NonFinite { what, value } => GasError::NonPhysical { what, value },
            CfError::OutOfRange { what, value, .. } => GasError::NonPhysical { what, value },
            CfError::InvalidArg { what } | CfError::Invariant { what } => {
                GasError::InvalidArg { what }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = GasError::NumericDomain {
            what: "epsilon",
            lambda: 3.0,
            k: 1.4,
        };
        let msg = err.to_string();
        assert!(msg.contains("epsilon"));
        assert!(msg.contains("lambda=3"));
    }

    #[test]
    fn core_error_converts() {
        let err: GasError = CfError::NonFinite {
            what: "T",
            value: f64::NAN,
        }
        .into();
        assert!(matches!(err, GasError::NonPhysical { what: "T", .. }));
    }
}
