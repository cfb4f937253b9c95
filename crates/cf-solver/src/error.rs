//! Error types for solver operations.

use cf_core::CfError;
use cf_gas::GasError;
use cf_stage::StageError;
use thiserror::Error;

/// Errors that can occur while building or solving a compressor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Problem setup error: {what}")]
    ProblemSetup { what: String },

    #[error(
        "Convergence failed in stage {stage}: outlet flow angle still changing by {residual:.3e} after {iterations} iterations"
    )]
    ConvergenceFailed {
        stage: usize,
        iterations: usize,
        residual: f64,
    },

    #[error("Adiabatic efficiency {eta_ad} is not below 1, check the input data")]
    EfficiencyBound { eta_ad: f64 },

    #[error("Stage error: {0}")]
    Stage(#[from] StageError),

    #[error("Gas error: {0}")]
    Gas(#[from] GasError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<CfError> for SolverError {
    fn from(e: CfError) -> Self {
        match e {
            CfError::NonFinite { .. } | CfError::OutOfRange { .. } => SolverError::Numeric {
                what: e.to_string(),
            },
            CfError::InvalidArg { .. } | CfError::Invariant { .. } => SolverError::ProblemSetup {
                what: e.to_string(),
            },
        }
    }
}

pub(crate) fn setup(what: impl Into<String>) -> SolverError {
    SolverError::ProblemSetup { what: what.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = SolverError::ConvergenceFailed {
            stage: 2,
            iterations: 100,
            residual: 0.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("stage 2"));
        assert!(msg.contains("100 iterations"));
    }

    #[test]
    fn stage_errors_wrap() {
        let err: SolverError = StageError::ImpossibleGeometry {
            d_rel_3: f64::NAN,
            area_3: 1.0,
        }
        .into();
        assert!(matches!(
            err,
            SolverError::Stage(StageError::ImpossibleGeometry { .. })
        ));
    }

    #[test]
    fn core_errors_map() {
        let err: SolverError = CfError::NonFinite {
            what: "pi",
            value: f64::INFINITY,
        }
        .into();
        assert!(matches!(err, SolverError::Numeric { .. }));
    }
}
