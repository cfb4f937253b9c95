//! Error types for the design search.

use cf_core::CfError;
use cf_solver::SolverError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimizerError {
    #[error("Invalid parameter grid: {what}")]
    InvalidGrid { what: String },

    #[error("Invalid design requirements: {what}")]
    InvalidRequirements { what: String },

    #[error("Invalid search options: {what}")]
    InvalidOptions { what: String },

    #[error("Shape function error: {what}")]
    ShapeFunction { what: String },

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type OptimizerResult<T> = Result<T, OptimizerError>;

impl From<CfError> for OptimizerError {
    fn from(e: CfError) -> Self {
        OptimizerError::Solver(e.into())
    }
}
