//! Error types for the cf-app service layer.

use std::path::PathBuf;

/// Unified error for the CLI; backend errors are flattened to their messages.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Failed to write project file: {path}")]
    ProjectFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Project compilation failed: {0}")]
    Compile(String),

    #[error("Solver error: {0}")]
    Solver(String),

    #[error("Optimizer error: {0}")]
    Optimizer(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run not found: {0}")]
    RunNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<cf_project::ProjectError> for AppError {
    fn from(err: cf_project::ProjectError) -> Self {
        AppError::Project(err.to_string())
    }
}

impl From<cf_solver::SolverError> for AppError {
    fn from(err: cf_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<cf_optimizer::OptimizerError> for AppError {
    fn from(err: cf_optimizer::OptimizerError) -> Self {
        AppError::Optimizer(err.to_string())
    }
}

impl From<cf_results::ResultsError> for AppError {
    fn from(err: cf_results::ResultsError) -> Self {
        match err {
            cf_results::ResultsError::RunNotFound { run_id } => AppError::RunNotFound(run_id),
            other => AppError::Results(other.to_string()),
        }
    }
}
