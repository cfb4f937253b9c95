//! Shared application service layer for compflow.
//!
//! The CLI talks to the libraries only through this crate: it loads and
//! validates project files, compiles them into solver and optimizer objects,
//! runs searches with progress callbacks, and saves or queries runs.

pub mod compile;
pub mod error;
pub mod progress;
pub mod project_service;
pub mod query;
pub mod run_service;

pub use compile::{
    build_gas_model, build_grid, build_prototype, build_requirements, build_search_options,
    compile_design, compile_optimizer, parse_species,
};
pub use error::{AppError, AppResult};
pub use progress::{CallbackSink, RunProgressEvent, RunStage};
pub use project_service::{ProjectSummary, load_project, save_project, summarize};
pub use query::{RunSummary, best_designs, get_run_summary};
pub use run_service::{
    RunOptions, RunRequest, RunResponse, design_record, list_runs, load_run, run_optimization,
    run_optimization_with_progress, solve_design,
};
