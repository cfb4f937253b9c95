//! cf-solver: mean-line solution of multistage axial compressors.
//!
//! Each stage is solved at its mean radius with one fixed-point iteration on
//! the outlet flow angle; stages are chained front to back at constant shaft
//! speed. A `CompressorBuilder` collects the definition, `build()` validates
//! it, and `CompressorDesign::solve()` returns the immutable `CompressorModel`.

pub mod compressor;
pub mod compressor_solver;
pub mod config;
pub mod error;
pub mod stage_solver;
pub mod summary;

pub use compressor::{
    CompressorBuilder, CompressorDesign, CompressorModel, DEFAULT_DUCT_LOSS, DEFAULT_K_H,
    InletConditions, StagePlan,
};
pub use compressor_solver::{K_H_FLOOR, K_H_STEP, MeanRadiusCompressorSolver, next_height_loss_factor};
pub use config::SolverConfig;
pub use error::{SolverError, SolverResult};
pub use stage_solver::{MeanRadiusStageSolver, StageInputs, swirl_c_u_rel};
pub use summary::{StageSummary, stage_summary};
