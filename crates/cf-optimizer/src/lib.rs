//! cf-optimizer: combinatorial search for compressors meeting a design target.
//!
//! A [`ParameterGrid`] spans first-stage conditions and the axial profiles
//! of loading, efficiency, axial velocity and reaction. The
//! [`MeanRadiusOptimizer`] solves one compressor per grid point, keeps the
//! ones that meet the [`DesignRequirements`] with a non-increasing stage
//! pressure ratio, and streams them in bounded [`ResultBatch`]es.
//!
//! ```no_run
//! use std::sync::Arc;
//! use cf_core::units::{k, kgps, pa};
//! use cf_gas::Species;
//! use cf_optimizer::{
//!     DesignRequirements, MeanRadiusOptimizer, NoProgress, ParameterGrid, SearchOptions,
//! };
//! use cf_solver::{CompressorBuilder, InletConditions, StagePlan};
//!
//! let prototype = CompressorBuilder::new(Arc::new(Species::Air.model().unwrap()))
//!     .inlet(InletConditions { mass_flow: kgps(60.0), t_stag: k(288.0), p_stag: pa(1.0e5) })
//!     .stages(std::iter::repeat_n(StagePlan::default(), 4));
//! let grid = ParameterGrid::default(); // fill in the swept axes
//! let requirements = DesignRequirements::new(5.5, 0.84, 0.05).unwrap();
//! let optimizer =
//!     MeanRadiusOptimizer::new(prototype, requirements, grid, SearchOptions::default()).unwrap();
//! for batch in optimizer.search(&mut NoProgress) {
//!     println!("{} designs", batch.len());
//! }
//! ```

pub mod error;
pub mod grid;
pub mod progress;
pub mod search;
pub mod shape;
pub mod validate;

pub use error::{OptimizerError, OptimizerResult};
pub use grid::{AXIS_NAMES, DesignPoint, ParameterGrid};
pub use progress::{
    CandidateOutcome, NoProgress, ProgressSink, ProgressTracker, SearchProgress, TracingProgress,
};
pub use search::{
    AcceptedDesign, CandidateSearch, Evaluation, MeanRadiusOptimizer, ResultBatch, SearchOptions,
};
pub use shape::{ParabolicShape, linear_profile, parabolic_profile};
pub use validate::{DesignRequirements, Verdict, pressure_trend_is_valid};
