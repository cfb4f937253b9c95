//! Chunked combinatorial search over a parameter grid.
//!
//! Every grid point is turned into a compressor by installing its per-stage
//! profiles on a prototype builder, solved, and checked against the design
//! requirements. Accepted designs are handed out in batches of at most
//! `chunk_size` so memory stays bounded on large grids.

use std::collections::VecDeque;

use cf_solver::{CompressorBuilder, CompressorDesign, CompressorModel, SolverConfig};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{OptimizerError, OptimizerResult};
use crate::grid::{DesignPoint, ParameterGrid};
use crate::progress::{CandidateOutcome, ProgressSink, ProgressTracker, SearchProgress};
use crate::validate::{DesignRequirements, Verdict};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOptions {
    pub solver: SolverConfig,
    /// Accepted designs per batch
    pub chunk_size: usize,
    /// Candidates between progress reports
    pub report_every: usize,
    /// Evaluate blocks of grid points on the rayon pool
    pub parallel: bool,
    /// Grid points per parallel block
    pub block_size: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            chunk_size: 1000,
            report_every: 1000,
            parallel: false,
            block_size: 256,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> OptimizerResult<()> {
        self.solver.validate()?;
        for (v, what) in [
            (self.chunk_size, "chunk_size"),
            (self.report_every, "report_every"),
            (self.block_size, "block_size"),
        ] {
            if v == 0 {
                return Err(OptimizerError::InvalidOptions {
                    what: format!("{what} must be at least 1"),
                });
            }
        }
        Ok(())
    }
}

/// A solved candidate that met every requirement.
#[derive(Clone, Debug)]
pub struct AcceptedDesign {
    /// Flat grid index
    pub index: usize,
    pub point: DesignPoint,
    pub pi_c: f64,
    pub eta_ad: f64,
    pub compressor: CompressorModel,
}

impl AcceptedDesign {
    pub fn d_out_1(&self) -> f64 {
        self.compressor.first_stage().geometry.d_out_1
    }
}

/// Accepted designs in grid order.
#[derive(Clone, Debug)]
pub struct ResultBatch {
    /// Zero-based batch number
    pub index: usize,
    pub designs: Vec<AcceptedDesign>,
}

impl ResultBatch {
    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }
}

/// A solved candidate with its acceptance verdict.
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub pi_c: f64,
    pub eta_ad: f64,
    pub verdict: Verdict,
    pub compressor: CompressorModel,
}

/// Grid search around a prototype compressor.
#[derive(Clone, Debug)]
pub struct MeanRadiusOptimizer {
    prototype: CompressorBuilder,
    requirements: DesignRequirements,
    grid: ParameterGrid,
    options: SearchOptions,
    total: usize,
}

impl MeanRadiusOptimizer {
    /// The prototype supplies gas, inlet state, stage plans and duct losses;
    /// the grid supplies everything else.
    pub fn new(
        prototype: CompressorBuilder,
        requirements: DesignRequirements,
        grid: ParameterGrid,
        options: SearchOptions,
    ) -> OptimizerResult<Self> {
        if prototype.stage_count() == 0 {
            return Err(OptimizerError::InvalidGrid {
                what: "prototype compressor has no stages".to_string(),
            });
        }
        requirements.validate()?;
        grid.validate()?;
        options.validate()?;
        let total = grid.total_variants()?;
        Ok(Self {
            prototype,
            requirements,
            grid,
            options,
            total,
        })
    }

    pub fn total_variants(&self) -> usize {
        self.total
    }

    pub fn stage_count(&self) -> usize {
        self.prototype.stage_count()
    }

    pub fn requirements(&self) -> &DesignRequirements {
        &self.requirements
    }

    pub fn grid(&self) -> &ParameterGrid {
        &self.grid
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Install the point's profiles on a copy of the prototype.
    pub fn candidate(&self, point: &DesignPoint) -> OptimizerResult<CompressorDesign> {
        let n = self.stage_count();
        let design = self
            .prototype
            .clone()
            .tip_speed(point.u_out_1)
            .hub_ratio(point.d_rel_1)
            .inlet_alpha(point.inlet_alpha)
            .loading(point.loading_profile(n)?)
            .efficiency(point.efficiency_profile(n)?)
            .axial_velocity(point.axial_velocity_profile(n))
            .reactivity(point.reactivity_profile(n))
            .build()?;
        Ok(design)
    }

    pub fn evaluate(&self, point: &DesignPoint) -> OptimizerResult<Evaluation> {
        let compressor = self.candidate(point)?.solve(&self.options.solver)?;
        let pi_c = compressor.pi_stag_compressor()?;
        let eta_ad = compressor.eta_ad_compressor()?;
        let verdict = self
            .requirements
            .judge(pi_c, eta_ad, &compressor.stage_pressure_ratios());
        Ok(Evaluation {
            pi_c,
            eta_ad,
            verdict,
            compressor,
        })
    }

    /// Lazily evaluate the whole grid, yielding batches of accepted designs.
    pub fn search<'a>(&'a self, sink: &'a mut dyn ProgressSink) -> CandidateSearch<'a> {
        info!(
            variants = self.total,
            stages = self.stage_count(),
            parallel = self.options.parallel,
            "starting compressor search"
        );
        CandidateSearch {
            optimizer: self,
            sink,
            tracker: ProgressTracker::new(self.total, self.options.report_every),
            next_index: 0,
            pending: VecDeque::new(),
            accepted: Vec::new(),
            batches: 0,
            done: false,
        }
    }

    fn evaluate_index(&self, index: usize) -> Option<Evaluated> {
        let point = self.grid.point(index)?;
        let result = self.evaluate(&point).map(|e| Judged {
            pi_c: e.pi_c,
            eta_ad: e.eta_ad,
            verdict: e.verdict,
            // only accepted designs keep their solved stages
            compressor: e.verdict.is_valid().then_some(e.compressor),
        });
        Some(Evaluated {
            index,
            point,
            result,
        })
    }
}

struct Judged {
    pi_c: f64,
    eta_ad: f64,
    verdict: Verdict,
    compressor: Option<CompressorModel>,
}

struct Evaluated {
    index: usize,
    point: DesignPoint,
    result: OptimizerResult<Judged>,
}

/// Iterator over result batches; see [`MeanRadiusOptimizer::search`].
pub struct CandidateSearch<'a> {
    optimizer: &'a MeanRadiusOptimizer,
    sink: &'a mut dyn ProgressSink,
    tracker: ProgressTracker,
    next_index: usize,
    pending: VecDeque<Evaluated>,
    accepted: Vec<AcceptedDesign>,
    batches: usize,
    done: bool,
}

impl CandidateSearch<'_> {
    /// Counters so far; final once the iterator is exhausted.
    pub fn progress(&self) -> SearchProgress {
        self.tracker.snapshot()
    }

    fn next_evaluated(&mut self) -> Option<Evaluated> {
        if self.pending.is_empty() {
            self.fill();
        }
        self.pending.pop_front()
    }

    fn fill(&mut self) {
        let total = self.optimizer.total;
        if self.next_index >= total {
            return;
        }
        let optimizer = self.optimizer;
        if optimizer.options.parallel {
            let end = (self.next_index + optimizer.options.block_size).min(total);
            let block: Vec<Option<Evaluated>> = (self.next_index..end)
                .into_par_iter()
                .map(|i| optimizer.evaluate_index(i))
                .collect();
            self.pending.extend(block.into_iter().flatten());
            self.next_index = end;
        } else {
            self.pending
                .extend(optimizer.evaluate_index(self.next_index));
            self.next_index += 1;
        }
    }

    fn absorb(&mut self, evaluated: Evaluated) {
        let Evaluated {
            index,
            point,
            result,
        } = evaluated;
        let outcome = match &result {
            Err(e) => {
                debug!(index, %point, error = %e, "candidate rejected");
                CandidateOutcome::Failed {
                    reason: e.to_string(),
                }
            }
            Ok(e) => CandidateOutcome::Judged {
                pi_c: e.pi_c,
                eta_ad: e.eta_ad,
                verdict: e.verdict,
            },
        };

        self.sink.on_evaluation(index, &point, &outcome);
        if let Some(report) = self.tracker.record(&outcome) {
            self.sink.on_report(&report);
        }

        if let Ok(Judged {
            pi_c,
            eta_ad,
            compressor: Some(compressor),
            ..
        }) = result
        {
            self.accepted.push(AcceptedDesign {
                index,
                point,
                pi_c,
                eta_ad,
                compressor,
            });
        }
    }

    fn flush(&mut self) -> ResultBatch {
        let designs = std::mem::take(&mut self.accepted);
        let batch = ResultBatch {
            index: self.batches,
            designs,
        };
        self.batches += 1;
        debug!(batch = batch.index, designs = batch.len(), "batch ready");
        batch
    }
}

impl Iterator for CandidateSearch<'_> {
    type Item = ResultBatch;

    fn next(&mut self) -> Option<ResultBatch> {
        if self.done {
            return None;
        }
        let chunk_size = self.optimizer.options.chunk_size;
        loop {
            if self.accepted.len() >= chunk_size {
                return Some(self.flush());
            }
            match self.next_evaluated() {
                Some(evaluated) => self.absorb(evaluated),
                None => {
                    self.done = true;
                    if let Some(report) = self.tracker.finish() {
                        self.sink.on_report(&report);
                    }
                    let p = self.tracker.snapshot();
                    info!(
                        processed = p.processed,
                        valid = p.valid,
                        failed = p.failed,
                        "compressor search finished"
                    );
                    return (!self.accepted.is_empty()).then(|| self.flush());
                }
            }
        }
    }
}
