//! Front-to-back propagation of the stage solver through a compressor.

use std::f64::consts::PI;
use std::sync::Arc;

use cf_stage::StageModel;
use tracing::debug;

use crate::compressor::CompressorDesign;
use crate::config::SolverConfig;
use crate::error::SolverResult;
use crate::stage_solver::{MeanRadiusStageSolver, StageInputs};

/// Per-stage decrement of the height-loss factor.
pub const K_H_STEP: f64 = 0.005;
/// The height-loss factor is not decremented below this value.
pub const K_H_FLOOR: f64 = 0.95;

/// Height-loss factor of the stage following one with `k_h`.
pub fn next_height_loss_factor(k_h: f64) -> f64 {
    if k_h > K_H_FLOOR {
        (k_h - K_H_STEP).max(K_H_FLOOR)
    } else {
        k_h
    }
}

/// Solves stages sequentially; each stage inherits the previous outlet state.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeanRadiusCompressorSolver {
    stage_solver: MeanRadiusStageSolver,
}

impl MeanRadiusCompressorSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            stage_solver: MeanRadiusStageSolver::new(config),
        }
    }

    pub fn solve(&self, design: &CompressorDesign) -> SolverResult<Vec<StageModel>> {
        let n = design.stage_count();
        let mut stages: Vec<StageModel> = Vec::with_capacity(n);

        for i in 0..n {
            let inputs = match stages.last() {
                None => first_stage_inputs(design),
                Some(prev) => next_stage_inputs(design, prev, i),
            };
            let stage = self.stage_solver.solve(i + 1, &inputs)?;
            stages.push(stage);
        }

        debug!(
            stages = n,
            pi_blading = stages.iter().map(|s| s.pi_stag()).product::<f64>(),
            "compressor solved"
        );
        Ok(stages)
    }
}

/// Targets that depend only on the stage index; the last stage reuses its
/// own values where a following stage would be consulted.
fn targets(design: &CompressorDesign, i: usize) -> ([f64; 3], f64, f64) {
    let j = (i + 1).min(design.stage_count() - 1);
    let c_a = &design.c_a_rel;
    (
        [c_a[i], (c_a[i] + c_a[j]) / 2.0, c_a[j]],
        design.r_mean[j],
        design.h_t_rel[j],
    )
}

fn first_stage_inputs(design: &CompressorDesign) -> StageInputs {
    let (c_a_rel, next_r_mean, next_h_t_rel) = targets(design, 0);
    let plan = design.stages[0];
    StageInputs {
        gas: Arc::clone(&design.gas),
        mass_flow: design.inlet.mass_flow.value,
        t_stag_1: design.inlet.t_stag.value,
        p_stag_1: design.inlet.p_stag.value,
        u_out_1: design.u_out_1,
        d_out_1: design.d_out_1,
        d_rel_1: design.d_rel_1,
        law: plan.law,
        blading: plan.blading,
        h_t_rel: design.h_t_rel[0],
        eta_ad: design.eta_ad[0],
        r_mean: design.first_stage_reactivity(),
        k_h: design.k_h,
        c_a_rel,
        next_r_mean,
        next_h_t_rel,
    }
}

fn next_stage_inputs(design: &CompressorDesign, prev: &StageModel, i: usize) -> StageInputs {
    let (c_a_rel, next_r_mean, next_h_t_rel) = targets(design, i);
    let plan = design.stages[i];
    // constant shaft speed: the tip speed scales with the tip diameter
    let u_out_1 = PI / 60.0 * prev.shaft_speed_rpm * prev.geometry.d_out_3;
    StageInputs {
        gas: Arc::clone(&prev.thermal.gas),
        mass_flow: prev.mass_flow,
        t_stag_1: prev.t_stag_3(),
        p_stag_1: prev.p_stag_3(),
        u_out_1,
        d_out_1: Some(prev.geometry.d_out_3),
        d_rel_1: prev.geometry.d_rel_3,
        law: plan.law,
        blading: plan.blading,
        h_t_rel: design.h_t_rel[i],
        eta_ad: design.eta_ad[i],
        r_mean: design.r_mean[i],
        k_h: next_height_loss_factor(prev.k_h),
        c_a_rel,
        next_r_mean,
        next_h_t_rel,
    }
}
