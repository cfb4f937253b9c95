//! Per-stage summary table of a solved compressor.

use cf_stage::{FlowTriangle, StageModel};

use crate::error::SolverResult;

/// One row of the stage table. Angles are in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct StageSummary {
    /// 1-based stage number
    pub number: usize,
    pub d_out_1: f64,
    pub d_rel_1: f64,
    pub pi_stag: f64,
    pub r_mean: f64,
    pub c_a_rel_2: f64,
    pub c_u_rel_2: f64,
    pub u_out_1: f64,
    pub c_a: f64,
    pub w_u_1: f64,
    pub c_u_3: f64,
    pub shaft_speed_rpm: f64,
    pub beta_1: f64,
    pub beta_2: f64,
    pub delta_beta: f64,
    pub alpha_2: f64,
    pub alpha_3: f64,
    pub delta_alpha: f64,
    pub mach_w_1: f64,
    pub mach_c_2: f64,
    pub rotor_lattice_density: Option<f64>,
    pub stator_lattice_density: Option<f64>,
    pub rotor_blade_number: Option<f64>,
    pub stator_blade_number: Option<f64>,
}

impl StageSummary {
    pub const HEADERS: [&'static str; 20] = [
        "stage", "D_out_1", "d_rel_1", "pi_stag", "R_mean", "c_a_rel_2", "c_u_rel_2", "u_out_1",
        "c_a", "w_u_1", "c_u_3", "n", "beta_1", "beta_2", "d_beta", "alpha_2", "alpha_3",
        "d_alpha", "M_w_1", "M_c_2",
    ];

    /// Numeric columns in `HEADERS` order (stage number excluded).
    pub fn values(&self) -> [f64; 19] {
        [
            self.d_out_1,
            self.d_rel_1,
            self.pi_stag,
            self.r_mean,
            self.c_a_rel_2,
            self.c_u_rel_2,
            self.u_out_1,
            self.c_a,
            self.w_u_1,
            self.c_u_3,
            self.shaft_speed_rpm,
            self.beta_1,
            self.beta_2,
            self.delta_beta,
            self.alpha_2,
            self.alpha_3,
            self.delta_alpha,
            self.mach_w_1,
            self.mach_c_2,
        ]
    }
}

pub fn stage_summary(stages: &[StageModel]) -> SolverResult<Vec<StageSummary>> {
    stages
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let beta_1 = s.triangle_1.beta().to_degrees();
            let beta_2 = s.triangle_2.beta().to_degrees();
            let alpha_2 = s.triangle_2.alpha().to_degrees();
            let alpha_3 = s.triangle_3.alpha().to_degrees();
            let rotor = s.rotor_geometry();
            let stator = s.stator_geometry();
            Ok(StageSummary {
                number: i + 1,
                d_out_1: s.geometry.d_out_1,
                d_rel_1: s.geometry.d_rel_1,
                pi_stag: s.pi_stag(),
                r_mean: s.r_mean,
                c_a_rel_2: s.triangle_2.c_a_rel,
                c_u_rel_2: s.triangle_2.c_u_rel,
                u_out_1: s.u_out_1,
                c_a: s.triangle_1.c_a(),
                w_u_1: s.triangle_1.w_u(),
                c_u_3: s.triangle_3.c_u(),
                shaft_speed_rpm: s.shaft_speed_rpm,
                beta_1,
                beta_2,
                delta_beta: beta_2 - beta_1,
                alpha_2,
                alpha_3,
                delta_alpha: alpha_3 - alpha_2,
                mach_w_1: s.mach_w_1()?,
                mach_c_2: s.mach_c_2()?,
                rotor_lattice_density: rotor.map(|r| r.params.mean_lattice_density),
                stator_lattice_density: stator.map(|r| r.params.mean_lattice_density),
                rotor_blade_number: rotor.map(|r| r.blade_number()),
                stator_blade_number: stator.map(|r| r.blade_number()),
            })
        })
        .collect()
}
