//! Compressor definition, builder and solved model.
//!
//! `CompressorBuilder` accumulates configuration, `build()` validates it into
//! an immutable `CompressorDesign`, and `CompressorDesign::solve()` produces a
//! `CompressorModel` holding the solved stages.

use std::sync::Arc;

use cf_core::units::{MassRate, Pressure, Temperature};
use cf_gas::{GasModel, gdf};
use cf_stage::{AbsoluteTriangle, DiameterLaw, StageBlading, StageModel, VelocityTriangle};

use crate::compressor_solver::MeanRadiusCompressorSolver;
use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult, setup};
use crate::summary::{StageSummary, stage_summary};

/// Default total-pressure loss coefficient of the inlet and outlet ducts.
pub const DEFAULT_DUCT_LOSS: f64 = 0.04;
/// Height-loss factor of the first stage.
pub const DEFAULT_K_H: f64 = 0.98;

/// Stagnation state and mass flow at the compressor face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InletConditions {
    pub mass_flow: MassRate,
    pub t_stag: Temperature,
    pub p_stag: Pressure,
}

/// Per-stage structural choices (what the stage *is*, not its targets).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StagePlan {
    pub law: DiameterLaw,
    pub blading: StageBlading,
}

/// Accumulates a compressor definition.
#[derive(Clone, Debug)]
pub struct CompressorBuilder {
    gas: Arc<dyn GasModel>,
    inlet: Option<InletConditions>,
    stages: Vec<StagePlan>,
    u_out_1: Option<f64>,
    d_rel_1: Option<f64>,
    d_out_1: Option<f64>,
    inlet_alpha: f64,
    h_t_rel: Vec<f64>,
    eta_ad: Vec<f64>,
    r_mean: Vec<f64>,
    c_a_rel: Vec<f64>,
    dzeta_in: f64,
    dzeta_out: f64,
    k_h: f64,
}

impl CompressorBuilder {
    pub fn new(gas: Arc<dyn GasModel>) -> Self {
        Self {
            gas,
            inlet: None,
            stages: Vec::new(),
            u_out_1: None,
            d_rel_1: None,
            d_out_1: None,
            inlet_alpha: std::f64::consts::FRAC_PI_2,
            h_t_rel: Vec::new(),
            eta_ad: Vec::new(),
            r_mean: Vec::new(),
            c_a_rel: Vec::new(),
            dzeta_in: DEFAULT_DUCT_LOSS,
            dzeta_out: DEFAULT_DUCT_LOSS,
            k_h: DEFAULT_K_H,
        }
    }

    pub fn inlet(mut self, inlet: InletConditions) -> Self {
        self.inlet = Some(inlet);
        self
    }

    pub fn stage(mut self, plan: StagePlan) -> Self {
        self.stages.push(plan);
        self
    }

    pub fn stages(mut self, plans: impl IntoIterator<Item = StagePlan>) -> Self {
        self.stages.extend(plans);
        self
    }

    /// Rotor tip speed of the first stage [m/s].
    pub fn tip_speed(mut self, u_out_1: f64) -> Self {
        self.u_out_1 = Some(u_out_1);
        self
    }

    /// Hub ratio at the first rotor inlet.
    pub fn hub_ratio(mut self, d_rel_1: f64) -> Self {
        self.d_rel_1 = Some(d_rel_1);
        self
    }

    /// Fix the first-stage tip diameter instead of sizing it from continuity.
    pub fn inlet_diameter(mut self, d_out_1: Option<f64>) -> Self {
        self.d_out_1 = d_out_1;
        self
    }

    /// Absolute flow angle at the compressor face [rad]; π/2 is axial.
    pub fn inlet_alpha(mut self, alpha: f64) -> Self {
        self.inlet_alpha = alpha;
        self
    }

    pub fn loading(mut self, h_t_rel: Vec<f64>) -> Self {
        self.h_t_rel = h_t_rel;
        self
    }

    pub fn efficiency(mut self, eta_ad: Vec<f64>) -> Self {
        self.eta_ad = eta_ad;
        self
    }

    pub fn reactivity(mut self, r_mean: Vec<f64>) -> Self {
        self.r_mean = r_mean;
        self
    }

    pub fn axial_velocity(mut self, c_a_rel: Vec<f64>) -> Self {
        self.c_a_rel = c_a_rel;
        self
    }

    pub fn duct_losses(mut self, dzeta_in: f64, dzeta_out: f64) -> Self {
        self.dzeta_in = dzeta_in;
        self.dzeta_out = dzeta_out;
        self
    }

    pub fn height_loss_factor(mut self, k_h: f64) -> Self {
        self.k_h = k_h;
        self
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn gas(&self) -> &Arc<dyn GasModel> {
        &self.gas
    }

    /// Validate and freeze the definition.
    pub fn build(self) -> SolverResult<CompressorDesign> {
        let n = self.stages.len();
        if n == 0 {
            return Err(setup("compressor needs at least one stage"));
        }
        let inlet = self.inlet.ok_or_else(|| setup("inlet conditions not set"))?;
        let u_out_1 = self.u_out_1.ok_or_else(|| setup("tip speed not set"))?;
        let d_rel_1 = self.d_rel_1.ok_or_else(|| setup("hub ratio not set"))?;

        for (v, what) in [
            (inlet.mass_flow.value, "mass flow"),
            (inlet.t_stag.value, "inlet stagnation temperature"),
            (inlet.p_stag.value, "inlet stagnation pressure"),
            (u_out_1, "tip speed"),
            (self.k_h, "height-loss factor"),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(setup(format!("{what} must be positive, got {v}")));
            }
        }
        if !(d_rel_1 > 0.0 && d_rel_1 < 1.0) {
            return Err(setup(format!("hub ratio must lie in (0, 1), got {d_rel_1}")));
        }
        if let Some(d) = self.d_out_1 {
            if !d.is_finite() || d <= 0.0 {
                return Err(setup(format!("inlet tip diameter must be positive, got {d}")));
            }
        }
        if !(self.inlet_alpha > 0.0 && self.inlet_alpha < std::f64::consts::PI) {
            return Err(setup(format!(
                "inlet flow angle must lie in (0, pi), got {}",
                self.inlet_alpha
            )));
        }
        for (v, what) in [(self.dzeta_in, "inlet duct loss"), (self.dzeta_out, "outlet duct loss")] {
            if !v.is_finite() || v < 0.0 {
                return Err(setup(format!("{what} must be non-negative, got {v}")));
            }
        }
        for (list, what) in [
            (&self.h_t_rel, "loading"),
            (&self.eta_ad, "efficiency"),
            (&self.r_mean, "reactivity"),
            (&self.c_a_rel, "axial velocity"),
        ] {
            if list.len() != n {
                return Err(setup(format!(
                    "{what} list has {} entries for {n} stages",
                    list.len()
                )));
            }
            if let Some(v) = list.iter().find(|v| !v.is_finite()) {
                return Err(setup(format!("{what} list contains non-finite value {v}")));
            }
        }
        if let Some(eta) = self.eta_ad.iter().find(|e| **e <= 0.0 || **e > 1.0) {
            return Err(setup(format!("stage efficiency must lie in (0, 1], got {eta}")));
        }

        Ok(CompressorDesign {
            gas: self.gas,
            inlet,
            stages: self.stages,
            u_out_1,
            d_rel_1,
            d_out_1: self.d_out_1,
            inlet_alpha: self.inlet_alpha,
            h_t_rel: self.h_t_rel,
            eta_ad: self.eta_ad,
            r_mean: self.r_mean,
            c_a_rel: self.c_a_rel,
            dzeta_in: self.dzeta_in,
            dzeta_out: self.dzeta_out,
            k_h: self.k_h,
        })
    }
}

/// Validated, immutable compressor definition.
#[derive(Clone, Debug)]
pub struct CompressorDesign {
    pub(crate) gas: Arc<dyn GasModel>,
    pub(crate) inlet: InletConditions,
    pub(crate) stages: Vec<StagePlan>,
    pub(crate) u_out_1: f64,
    pub(crate) d_rel_1: f64,
    pub(crate) d_out_1: Option<f64>,
    pub(crate) inlet_alpha: f64,
    pub(crate) h_t_rel: Vec<f64>,
    pub(crate) eta_ad: Vec<f64>,
    pub(crate) r_mean: Vec<f64>,
    pub(crate) c_a_rel: Vec<f64>,
    pub(crate) dzeta_in: f64,
    pub(crate) dzeta_out: f64,
    pub(crate) k_h: f64,
}

impl CompressorDesign {
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn gas(&self) -> &Arc<dyn GasModel> {
        &self.gas
    }

    pub fn inlet(&self) -> &InletConditions {
        &self.inlet
    }

    pub fn stage_plans(&self) -> &[StagePlan] {
        &self.stages
    }

    pub fn tip_speed(&self) -> f64 {
        self.u_out_1
    }

    pub fn hub_ratio(&self) -> f64 {
        self.d_rel_1
    }

    pub fn inlet_alpha(&self) -> f64 {
        self.inlet_alpha
    }

    pub fn loading(&self) -> &[f64] {
        &self.h_t_rel
    }

    pub fn efficiency(&self) -> &[f64] {
        &self.eta_ad
    }

    pub fn reactivity(&self) -> &[f64] {
        &self.r_mean
    }

    pub fn axial_velocity(&self) -> &[f64] {
        &self.c_a_rel
    }

    pub fn duct_losses(&self) -> (f64, f64) {
        (self.dzeta_in, self.dzeta_out)
    }

    pub fn height_loss_factor(&self) -> f64 {
        self.k_h
    }

    /// Mean-line reaction of the first stage implied by the inlet flow angle:
    /// `R = 1 - c_a/(r·tan α) - H/(2r²)`.
    pub fn first_stage_reactivity(&self) -> f64 {
        let r = cf_stage::mean_radius_rel(self.d_rel_1);
        let (sin, cos) = self.inlet_alpha.sin_cos();
        1.0 - self.c_a_rel[0] * cos / (r * sin) - self.h_t_rel[0] / (2.0 * r * r)
    }

    /// Solve all stages front to back.
    pub fn solve(&self, config: &SolverConfig) -> SolverResult<CompressorModel> {
        let stages = MeanRadiusCompressorSolver::new(*config).solve(self)?;
        Ok(CompressorModel {
            design: self.clone(),
            stages,
        })
    }
}

/// A solved compressor: the design plus its ordered stages.
#[derive(Clone, Debug)]
pub struct CompressorModel {
    design: CompressorDesign,
    stages: Vec<StageModel>,
}

impl CompressorModel {
    pub fn design(&self) -> &CompressorDesign {
        &self.design
    }

    pub fn stages(&self) -> &[StageModel] {
        &self.stages
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn first_stage(&self) -> &StageModel {
        &self.stages[0]
    }

    pub fn last_stage(&self) -> &StageModel {
        &self.stages[self.stages.len() - 1]
    }

    /// Stage by 1-based number.
    pub fn stage(&self, number: usize) -> SolverResult<&StageModel> {
        number
            .checked_sub(1)
            .and_then(|i| self.stages.get(i))
            .ok_or_else(|| {
                setup(format!(
                    "stage number {number} outside 1..={}",
                    self.stages.len()
                ))
            })
    }

    /// Inlet duct total-pressure recovery.
    pub fn sigma_in(&self) -> SolverResult<f64> {
        let first = self.first_stage();
        let lambda = first.lambda_c_1()?;
        let k = first.k();
        let eps = gdf::epsilon(lambda, k)?;
        Ok(1.0 / (1.0 + self.design.dzeta_in * k / (k + 1.0) * eps * lambda * lambda))
    }

    /// Outlet duct total-pressure recovery.
    pub fn sigma_out(&self) -> SolverResult<f64> {
        let lambda = self.last_stage().lambda_c_3()?;
        let k = self.first_stage().k();
        let eps = gdf::epsilon(lambda, k)?;
        Ok(1.0 - self.design.dzeta_out * k / (k + 1.0) * eps * lambda * lambda)
    }

    pub fn pi_stag_blading(&self) -> f64 {
        self.stages.iter().map(|s| s.pi_stag()).product()
    }

    pub fn pi_stag_compressor(&self) -> SolverResult<f64> {
        Ok(self.pi_stag_blading() * self.sigma_in()? * self.sigma_out()?)
    }

    fn adiabatic_efficiency(&self, pi: f64) -> f64 {
        let t_in = self.first_stage().t_stag_1();
        let t_out = self.last_stage().t_stag_3();
        let k = self.first_stage().k();
        t_in / (t_out - t_in) * (pi.powf((k - 1.0) / k) - 1.0)
    }

    pub fn eta_ad_blading(&self) -> f64 {
        self.adiabatic_efficiency(self.pi_stag_blading())
    }

    /// Overall adiabatic efficiency including duct losses; must be below 1.
    pub fn eta_ad_compressor(&self) -> SolverResult<f64> {
        bounded_efficiency(self.adiabatic_efficiency(self.pi_stag_compressor()?))
    }

    pub fn stage_pressure_ratios(&self) -> Vec<f64> {
        self.stages.iter().map(|s| s.pi_stag()).collect()
    }

    pub fn outer_diameters(&self) -> Vec<f64> {
        self.stages.iter().map(|s| s.geometry.d_out_1).collect()
    }

    pub fn hub_ratios(&self) -> Vec<f64> {
        self.stages.iter().map(|s| s.geometry.d_rel_1).collect()
    }

    pub fn rotor_inlet_triangle(&self, number: usize, h_rel: f64) -> SolverResult<VelocityTriangle> {
        Ok(self.stage(number)?.rotor_inlet_triangle(h_rel)?)
    }

    pub fn rotor_outlet_triangle(
        &self,
        number: usize,
        h_rel: f64,
    ) -> SolverResult<VelocityTriangle> {
        Ok(self.stage(number)?.rotor_outlet_triangle(h_rel)?)
    }

    pub fn stator_inlet_triangle(
        &self,
        number: usize,
        h_rel: f64,
    ) -> SolverResult<VelocityTriangle> {
        Ok(self.stage(number)?.stator_inlet_triangle(h_rel)?)
    }

    pub fn stator_outlet_triangle(
        &self,
        number: usize,
        h_rel: f64,
    ) -> SolverResult<AbsoluteTriangle> {
        Ok(self.stage(number)?.stator_outlet_triangle(h_rel)?)
    }

    /// Per-stage table of the main design quantities.
    pub fn summary(&self) -> SolverResult<Vec<StageSummary>> {
        stage_summary(&self.stages)
    }
}

fn bounded_efficiency(eta_ad: f64) -> SolverResult<f64> {
    if eta_ad.is_nan() || eta_ad >= 1.0 {
        return Err(SolverError::EfficiencyBound { eta_ad });
    }
    Ok(eta_ad)
}
