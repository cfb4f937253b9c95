//! Mean-radius solution of a single stage.
//!
//! Order of operations:
//! 1. outlet stagnation temperature and stage pressure ratio from the work input
//! 2. inlet swirl from the stage's reaction and loading
//! 3. inlet tip diameter from continuity (unless fixed externally)
//! 4. fixed point on the outlet flow angle α3 through continuity and the
//!    outlet annulus geometry
//! 5. shaft speed and the rotor-outlet triangle

use std::f64::consts::PI;
use std::sync::Arc;

use cf_core::numeric::{ensure_finite, relative_change};
use cf_gas::{GasModel, gdf};
use cf_stage::{
    AbsoluteTriangle, DiameterLaw, FlowTriangle, StageBlading, StageGeometry, StageModel,
    ThermalInfo, VelocityTriangle, mean_radius_rel, outlet_parameters,
};
use tracing::{debug, trace};

use crate::config::SolverConfig;
use crate::error::{SolverError, SolverResult, setup};

/// Everything needed to solve one stage in isolation.
#[derive(Clone, Debug)]
pub struct StageInputs {
    pub gas: Arc<dyn GasModel>,
    /// Mass flow [kg/s]
    pub mass_flow: f64,
    /// Inlet stagnation temperature [K]
    pub t_stag_1: f64,
    /// Inlet stagnation pressure [Pa]
    pub p_stag_1: f64,
    /// Rotor tip speed at the inlet [m/s]
    pub u_out_1: f64,
    /// Inlet tip diameter [m]; sized from continuity when `None`
    pub d_out_1: Option<f64>,
    pub d_rel_1: f64,
    pub law: DiameterLaw,
    pub blading: StageBlading,
    pub h_t_rel: f64,
    pub eta_ad: f64,
    pub r_mean: f64,
    pub k_h: f64,
    /// Axial velocity ratios at stations 1, 2, 3
    pub c_a_rel: [f64; 3],
    /// Reaction and loading of the following stage; they set the outlet swirl.
    pub next_r_mean: f64,
    pub next_h_t_rel: f64,
}

/// Mean-line swirl `r·(1 - R) - H/(2r)` that gives reaction `r_mean` and
/// loading `h_t_rel` at relative radius `r_rel`.
pub fn swirl_c_u_rel(r_rel: f64, r_mean: f64, h_t_rel: f64) -> f64 {
    r_rel * (1.0 - r_mean) - h_t_rel / (2.0 * r_rel)
}

/// Reduced velocity for an axial velocity ratio and flow angle.
fn reduced_velocity(c_a_rel: f64, u_out_1: f64, alpha: f64, a_crit: f64) -> f64 {
    c_a_rel * u_out_1 / (alpha.sin() * a_crit)
}

#[derive(Clone, Copy, Debug)]
struct OutletEstimate {
    d_out_3: f64,
    d_rel_3: f64,
    c_u_rel_3: f64,
    alpha_3: f64,
}

/// Solves one stage at its mean radius.
#[derive(Clone, Copy, Debug, Default)]
pub struct MeanRadiusStageSolver {
    config: SolverConfig,
}

impl MeanRadiusStageSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve stage `number` (1-based, used for diagnostics only).
    pub fn solve(&self, number: usize, inputs: &StageInputs) -> SolverResult<StageModel> {
        self.config.validate()?;
        validate_inputs(inputs)?;

        let gas = &inputs.gas;
        let u = inputs.u_out_1;
        let t1 = inputs.t_stag_1;
        let p1 = inputs.p_stag_1;
        let cp = gas.cp(t1);
        let k = gas.k(t1);
        let r = gas.r();

        // 1. work and pressure ratio
        let l_z = inputs.k_h * inputs.h_t_rel * u * u;
        let h_ad = l_z * inputs.eta_ad;
        let t3 = ensure_finite(t1 + l_z / cp, "outlet stagnation temperature")?;
        let pi_stag = ensure_finite(
            (1.0 + h_ad / (cp * t1)).powf(k / (k - 1.0)),
            "stage pressure ratio",
        )?;
        let p3 = p1 * pi_stag;

        // 2. inlet triangle
        let r_m_rel_1 = mean_radius_rel(inputs.d_rel_1);
        let c_u_rel_1 = swirl_c_u_rel(r_m_rel_1, inputs.r_mean, inputs.h_t_rel);
        let [c_a_rel_1, c_a_rel_2, c_a_rel_3] = inputs.c_a_rel;
        let alpha_1 = c_a_rel_1.atan2(c_u_rel_1);

        // 3. inlet area from continuity
        let a_crit_1 = gdf::a_crit(k, r, t1)?;
        let lambda_1 = reduced_velocity(c_a_rel_1, u, alpha_1, a_crit_1);
        let q_1 = gdf::q(lambda_1, k, r)?;
        let area_1 = ensure_finite(
            inputs.mass_flow * t1.sqrt() / p1 / (q_1 * alpha_1.sin()),
            "inlet flow area",
        )?;
        let d_out_1 = match inputs.d_out_1 {
            Some(d) => d,
            None => ensure_finite(
                (4.0 / PI * area_1 / (1.0 - inputs.d_rel_1 * inputs.d_rel_1)).sqrt(),
                "inlet tip diameter",
            )?,
        };
        let form_coef = inputs.law.form_coef(inputs.d_rel_1);

        // 4. outlet flow angle fixed point
        let a_crit_3 = gdf::a_crit(gas.k(t3), r, t3)?;
        let estimate = |alpha_3: f64| -> SolverResult<OutletEstimate> {
            let lambda_3 = reduced_velocity(c_a_rel_3, u, alpha_3, a_crit_3);
            let q_3 = gdf::q(lambda_3, k, r)?;
            // G = q·F·sin(α)·p*/sqrt(T*) at both ends
            let area_3 = area_1 * (q_1 * alpha_1.sin()) / (q_3 * alpha_3.sin()) * (p1 / p3)
                / (t1 / t3).sqrt();
            let (d_out_3, d_rel_3) =
                outlet_parameters(d_out_1, inputs.d_rel_1, area_3, form_coef)?;
            let c_u_rel_3 = swirl_c_u_rel(
                mean_radius_rel(d_rel_3),
                inputs.next_r_mean,
                inputs.next_h_t_rel,
            );
            Ok(OutletEstimate {
                d_out_3,
                d_rel_3,
                c_u_rel_3,
                alpha_3: c_a_rel_3.atan2(c_u_rel_3),
            })
        };

        let mut alpha_3 = alpha_1;
        let mut residual = f64::INFINITY;
        let mut outlet = None;
        let mut iterations = 0;
        while iterations < self.config.max_iterations {
            iterations += 1;
            let next = estimate(alpha_3)?;
            residual = relative_change(alpha_3, next.alpha_3);
            trace!(
                stage = number,
                iteration = iterations,
                alpha_3 = next.alpha_3,
                residual,
                "outlet flow angle iterate"
            );
            alpha_3 = next.alpha_3;
            if residual < self.config.eps {
                outlet = Some(next);
                break;
            }
        }
        let outlet = outlet.ok_or(SolverError::ConvergenceFailed {
            stage: number,
            iterations,
            residual,
        })?;

        // 5. shaft speed and mid-stage triangle
        let shaft_speed_rpm = 60.0 / PI * u / d_out_1;
        let geometry = StageGeometry {
            d_out_1,
            d_rel_1: inputs.d_rel_1,
            d_out_3: outlet.d_out_3,
            d_rel_3: outlet.d_rel_3,
            law: inputs.law,
        };
        let r_m_rel_2 = geometry.r_m_rel_2();
        let c_u_rel_2 = (inputs.h_t_rel + c_u_rel_1 * r_m_rel_1) / r_m_rel_2;

        let stage = StageModel {
            thermal: ThermalInfo {
                gas: Arc::clone(gas),
                t_stag_1: t1,
                t_stag_3: t3,
                p_stag_1: p1,
                pi_stag,
            },
            geometry,
            triangle_1: VelocityTriangle::from_parts(u, r_m_rel_1, c_u_rel_1, c_a_rel_1),
            triangle_2: VelocityTriangle::from_parts(u, r_m_rel_2, c_u_rel_2, c_a_rel_2),
            triangle_3: AbsoluteTriangle::from_parts(
                u,
                geometry.r_m_rel_3(),
                outlet.c_u_rel_3,
                c_a_rel_3,
            ),
            blading: inputs.blading,
            mass_flow: inputs.mass_flow,
            shaft_speed_rpm,
            u_out_1: u,
            h_t_rel: inputs.h_t_rel,
            eta_ad: inputs.eta_ad,
            r_mean: inputs.r_mean,
            k_h: inputs.k_h,
        };

        debug!(
            stage = number,
            iterations,
            pi_stag,
            d_out_1,
            d_rel_3 = outlet.d_rel_3,
            alpha_3_deg = outlet.alpha_3.to_degrees(),
            "stage solved"
        );
        Ok(stage)
    }
}

fn validate_inputs(inputs: &StageInputs) -> SolverResult<()> {
    let positive = [
        (inputs.mass_flow, "mass flow"),
        (inputs.t_stag_1, "inlet stagnation temperature"),
        (inputs.p_stag_1, "inlet stagnation pressure"),
        (inputs.u_out_1, "tip speed"),
        (inputs.h_t_rel, "loading coefficient"),
        (inputs.eta_ad, "stage efficiency"),
        (inputs.k_h, "height-loss factor"),
        (inputs.c_a_rel[0], "inlet axial velocity ratio"),
        (inputs.c_a_rel[1], "mid axial velocity ratio"),
        (inputs.c_a_rel[2], "outlet axial velocity ratio"),
    ];
    for (v, what) in positive {
        if !v.is_finite() || v <= 0.0 {
            return Err(setup(format!("{what} must be positive and finite, got {v}")));
        }
    }
    if !(inputs.d_rel_1 > 0.0 && inputs.d_rel_1 < 1.0) {
        return Err(setup(format!(
            "hub ratio must lie in (0, 1), got {}",
            inputs.d_rel_1
        )));
    }
    if let Some(d) = inputs.d_out_1 {
        if !d.is_finite() || d <= 0.0 {
            return Err(setup(format!("inlet tip diameter must be positive, got {d}")));
        }
    }
    for (v, what) in [
        (inputs.r_mean, "reaction"),
        (inputs.next_r_mean, "next-stage reaction"),
        (inputs.next_h_t_rel, "next-stage loading"),
    ] {
        if !v.is_finite() {
            return Err(setup(format!("{what} must be finite, got {v}")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_gas::Species;

    fn inputs() -> StageInputs {
        let d_rel_1 = 0.5;
        let h = 0.23;
        // axial inlet: R chosen so the mean-line swirl vanishes
        let r_m = mean_radius_rel(d_rel_1);
        StageInputs {
            gas: Arc::new(Species::Air.model().unwrap()),
            mass_flow: 128.0,
            t_stag_1: 288.0,
            p_stag_1: 1.0e5,
            u_out_1: 470.0,
            d_out_1: None,
            d_rel_1,
            law: DiameterLaw::ConstantOuter,
            blading: StageBlading::default(),
            h_t_rel: h,
            eta_ad: 0.88,
            r_mean: 1.0 - h / (2.0 * r_m * r_m),
            k_h: 0.98,
            c_a_rel: [0.5, 0.5, 0.5],
            next_r_mean: 0.55,
            next_h_t_rel: h,
        }
    }

    #[test]
    fn outlet_pressure_is_inlet_times_ratio() {
        let stage = MeanRadiusStageSolver::default().solve(1, &inputs()).unwrap();
        assert_eq!(stage.p_stag_3(), stage.p_stag_1() * stage.pi_stag());
    }

    #[test]
    fn axial_inlet_sizing() {
        let stage = MeanRadiusStageSolver::default().solve(1, &inputs()).unwrap();
        assert!(stage.triangle_1.c_u_rel.abs() < 1e-12);
        assert!((stage.pi_stag() - 1.64).abs() < 0.02, "pi = {}", stage.pi_stag());
        assert!((stage.geometry.d_out_1 - 0.99).abs() < 0.03);
        assert!(stage.geometry.d_rel_3 > 0.6 && stage.geometry.d_rel_3 < 0.8);
        // constant outer diameter law
        assert!((stage.geometry.d_out_3 - stage.geometry.d_out_1).abs() < 1e-9);
        let n = 60.0 / PI * 470.0 / stage.geometry.d_out_1;
        assert!((stage.shaft_speed_rpm - n).abs() < 1e-9);
    }

    #[test]
    fn fixed_inlet_diameter_is_kept() {
        let mut input = inputs();
        input.d_out_1 = Some(1.05);
        let stage = MeanRadiusStageSolver::default().solve(1, &input).unwrap();
        assert_eq!(stage.geometry.d_out_1, 1.05);
    }

    #[test]
    fn rotor_outlet_swirl_carries_the_work() {
        let stage = MeanRadiusStageSolver::default().solve(1, &inputs()).unwrap();
        let t1 = stage.triangle_1;
        let t2 = stage.triangle_2;
        let moment = t2.c_u_rel * t2.r_m_rel - t1.c_u_rel * t1.r_m_rel;
        assert!((moment - 0.23).abs() < 1e-12);
    }

    #[test]
    fn iteration_cap_is_enforced() {
        let solver = MeanRadiusStageSolver::new(SolverConfig {
            eps: 0.01,
            max_iterations: 1,
        });
        // the first iterate moves α3 away from the axial guess by far more than 1 %
        let err = solver.solve(3, &inputs()).unwrap_err();
        assert!(matches!(
            err,
            SolverError::ConvergenceFailed {
                stage: 3,
                iterations: 1,
                ..
            }
        ));
    }

    #[test]
    fn rejects_bad_inputs() {
        let mut bad = inputs();
        bad.d_rel_1 = 1.0;
        assert!(matches!(
            MeanRadiusStageSolver::default().solve(1, &bad),
            Err(SolverError::ProblemSetup { .. })
        ));
        let mut bad = inputs();
        bad.mass_flow = f64::NAN;
        assert!(MeanRadiusStageSolver::default().solve(1, &bad).is_err());
    }

    #[test]
    fn swirl_helper_matches_reaction_definition() {
        // R = 1 - (c_u1 + c_u2)/(2r) with c_u2 - c_u1 = H/r at constant radius
        let (r, big_r, h) = (0.8, 0.6, 0.25);
        let c_u1 = swirl_c_u_rel(r, big_r, h);
        let c_u2 = c_u1 + h / r;
        assert!((1.0 - (c_u1 + c_u2) / (2.0 * r) - big_r).abs() < 1e-12);
    }
}
