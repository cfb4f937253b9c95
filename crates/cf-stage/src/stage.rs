//! Solved stage: thermodynamics, geometry and mean-line triangles.

use cf_core::units::{AngularVelocity, Length, MassRate, kgps, m, rpm};
use cf_gas::gdf;

use crate::blading::{BladeRowParams, BladingGeometry};
use crate::error::StageResult;
use crate::geometry::StageGeometry;
use crate::thermal::ThermalInfo;
use crate::triangle::{AbsoluteTriangle, FlowTriangle, VelocityTriangle};
use crate::velocity_law::{VelocityLaw, VelocityLawKind};

/// Spanwise twist laws and optional blade-row parameters of a stage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StageBlading {
    pub rotor_law: VelocityLawKind,
    pub stator_law: VelocityLawKind,
    pub rotor_row: Option<BladeRowParams>,
    pub stator_row: Option<BladeRowParams>,
}

/// One solved compressor stage.
///
/// Built once by the stage solver and read-only afterwards. Triangle 1 is the
/// rotor inlet, 2 the rotor outlet / stator inlet, 3 the stator outlet.
#[derive(Clone, Debug)]
pub struct StageModel {
    pub thermal: ThermalInfo,
    pub geometry: StageGeometry,
    pub triangle_1: VelocityTriangle,
    pub triangle_2: VelocityTriangle,
    pub triangle_3: AbsoluteTriangle,
    pub blading: StageBlading,
    /// Mass flow [kg/s]
    pub mass_flow: f64,
    /// Shaft speed [rpm]
    pub shaft_speed_rpm: f64,
    /// Rotor tip speed at the inlet [m/s]
    pub u_out_1: f64,
    /// Loading coefficient H_t / u²
    pub h_t_rel: f64,
    /// Adiabatic efficiency of the stage
    pub eta_ad: f64,
    /// Degree of reaction at the mean line
    pub r_mean: f64,
    /// Work input (height-loss) factor
    pub k_h: f64,
}

impl StageModel {
    pub fn mass_flow(&self) -> MassRate {
        kgps(self.mass_flow)
    }

    pub fn shaft_speed(&self) -> AngularVelocity {
        rpm(self.shaft_speed_rpm)
    }

    pub fn tip_diameter(&self) -> Length {
        m(self.geometry.d_out_1)
    }

    pub fn t_stag_1(&self) -> f64 {
        self.thermal.t_stag_1
    }

    pub fn t_stag_3(&self) -> f64 {
        self.thermal.t_stag_3
    }

    pub fn p_stag_1(&self) -> f64 {
        self.thermal.p_stag_1
    }

    pub fn p_stag_3(&self) -> f64 {
        self.thermal.p_stag_3()
    }

    pub fn pi_stag(&self) -> f64 {
        self.thermal.pi_stag
    }

    /// Theoretical head [J/kg].
    pub fn h_t(&self) -> f64 {
        self.h_t_rel * self.u_out_1 * self.u_out_1
    }

    /// Work input [J/kg].
    pub fn l_z(&self) -> f64 {
        self.k_h * self.h_t()
    }

    /// Adiabatic head [J/kg].
    pub fn h_ad(&self) -> f64 {
        self.l_z() * self.eta_ad
    }

    pub fn cp(&self) -> f64 {
        self.thermal.gas.cp(self.thermal.t_stag_1)
    }

    pub fn k(&self) -> f64 {
        self.thermal.gas.k(self.thermal.t_stag_1)
    }

    pub fn r(&self) -> f64 {
        self.thermal.gas.r()
    }

    pub fn lambda_c_1(&self) -> StageResult<f64> {
        Ok(self.triangle_1.c_total() / self.thermal.a_crit_1()?)
    }

    pub fn lambda_w_1(&self) -> StageResult<f64> {
        Ok(self.triangle_1.w_total() / self.thermal.a_crit_1()?)
    }

    pub fn lambda_c_2(&self) -> StageResult<f64> {
        Ok(self.triangle_2.c_total() / self.thermal.a_crit_3()?)
    }

    pub fn lambda_w_2(&self) -> StageResult<f64> {
        Ok(self.triangle_2.w_total() / self.thermal.a_crit_3()?)
    }

    pub fn lambda_c_3(&self) -> StageResult<f64> {
        Ok(self.triangle_3.c_total() / self.thermal.a_crit_3()?)
    }

    pub fn mach_c_1(&self) -> StageResult<f64> {
        Ok(gdf::mach(self.lambda_c_1()?, self.k())?)
    }

    pub fn mach_w_1(&self) -> StageResult<f64> {
        Ok(gdf::mach(self.lambda_w_1()?, self.k())?)
    }

    pub fn mach_c_2(&self) -> StageResult<f64> {
        Ok(gdf::mach(self.lambda_c_2()?, self.k())?)
    }

    pub fn mach_w_2(&self) -> StageResult<f64> {
        Ok(gdf::mach(self.lambda_w_2()?, self.k())?)
    }

    pub fn mach_c_3(&self) -> StageResult<f64> {
        Ok(gdf::mach(self.lambda_c_3()?, self.k())?)
    }

    /// Relative radius at relative height `h_rel` for hub ratio `d_rel`.
    pub fn r_rel(h_rel: f64, d_rel: f64) -> f64 {
        d_rel + h_rel * (1.0 - d_rel)
    }

    fn rotor_law(&self) -> StageResult<VelocityLaw> {
        self.blading.rotor_law.resolve(self.r_mean, self.h_t_rel)
    }

    fn stator_law(&self) -> StageResult<VelocityLaw> {
        self.blading.stator_law.resolve(self.r_mean, self.h_t_rel)
    }

    pub fn rotor_inlet_triangle(&self, h_rel: f64) -> StageResult<VelocityTriangle> {
        let r = Self::r_rel(h_rel, self.geometry.d_rel_1);
        self.rotor_law()?.inlet_triangle(&self.triangle_1, r)
    }

    pub fn rotor_outlet_triangle(&self, h_rel: f64) -> StageResult<VelocityTriangle> {
        let r = Self::r_rel(h_rel, self.geometry.d_rel_2());
        self.rotor_law()?.outlet_triangle(&self.triangle_2, r)
    }

    pub fn stator_inlet_triangle(&self, h_rel: f64) -> StageResult<VelocityTriangle> {
        let r = Self::r_rel(h_rel, self.geometry.d_rel_2());
        self.stator_law()?.inlet_triangle(&self.triangle_2, r)
    }

    pub fn stator_outlet_triangle(&self, h_rel: f64) -> StageResult<AbsoluteTriangle> {
        let r = Self::r_rel(h_rel, self.geometry.d_rel_3);
        self.stator_law()?.outlet_triangle(&self.triangle_3, r)
    }

    pub fn rotor_geometry(&self) -> Option<BladingGeometry> {
        self.blading
            .rotor_row
            .map(|params| self.geometry.rotor_blading(params))
    }

    pub fn stator_geometry(&self) -> Option<BladingGeometry> {
        self.blading
            .stator_row
            .map(|params| self.geometry.stator_blading(params))
    }
}
