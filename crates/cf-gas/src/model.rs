//! Gas property model trait and the power-law gas.

use std::fmt;

/// Trait for working-fluid property models.
///
/// Implementations must be thread-safe (Send + Sync) so that solved stages
/// can be shared across parallel candidate evaluations. Temperatures are
/// stagnation or static temperatures in K, pressures in Pa.
pub trait GasModel: Send + Sync + fmt::Debug {
    /// Display name.
    fn name(&self) -> &str;

    /// Specific gas constant [J/(kg·K)].
    fn r(&self) -> f64;

    /// Isobaric heat capacity [J/(kg·K)].
    fn cp(&self, t: f64) -> f64;

    /// Thermal conductivity [W/(m·K)].
    fn conductivity(&self, t: f64) -> f64;

    /// Dynamic viscosity [Pa·s].
    fn viscosity(&self, t: f64) -> f64;

    /// Density from the ideal-gas law [kg/m³].
    fn density(&self, t: f64, p: f64) -> f64 {
        p / (self.r() * t)
    }

    /// Kinematic viscosity [m²/s].
    fn kinematic_viscosity(&self, t: f64, p: f64) -> f64 {
        self.viscosity(t) / self.density(t, p)
    }

    /// Prandtl number cp·μ/λ.
    fn prandtl(&self, t: f64) -> f64 {
        self.cp(t) * self.viscosity(t) / self.conductivity(t)
    }

    /// Heat-capacity ratio k = cp / (cp - R).
    fn k(&self, t: f64) -> f64 {
        let cp = self.cp(t);
        cp / (cp - self.r())
    }
}

/// Gas with constant heat capacity and power-law transport properties:
/// `λ(T) = λ0·(T/T0)^n`, `μ(T) = μ0·(T/T0)^m`.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerLawGas {
    pub name: String,
    /// Gas constant [J/(kg·K)]
    pub r: f64,
    /// Reference temperature of the transport fits [K]
    pub t_ref: f64,
    /// Conductivity at `t_ref` [W/(m·K)]
    pub conductivity_ref: f64,
    /// Viscosity at `t_ref` [Pa·s]
    pub viscosity_ref: f64,
    /// Heat capacity [J/(kg·K)]
    pub cp: f64,
    /// Conductivity exponent
    pub conductivity_exp: f64,
    /// Viscosity exponent
    pub viscosity_exp: f64,
}

impl GasModel for PowerLawGas {
    fn name(&self) -> &str {
        &self.name
    }

    fn r(&self) -> f64 {
        self.r
    }

    fn cp(&self, _t: f64) -> f64 {
        self.cp
    }

    fn conductivity(&self, t: f64) -> f64 {
        self.conductivity_ref * (t / self.t_ref).powf(self.conductivity_exp)
    }

    fn viscosity(&self, t: f64) -> f64 {
        self.viscosity_ref * (t / self.t_ref).powf(self.viscosity_exp)
    }
}
