//! Stagnation-state bookkeeping for one stage.

use std::sync::Arc;

use cf_gas::{GasModel, gdf};

use crate::error::StageResult;

/// Stagnation temperatures and pressures at the stage inlet and outlet.
#[derive(Clone, Debug)]
pub struct ThermalInfo {
    pub gas: Arc<dyn GasModel>,
    /// Inlet stagnation temperature [K]
    pub t_stag_1: f64,
    /// Outlet stagnation temperature [K]
    pub t_stag_3: f64,
    /// Inlet stagnation pressure [Pa]
    pub p_stag_1: f64,
    /// Stage stagnation pressure ratio
    pub pi_stag: f64,
}

impl ThermalInfo {
    pub fn p_stag_3(&self) -> f64 {
        self.p_stag_1 * self.pi_stag
    }

    pub fn a_crit_1(&self) -> StageResult<f64> {
        let t = self.t_stag_1;
        Ok(gdf::a_crit(self.gas.k(t), self.gas.r(), t)?)
    }

    pub fn a_crit_3(&self) -> StageResult<f64> {
        let t = self.t_stag_3;
        Ok(gdf::a_crit(self.gas.k(t), self.gas.r(), t)?)
    }

    pub fn density_stag_1(&self) -> f64 {
        self.gas.density(self.t_stag_1, self.p_stag_1)
    }

    pub fn density_stag_3(&self) -> f64 {
        self.gas.density(self.t_stag_3, self.p_stag_3())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cf_gas::Species;

    #[test]
    fn outlet_state_follows_pressure_ratio() {
        let info = ThermalInfo {
            gas: Arc::new(Species::Air.model().unwrap()),
            t_stag_1: 288.0,
            t_stag_3: 340.0,
            p_stag_1: 1.0e5,
            pi_stag: 1.6,
        };
        assert_eq!(info.p_stag_3(), 1.6e5);
        assert!(info.a_crit_3().unwrap() > info.a_crit_1().unwrap());
        let rho_1 = 1.0e5 / (287.0 * 288.0);
        assert!((info.density_stag_1() - rho_1).abs() < 1e-12);
        assert!(info.density_stag_3() > info.density_stag_1());
    }
}
