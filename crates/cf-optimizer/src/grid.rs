//! Cartesian design-parameter grid.

use std::fmt;

use crate::error::{OptimizerError, OptimizerResult};
use crate::shape::{linear_profile, parabolic_profile};

/// Axis names in enumeration order; the last axis varies fastest.
pub const AXIS_NAMES: [&str; 15] = [
    "u_out_1",
    "d_rel_1",
    "H_t_rel_first",
    "H_t_rel_last",
    "H_t_rel_max",
    "H_t_rel_max_coord",
    "eta_ad_first",
    "eta_ad_last",
    "eta_ad_max",
    "eta_ad_max_coord",
    "c_a_rel_first",
    "c_a_rel_last",
    "R_mean_first",
    "R_mean_last",
    "inlet_alpha",
];

/// Candidate values for every swept design parameter.
///
/// `inlet_alpha` is in radians.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterGrid {
    pub u_out_1: Vec<f64>,
    pub d_rel_1: Vec<f64>,
    pub h_t_rel_first: Vec<f64>,
    pub h_t_rel_last: Vec<f64>,
    pub h_t_rel_max: Vec<f64>,
    pub h_t_rel_max_coord: Vec<f64>,
    pub eta_ad_first: Vec<f64>,
    pub eta_ad_last: Vec<f64>,
    pub eta_ad_max: Vec<f64>,
    pub eta_ad_max_coord: Vec<f64>,
    pub c_a_rel_first: Vec<f64>,
    pub c_a_rel_last: Vec<f64>,
    pub r_mean_first: Vec<f64>,
    pub r_mean_last: Vec<f64>,
    pub inlet_alpha: Vec<f64>,
}

impl ParameterGrid {
    /// Axes in `AXIS_NAMES` order.
    pub fn axes(&self) -> [&[f64]; 15] {
        [
            &self.u_out_1,
            &self.d_rel_1,
            &self.h_t_rel_first,
            &self.h_t_rel_last,
            &self.h_t_rel_max,
            &self.h_t_rel_max_coord,
            &self.eta_ad_first,
            &self.eta_ad_last,
            &self.eta_ad_max,
            &self.eta_ad_max_coord,
            &self.c_a_rel_first,
            &self.c_a_rel_last,
            &self.r_mean_first,
            &self.r_mean_last,
            &self.inlet_alpha,
        ]
    }

    /// Number of grid points; zero if any axis is empty.
    pub fn total_variants(&self) -> OptimizerResult<usize> {
        self.axes().iter().try_fold(1usize, |acc, axis| {
            acc.checked_mul(axis.len())
                .ok_or_else(|| OptimizerError::InvalidGrid {
                    what: "number of variants overflows usize".to_string(),
                })
        })
    }

    pub fn validate(&self) -> OptimizerResult<()> {
        for (axis, name) in self.axes().iter().zip(AXIS_NAMES) {
            if axis.is_empty() {
                return Err(OptimizerError::InvalidGrid {
                    what: format!("axis {name} has no values"),
                });
            }
            if let Some(v) = axis.iter().find(|v| !v.is_finite()) {
                return Err(OptimizerError::InvalidGrid {
                    what: format!("axis {name} contains non-finite value {v}"),
                });
            }
        }
        self.total_variants().map(|_| ())
    }

    /// Grid point by flat index (mixed radix, last axis fastest).
    pub fn point(&self, index: usize) -> Option<DesignPoint> {
        let axes = self.axes();
        let mut values = [0.0; 15];
        let mut rest = index;
        for (slot, axis) in values.iter_mut().zip(axes).rev() {
            if axis.is_empty() {
                return None;
            }
            *slot = axis[rest % axis.len()];
            rest /= axis.len();
        }
        if rest != 0 {
            return None;
        }
        Some(DesignPoint::from_values(values))
    }

    pub fn points(&self) -> impl Iterator<Item = DesignPoint> + '_ {
        let total = self.total_variants().unwrap_or(0);
        (0..total).filter_map(|i| self.point(i))
    }
}

/// One combination of swept parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DesignPoint {
    pub u_out_1: f64,
    pub d_rel_1: f64,
    pub h_t_rel_first: f64,
    pub h_t_rel_last: f64,
    pub h_t_rel_max: f64,
    pub h_t_rel_max_coord: f64,
    pub eta_ad_first: f64,
    pub eta_ad_last: f64,
    pub eta_ad_max: f64,
    pub eta_ad_max_coord: f64,
    pub c_a_rel_first: f64,
    pub c_a_rel_last: f64,
    pub r_mean_first: f64,
    pub r_mean_last: f64,
    pub inlet_alpha: f64,
}

impl DesignPoint {
    pub fn from_values(v: [f64; 15]) -> Self {
        Self {
            u_out_1: v[0],
            d_rel_1: v[1],
            h_t_rel_first: v[2],
            h_t_rel_last: v[3],
            h_t_rel_max: v[4],
            h_t_rel_max_coord: v[5],
            eta_ad_first: v[6],
            eta_ad_last: v[7],
            eta_ad_max: v[8],
            eta_ad_max_coord: v[9],
            c_a_rel_first: v[10],
            c_a_rel_last: v[11],
            r_mean_first: v[12],
            r_mean_last: v[13],
            inlet_alpha: v[14],
        }
    }

    /// Values in `AXIS_NAMES` order.
    pub fn values(&self) -> [f64; 15] {
        [
            self.u_out_1,
            self.d_rel_1,
            self.h_t_rel_first,
            self.h_t_rel_last,
            self.h_t_rel_max,
            self.h_t_rel_max_coord,
            self.eta_ad_first,
            self.eta_ad_last,
            self.eta_ad_max,
            self.eta_ad_max_coord,
            self.c_a_rel_first,
            self.c_a_rel_last,
            self.r_mean_first,
            self.r_mean_last,
            self.inlet_alpha,
        ]
    }

    pub fn loading_profile(&self, stage_count: usize) -> OptimizerResult<Vec<f64>> {
        parabolic_profile(
            self.h_t_rel_first,
            self.h_t_rel_last,
            self.h_t_rel_max,
            self.h_t_rel_max_coord,
            stage_count,
        )
    }

    pub fn efficiency_profile(&self, stage_count: usize) -> OptimizerResult<Vec<f64>> {
        parabolic_profile(
            self.eta_ad_first,
            self.eta_ad_last,
            self.eta_ad_max,
            self.eta_ad_max_coord,
            stage_count,
        )
    }

    pub fn axial_velocity_profile(&self, stage_count: usize) -> Vec<f64> {
        linear_profile(self.c_a_rel_first, self.c_a_rel_last, stage_count)
    }

    pub fn reactivity_profile(&self, stage_count: usize) -> Vec<f64> {
        linear_profile(self.r_mean_first, self.r_mean_last, stage_count)
    }
}

impl fmt::Display for DesignPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in AXIS_NAMES.iter().zip(self.values()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}
