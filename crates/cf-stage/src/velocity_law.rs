//! Radial distribution of velocity components along the blade span.
//!
//! A law maps the mean-radius triangle to the triangle at another relative
//! radius. Inlet and outlet edges of a row use separate methods because the
//! constant-reactivity family differs between them.

use crate::error::{StageError, StageResult};
use crate::triangle::FlowTriangle;

/// Twist law of a blade row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VelocityLaw {
    /// `c_u·r^(1/n) = const`, axial velocity from radial equilibrium.
    Exponential { power: f64 },
    /// Constant degree of reaction along the span.
    ConstantReactivity { r_mean: f64, h_t_rel: f64 },
}

impl VelocityLaw {
    pub const CONSTANT_CIRCULATION: Self = VelocityLaw::Exponential { power: 1.0 };
    pub const SOLID_BODY: Self = VelocityLaw::Exponential { power: -1.0 };

    pub fn exponential(power: f64) -> StageResult<Self> {
        if !power.is_finite() || power == 0.0 {
            return Err(StageError::InvalidArg {
                what: "velocity law power must be finite and non-zero",
            });
        }
        Ok(VelocityLaw::Exponential { power })
    }

    pub fn constant_reactivity(r_mean: f64, h_t_rel: f64) -> StageResult<Self> {
        if !r_mean.is_finite() || !h_t_rel.is_finite() {
            return Err(StageError::InvalidArg {
                what: "constant-reactivity law needs finite R and H",
            });
        }
        Ok(VelocityLaw::ConstantReactivity { r_mean, h_t_rel })
    }

    /// Triangle at the leading edge of the row, at relative radius `r_rel`.
    pub fn inlet_triangle<T: FlowTriangle>(&self, mean: &T, r_rel: f64) -> StageResult<T> {
        self.triangle_at(mean, r_rel, -1.0)
    }

    /// Triangle at the trailing edge of the row, at relative radius `r_rel`.
    pub fn outlet_triangle<T: FlowTriangle>(&self, mean: &T, r_rel: f64) -> StageResult<T> {
        self.triangle_at(mean, r_rel, 1.0)
    }

    fn triangle_at<T: FlowTriangle>(&self, mean: &T, r_rel: f64, edge: f64) -> StageResult<T> {
        if !r_rel.is_finite() || r_rel <= 0.0 {
            return Err(StageError::InvalidArg {
                what: "relative radius must be positive",
            });
        }
        let r_m = mean.r_m_rel();
        let (c_u_rel, c_a_sq) = match *self {
            VelocityLaw::Exponential { power } => {
                let ratio = r_m / r_rel;
                let c_u_m = mean.c_u_rel();
                let c_u = c_u_m * ratio.powf(1.0 / power);
                let c_a_sq = (power - 1.0) * c_u_m * c_u_m * (ratio.powf(2.0 / power) - 1.0)
                    + mean.c_a_rel() * mean.c_a_rel();
                (c_u, c_a_sq)
            }
            VelocityLaw::ConstantReactivity { r_mean, h_t_rel } => {
                let c_u = r_rel * (1.0 - r_mean) + edge * h_t_rel / (2.0 * r_rel);
                let c_a_sq = mean.c_a_rel() * mean.c_a_rel()
                    - 2.0 * (1.0 - r_mean).powi(2) * (r_rel * r_rel - r_m * r_m);
                (c_u, c_a_sq)
            }
        };
        if !c_u_rel.is_finite() {
            return Err(StageError::NumericDomain {
                what: "circumferential velocity",
                value: c_u_rel,
            });
        }
        if c_a_sq.is_nan() || c_a_sq < 0.0 {
            return Err(StageError::NumericDomain {
                what: "axial velocity radicand",
                value: c_a_sq,
            });
        }
        Ok(mean.with_components(r_rel, c_u_rel, c_a_sq.sqrt()))
    }
}

/// Which law family a row uses; resolved per stage into a [`VelocityLaw`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum VelocityLawKind {
    #[default]
    ConstantCirculation,
    SolidBody,
    Exponential { power: f64 },
    /// Bound to the stage's own R_mean and H_t_rel.
    ConstantReactivity,
}

impl VelocityLawKind {
    pub fn resolve(&self, r_mean: f64, h_t_rel: f64) -> StageResult<VelocityLaw> {
        match *self {
            VelocityLawKind::ConstantCirculation => Ok(VelocityLaw::CONSTANT_CIRCULATION),
            VelocityLawKind::SolidBody => Ok(VelocityLaw::SOLID_BODY),
            VelocityLawKind::Exponential { power } => VelocityLaw::exponential(power),
            VelocityLawKind::ConstantReactivity => {
                VelocityLaw::constant_reactivity(r_mean, h_t_rel)
            }
        }
    }
}
