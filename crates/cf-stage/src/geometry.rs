//! Meridional stage geometry at the three stations (rotor inlet 1,
//! rotor/stator gap 2, stator outlet 3).

use std::f64::consts::PI;

use crate::blading::{BladeRowParams, BladingGeometry};
use crate::error::{StageError, StageResult};

/// Which diameter of the flow path is held constant through a stage.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DiameterLaw {
    #[default]
    ConstantOuter,
    ConstantInner,
    ConstantMean,
    /// Explicit form coefficient: 1 is the tip, 0 the hub.
    Custom { form_coef: f64 },
}

impl DiameterLaw {
    /// Form coefficient `f` such that `D·(d_rel + f·(1 - d_rel))` is conserved.
    pub fn form_coef(&self, d_rel_1: f64) -> f64 {
        match *self {
            DiameterLaw::ConstantOuter => 1.0,
            DiameterLaw::ConstantInner => 0.0,
            DiameterLaw::ConstantMean => (mean_radius_rel(d_rel_1) - d_rel_1) / (1.0 - d_rel_1),
            DiameterLaw::Custom { form_coef } => form_coef,
        }
    }
}

/// Relative radius of the equal-area mean line for hub ratio `d_rel`.
pub fn mean_radius_rel(d_rel: f64) -> f64 {
    ((1.0 + d_rel * d_rel) / 2.0).sqrt()
}

/// Annulus area for tip diameter `d_out` and hub ratio `d_rel` [m²].
pub fn annulus_area(d_out: f64, d_rel: f64) -> f64 {
    PI / 4.0 * d_out * d_out * (1.0 - d_rel * d_rel)
}

/// Outlet tip diameter and hub ratio that pass area `area_3` while holding the
/// diameter selected by `form_coef` constant.
pub fn outlet_parameters(
    d_out_1: f64,
    d_rel_1: f64,
    area_3: f64,
    form_coef: f64,
) -> StageResult<(f64, f64)> {
    if area_3.is_nan() || area_3 <= 0.0 || d_out_1.is_nan() || d_out_1 <= 0.0 {
        return Err(StageError::InvalidArg {
            what: "outlet area and inlet diameter must be positive",
        });
    }
    let f = form_coef;
    let beta =
        (PI / 4.0 * (d_out_1 * d_out_1 / area_3) * (f + d_rel_1 * (1.0 - f)).powi(2)).sqrt();
    let d_rel_3 = (beta * (1.0 - 2.0 * f + beta * beta).sqrt() - f * (1.0 - f))
        / ((1.0 - f).powi(2) + beta * beta);
    if d_rel_3.is_nan() || d_rel_3 <= 0.0 || d_rel_3 >= 1.0 {
        return Err(StageError::ImpossibleGeometry { d_rel_3, area_3 });
    }
    let d_out_3 = d_out_1 * (d_rel_1 + f * (1.0 - d_rel_1)) / (d_rel_3 + f * (1.0 - d_rel_3));
    if !d_out_3.is_finite() || d_out_3 <= 0.0 {
        return Err(StageError::ImpossibleGeometry { d_rel_3, area_3 });
    }
    Ok((d_out_3, d_rel_3))
}

/// Solved flow-path geometry of one stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageGeometry {
    pub d_out_1: f64,
    pub d_rel_1: f64,
    pub d_out_3: f64,
    pub d_rel_3: f64,
    pub law: DiameterLaw,
}

impl StageGeometry {
    /// Geometry for a given outlet area, holding the law's diameter constant.
    pub fn from_outlet_area(
        d_out_1: f64,
        d_rel_1: f64,
        area_3: f64,
        law: DiameterLaw,
    ) -> StageResult<Self> {
        let (d_out_3, d_rel_3) =
            outlet_parameters(d_out_1, d_rel_1, area_3, law.form_coef(d_rel_1))?;
        Ok(Self {
            d_out_1,
            d_rel_1,
            d_out_3,
            d_rel_3,
            law,
        })
    }

    pub fn form_coef(&self) -> f64 {
        self.law.form_coef(self.d_rel_1)
    }

    pub fn outlet_parameters(&self, area_3: f64) -> StageResult<(f64, f64)> {
        outlet_parameters(self.d_out_1, self.d_rel_1, area_3, self.form_coef())
    }

    pub fn d_out_2(&self) -> f64 {
        (self.d_out_1 + self.d_out_3) / 2.0
    }

    pub fn d_rel_2(&self) -> f64 {
        (self.d_rel_1 + self.d_rel_3) / 2.0
    }

    pub fn r_m_rel_1(&self) -> f64 {
        mean_radius_rel(self.d_rel_1)
    }

    pub fn r_m_rel_2(&self) -> f64 {
        mean_radius_rel(self.d_rel_2())
    }

    pub fn r_m_rel_3(&self) -> f64 {
        mean_radius_rel(self.d_rel_3)
    }

    pub fn d_mean_1(&self) -> f64 {
        self.d_out_1 * self.r_m_rel_1()
    }

    pub fn d_mean_2(&self) -> f64 {
        self.d_out_2() * self.r_m_rel_2()
    }

    pub fn d_mean_3(&self) -> f64 {
        self.d_out_3 * self.r_m_rel_3()
    }

    pub fn inlet_area(&self) -> f64 {
        annulus_area(self.d_out_1, self.d_rel_1)
    }

    pub fn outlet_area(&self) -> f64 {
        annulus_area(self.d_out_3, self.d_rel_3)
    }

    /// Rotor row spans stations 1 → 2.
    pub fn rotor_blading(&self, params: BladeRowParams) -> BladingGeometry {
        BladingGeometry {
            d_out_inlet: self.d_out_1,
            d_out_outlet: self.d_out_2(),
            d_rel_inlet: self.d_rel_1,
            d_rel_outlet: self.d_rel_2(),
            params,
        }
    }

    /// Stator row spans stations 2 → 3.
    pub fn stator_blading(&self, params: BladeRowParams) -> BladingGeometry {
        BladingGeometry {
            d_out_inlet: self.d_out_2(),
            d_out_outlet: self.d_out_3,
            d_rel_inlet: self.d_rel_2(),
            d_rel_outlet: self.d_rel_3,
            params,
        }
    }
}
