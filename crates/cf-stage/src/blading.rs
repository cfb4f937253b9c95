//! Blade-row geometry derived from the flow path on demand.
//!
//! Span positions are relative heights `h_rel` in [0, 1] measured from the
//! hub. Spanwise quantities reference the row's leading-edge hub ratio.

use std::f64::consts::PI;

use crate::error::{StageError, StageResult};
use crate::geometry::{annulus_area, mean_radius_rel};

/// Design parameters of one blade row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladeRowParams {
    /// Blade length over mean chord.
    pub elongation: f64,
    /// Tip chord over hub chord scaling; 1 gives a constant chord.
    pub windage: f64,
    /// Chord over pitch at the mean line.
    pub mean_lattice_density: f64,
}

impl BladeRowParams {
    pub fn new(elongation: f64, windage: f64, mean_lattice_density: f64) -> StageResult<Self> {
        for (v, what) in [
            (elongation, "blade elongation must be positive"),
            (windage, "blade windage must be positive"),
            (mean_lattice_density, "mean lattice density must be positive"),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(StageError::InvalidArg { what });
            }
        }
        Ok(Self {
            elongation,
            windage,
            mean_lattice_density,
        })
    }
}

/// Geometry of one blade row between its leading and trailing edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BladingGeometry {
    pub d_out_inlet: f64,
    pub d_out_outlet: f64,
    pub d_rel_inlet: f64,
    pub d_rel_outlet: f64,
    pub params: BladeRowParams,
}

impl BladingGeometry {
    /// Reference hub ratio of the row (leading edge).
    pub fn d_rel_mean(&self) -> f64 {
        self.d_rel_inlet
    }

    pub fn r_rel(&self, h_rel: f64) -> f64 {
        self.d_rel_mean() + h_rel * (1.0 - self.d_rel_mean())
    }

    pub fn r_rel_inlet(&self, h_rel: f64) -> f64 {
        self.d_rel_inlet + h_rel * (1.0 - self.d_rel_inlet)
    }

    pub fn r_rel_outlet(&self, h_rel: f64) -> f64 {
        self.d_rel_outlet + h_rel * (1.0 - self.d_rel_outlet)
    }

    /// Relative height of the mean line.
    pub fn h_m_rel(&self) -> f64 {
        let d = self.d_rel_mean();
        (mean_radius_rel(d) - d) / (1.0 - d)
    }

    pub fn h_rel_inlet(&self, r_rel: f64) -> f64 {
        (r_rel - self.d_rel_inlet) / (1.0 - self.d_rel_inlet)
    }

    pub fn h_rel_outlet(&self, r_rel: f64) -> f64 {
        (r_rel - self.d_rel_outlet) / (1.0 - self.d_rel_outlet)
    }

    pub fn d_mean_inlet(&self) -> f64 {
        self.d_out_inlet * mean_radius_rel(self.d_rel_inlet)
    }

    pub fn d_in_inlet(&self) -> f64 {
        self.d_out_inlet * self.d_rel_inlet
    }

    pub fn d_mean_outlet(&self) -> f64 {
        self.d_out_outlet * mean_radius_rel(self.d_rel_outlet)
    }

    pub fn d_in_outlet(&self) -> f64 {
        self.d_out_outlet * self.d_rel_outlet
    }

    pub fn d_out(&self) -> f64 {
        self.d_out_inlet
    }

    /// Mean-line diameter averaged over both edges.
    pub fn d_mean(&self) -> f64 {
        (self.d_mean_inlet() + self.d_mean_outlet()) / 2.0
    }

    pub fn d_in(&self) -> f64 {
        self.d_in_inlet()
    }

    pub fn area_inlet(&self) -> f64 {
        annulus_area(self.d_out_inlet, self.d_rel_inlet)
    }

    pub fn area_outlet(&self) -> f64 {
        annulus_area(self.d_out_outlet, self.d_rel_outlet)
    }

    pub fn blade_length(&self) -> f64 {
        (self.d_out() - self.d_in()) / 2.0
    }

    pub fn mean_chord_length(&self) -> f64 {
        self.blade_length() / self.params.elongation
    }

    /// Chord at relative height `h_rel`; linear in radius, equal to the mean
    /// chord at the mean line.
    pub fn chord_length(&self, h_rel: f64) -> f64 {
        let d = self.d_rel_inlet;
        let w = self.params.windage;
        let r_rel = d + h_rel * (1.0 - d);
        let num = (w - 1.0) * r_rel + 1.0 - w * d;
        let den = (w - 1.0) * mean_radius_rel(d) + 1.0 - w * d;
        num / den * self.mean_chord_length()
    }

    pub fn out_chord_length(&self) -> f64 {
        self.chord_length(1.0)
    }

    pub fn in_chord_length(&self) -> f64 {
        self.chord_length(0.0)
    }

    pub fn mean_step(&self) -> f64 {
        self.mean_chord_length() / self.params.mean_lattice_density
    }

    /// Number of blades (not rounded).
    pub fn blade_number(&self) -> f64 {
        PI * self.d_mean() / self.mean_step()
    }

    /// Blade pitch at relative height `h_rel`.
    pub fn step(&self, h_rel: f64) -> f64 {
        PI * self.d_out() * self.r_rel(h_rel) / self.blade_number()
    }

    pub fn out_step(&self) -> f64 {
        PI * self.d_out() / self.blade_number()
    }

    pub fn in_step(&self) -> f64 {
        PI * self.d_in() / self.blade_number()
    }

    pub fn lattice_density(&self, h_rel: f64) -> f64 {
        self.chord_length(h_rel) / self.step(h_rel)
    }

    pub fn out_lattice_density(&self) -> f64 {
        self.out_chord_length() / self.out_step()
    }

    pub fn in_lattice_density(&self) -> f64 {
        self.in_chord_length() / self.in_step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(windage: f64) -> BladingGeometry {
        BladingGeometry {
            d_out_inlet: 1.0,
            d_out_outlet: 1.0,
            d_rel_inlet: 0.5,
            d_rel_outlet: 0.6,
            params: BladeRowParams::new(2.0, windage, 1.5).unwrap(),
        }
    }

    #[test]
    fn lengths_and_counts() {
        let r = row(1.0);
        assert!((r.blade_length() - 0.25).abs() < 1e-12);
        assert!((r.mean_chord_length() - 0.125).abs() < 1e-12);
        assert!((r.mean_step() - 0.125 / 1.5).abs() < 1e-12);
        let expected = PI * r.d_mean() / r.mean_step();
        assert!((r.blade_number() - expected).abs() < 1e-9);
        assert!(r.blade_number() > 20.0 && r.blade_number() < 40.0);
    }

    #[test]
    fn unit_windage_gives_constant_chord() {
        let r = row(1.0);
        assert!((r.in_chord_length() - r.out_chord_length()).abs() < 1e-12);
        assert!((r.chord_length(0.3) - r.mean_chord_length()).abs() < 1e-12);
    }

    #[test]
    fn chord_equals_mean_at_mean_line() {
        let r = row(1.4);
        let h_m = r.h_m_rel();
        assert!((r.chord_length(h_m) - r.mean_chord_length()).abs() < 1e-12);
        assert!(r.out_chord_length() > r.in_chord_length());
    }

    #[test]
    fn lattice_density_falls_towards_tip() {
        let r = row(1.0);
        assert!(r.in_lattice_density() > r.lattice_density(0.5));
        assert!(r.lattice_density(0.5) > r.out_lattice_density());
        assert!((r.step(1.0) - r.out_step()).abs() < 1e-12);
        assert!((r.step(0.0) - r.in_step()).abs() < 1e-12);
    }

    #[test]
    fn span_mapping_round_trips() {
        let r = row(1.0);
        let h = 0.37;
        assert!((r.h_rel_inlet(r.r_rel_inlet(h)) - h).abs() < 1e-12);
        assert!((r.h_rel_outlet(r.r_rel_outlet(h)) - h).abs() < 1e-12);
    }

    #[test]
    fn params_validated() {
        assert!(matches!(
            BladeRowParams::new(0.0, 1.0, 1.5),
            Err(StageError::InvalidArg { .. })
        ));
        assert!(matches!(
            BladeRowParams::new(2.0, f64::NAN, 1.5),
            Err(StageError::InvalidArg { .. })
        ));
        assert!(matches!(
            BladeRowParams::new(2.0, 1.0, -1.5),
            Err(StageError::InvalidArg { .. })
        ));
    }
}
