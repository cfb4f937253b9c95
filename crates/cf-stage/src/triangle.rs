//! Velocity triangles in dimensionless form.
//!
//! All velocity components are stored relative to the rotor tip speed
//! `u_out_1` of the stage inlet, radii relative to the tip radius. Angles are
//! measured from the circumferential direction, so a purely axial flow has
//! α = π/2.

use std::fmt;

/// Common surface of absolute-only and complete (absolute + relative)
/// velocity triangles.
pub trait FlowTriangle: Copy + fmt::Debug {
    /// Build a triangle of the same kind from its four defining values.
    fn from_parts(u_out_1: f64, r_m_rel: f64, c_u_rel: f64, c_a_rel: f64) -> Self;

    fn u_out_1(&self) -> f64;
    fn r_m_rel(&self) -> f64;
    fn c_u_rel(&self) -> f64;
    fn c_a_rel(&self) -> f64;

    /// Same kind of triangle with a different radius and velocity components.
    fn with_components(&self, r_m_rel: f64, c_u_rel: f64, c_a_rel: f64) -> Self {
        Self::from_parts(self.u_out_1(), r_m_rel, c_u_rel, c_a_rel)
    }

    /// Blade speed at this radius [m/s].
    fn u_m(&self) -> f64 {
        self.u_out_1() * self.r_m_rel()
    }

    /// Absolute flow angle [rad].
    fn alpha(&self) -> f64 {
        self.c_a_rel().atan2(self.c_u_rel())
    }

    fn c_total_rel(&self) -> f64 {
        self.c_u_rel().hypot(self.c_a_rel())
    }

    /// Circumferential absolute velocity [m/s].
    fn c_u(&self) -> f64 {
        self.u_out_1() * self.c_u_rel()
    }

    /// Axial velocity [m/s].
    fn c_a(&self) -> f64 {
        self.u_out_1() * self.c_a_rel()
    }

    /// Magnitude of the absolute velocity [m/s].
    fn c_total(&self) -> f64 {
        self.u_out_1() * self.c_total_rel()
    }
}

/// Absolute-frame triangle (stator outlet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AbsoluteTriangle {
    pub u_out_1: f64,
    pub r_m_rel: f64,
    pub c_u_rel: f64,
    pub c_a_rel: f64,
}

/// Complete triangle with relative-frame quantities (rotor inlet/outlet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VelocityTriangle {
    pub u_out_1: f64,
    pub r_m_rel: f64,
    pub c_u_rel: f64,
    pub c_a_rel: f64,
}

macro_rules! impl_flow_triangle {
    ($ty:ty) => {
        impl FlowTriangle for $ty {
            fn from_parts(u_out_1: f64, r_m_rel: f64, c_u_rel: f64, c_a_rel: f64) -> Self {
                Self {
                    u_out_1,
                    r_m_rel,
                    c_u_rel,
                    c_a_rel,
                }
            }
            fn u_out_1(&self) -> f64 {
                self.u_out_1
            }
            fn r_m_rel(&self) -> f64 {
                self.r_m_rel
            }
            fn c_u_rel(&self) -> f64 {
                self.c_u_rel
            }
            fn c_a_rel(&self) -> f64 {
                self.c_a_rel
            }
        }
    };
}

impl_flow_triangle!(AbsoluteTriangle);
impl_flow_triangle!(VelocityTriangle);

impl VelocityTriangle {
    /// Relative flow angle [rad].
    pub fn beta(&self) -> f64 {
        self.c_a_rel.atan2(self.r_m_rel - self.c_u_rel)
    }

    /// Circumferential relative velocity, dimensionless.
    pub fn w_u_rel(&self) -> f64 {
        self.r_m_rel - self.c_u_rel
    }

    pub fn w_a_rel(&self) -> f64 {
        self.c_a_rel
    }

    pub fn w_u(&self) -> f64 {
        self.u_out_1 * self.w_u_rel()
    }

    pub fn w_a(&self) -> f64 {
        self.u_out_1 * self.w_a_rel()
    }

    /// Magnitude of the relative velocity [m/s].
    pub fn w_total(&self) -> f64 {
        self.u_out_1 * self.w_u_rel().hypot(self.w_a_rel())
    }

    pub fn absolute(&self) -> AbsoluteTriangle {
        AbsoluteTriangle::from_parts(self.u_out_1, self.r_m_rel, self.c_u_rel, self.c_a_rel)
    }
}

impl From<AbsoluteTriangle> for VelocityTriangle {
    fn from(t: AbsoluteTriangle) -> Self {
        Self::from_parts(t.u_out_1, t.r_m_rel, t.c_u_rel, t.c_a_rel)
    }
}

impl fmt::Display for AbsoluteTriangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alpha={:.2}° c_u={:.2} m/s c_a={:.2} m/s c={:.2} m/s u={:.2} m/s",
            self.alpha().to_degrees(),
            self.c_u(),
            self.c_a(),
            self.c_total(),
            self.u_m()
        )
    }
}

impl fmt::Display for VelocityTriangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "alpha={:.2}° beta={:.2}° c_u={:.2} m/s c_a={:.2} m/s c={:.2} m/s \
             w_u={:.2} m/s w={:.2} m/s u={:.2} m/s",
            self.alpha().to_degrees(),
            self.beta().to_degrees(),
            self.c_u(),
            self.c_a(),
            self.c_total(),
            self.w_u(),
            self.w_total(),
            self.u_m()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn axial_inlet_is_exactly_ninety_degrees() {
        let t = VelocityTriangle::from_parts(470.0, 0.79, 0.0, 0.5);
        assert_eq!(t.alpha(), FRAC_PI_2);
        let a = AbsoluteTriangle::from_parts(470.0, 0.79, 0.0, 0.5);
        assert_eq!(a.alpha(), FRAC_PI_2);
    }

    #[test]
    fn relative_frame_closes() {
        let t = VelocityTriangle::from_parts(470.0, 0.8, 0.3, 0.5);
        // w_u = u - c_u
        assert!((t.w_u() - (t.u_m() - t.c_u())).abs() < 1e-9);
        assert!((t.w_a() - t.c_a()).abs() < 1e-12);
        // c_a / tan(beta) recovers w_u
        assert!((t.c_a_rel / t.beta().tan() - t.w_u_rel()).abs() < 1e-12);
        let w = (t.w_u().powi(2) + t.w_a().powi(2)).sqrt();
        assert!((t.w_total() - w).abs() < 1e-9);
    }

    #[test]
    fn dimensional_components() {
        let t = AbsoluteTriangle::from_parts(400.0, 0.75, 0.25, 0.5);
        assert_eq!(t.u_m(), 300.0);
        assert_eq!(t.c_u(), 100.0);
        assert_eq!(t.c_a(), 200.0);
        assert!((t.c_total() - 100.0 * 5.0_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn display_mentions_angles() {
        let t = VelocityTriangle::from_parts(470.0, 0.8, 0.3, 0.5);
        let s = t.to_string();
        assert!(s.contains("alpha="));
        assert!(s.contains("beta="));
    }
}
