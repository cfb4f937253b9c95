//! Axial distributions of stage parameters.
//!
//! Loading and efficiency follow a two-piece parabola through the first and
//! last stage values with a flat peak in between; axial velocity and reaction
//! vary linearly.

use nalgebra::{Matrix6, Vector6};

use crate::error::{OptimizerError, OptimizerResult};

/// Two quadratics joined at `x_max` with zero slope and a shared peak value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParabolicShape {
    x_max: f64,
    left: [f64; 3],
    right: [f64; 3],
}

impl ParabolicShape {
    /// Fit through `(x1, y1)`, `(x2, y2)` and the peak `(x_max, y_max)`.
    pub fn fit(x1: f64, x2: f64, x_max: f64, y1: f64, y2: f64, y_max: f64) -> OptimizerResult<Self> {
        if [x1, x2, x_max, y1, y2, y_max].iter().any(|v| !v.is_finite()) {
            return Err(OptimizerError::ShapeFunction {
                what: "non-finite shape parameters".to_string(),
            });
        }
        if x_max == x1 || x_max == x2 {
            return Err(OptimizerError::ShapeFunction {
                what: format!("peak coordinate {x_max} coincides with an end point"),
            });
        }

        #[rustfmt::skip]
        let lhs = Matrix6::new(
            x1 * x1,     x1,    1.0, 0.0,         0.0,   0.0,
            0.0,         0.0,   0.0, x2 * x2,     x2,    1.0,
            2.0 * x_max, 1.0,   0.0, 0.0,         0.0,   0.0,
            0.0,         0.0,   0.0, 2.0 * x_max, 1.0,   0.0,
            x_max * x_max, x_max, 1.0, 0.0,       0.0,   0.0,
            0.0,         0.0,   0.0, x_max * x_max, x_max, 1.0,
        );
        let rhs = Vector6::new(y1, y2, 0.0, 0.0, y_max, y_max);

        let coef = lhs
            .lu()
            .solve(&rhs)
            .filter(|c| c.iter().all(|v| v.is_finite()))
            .ok_or_else(|| OptimizerError::ShapeFunction {
                what: format!("singular system for x1={x1}, x2={x2}, x_max={x_max}"),
            })?;

        Ok(Self {
            x_max,
            left: [coef[0], coef[1], coef[2]],
            right: [coef[3], coef[4], coef[5]],
        })
    }

    pub fn eval(&self, x: f64) -> f64 {
        let [a, b, c] = if x <= self.x_max { self.left } else { self.right };
        a * x * x + b * x + c
    }
}

/// Values of the parabolic shape at stage numbers `1..=stage_count`.
pub fn parabolic_profile(
    first: f64,
    last: f64,
    max: f64,
    max_coord: f64,
    stage_count: usize,
) -> OptimizerResult<Vec<f64>> {
    let shape = ParabolicShape::fit(1.0, stage_count as f64, max_coord, first, last, max)?;
    Ok((1..=stage_count).map(|i| shape.eval(i as f64)).collect())
}

/// Evenly spaced values from the first to the last stage.
pub fn linear_profile(first: f64, last: f64, stage_count: usize) -> Vec<f64> {
    cf_core::numeric::linspace(first, last, stage_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_end_points_and_peak() {
        let shape = ParabolicShape::fit(1.0, 5.0, 2.5, 0.23, 0.22, 0.25).unwrap();
        assert!((shape.eval(1.0) - 0.23).abs() < 1e-12);
        assert!((shape.eval(5.0) - 0.22).abs() < 1e-12);
        assert!((shape.eval(2.5) - 0.25).abs() < 1e-12);
        // flat at the peak from both sides
        let h = 1e-6;
        assert!((shape.eval(2.5 - h) - 0.25).abs() < 1e-9);
        assert!((shape.eval(2.5 + h) - 0.25).abs() < 1e-9);
        assert!(shape.eval(2.0) < 0.25 && shape.eval(3.0) < 0.25);
    }

    #[test]
    fn single_stage_profile_is_first_value() {
        let profile = parabolic_profile(0.88, 0.86, 0.9, 2.5, 1).unwrap();
        assert_eq!(profile.len(), 1);
        assert!((profile[0] - 0.88).abs() < 1e-12);
    }

    #[test]
    fn peak_on_end_point_is_rejected() {
        let err = parabolic_profile(0.23, 0.22, 0.25, 1.0, 4).unwrap_err();
        assert!(matches!(err, OptimizerError::ShapeFunction { .. }));
        assert!(parabolic_profile(0.23, 0.22, 0.25, 4.0, 4).is_err());
    }

    #[test]
    fn linear_profile_spans_stages() {
        let p = linear_profile(0.55, 0.6, 3);
        assert_eq!(p.len(), 3);
        assert_eq!(p[0], 0.55);
        assert!((p[1] - 0.575).abs() < 1e-12);
        assert_eq!(p[2], 0.6);
        assert_eq!(linear_profile(0.5, 0.45, 1), vec![0.5]);
    }
}
