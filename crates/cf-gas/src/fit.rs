//! Least-squares power-law fits `y = a·(x/x0)^n` for tabulated properties.

use crate::error::{GasError, GasResult};
use nalgebra::{Matrix2, Vector2};

/// Coefficients of `y = coefficient·(x/x_ref)^exponent`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerLawFit {
    pub coefficient: f64,
    pub exponent: f64,
}

impl PowerLawFit {
    pub fn eval(&self, x: f64, x_ref: f64) -> f64 {
        self.coefficient * (x / x_ref).powf(self.exponent)
    }
}

const MAX_ITERATIONS: usize = 50;
const STEP_TOL: f64 = 1e-12;

/// Fit `y = a·(x/x_ref)^n` in the least-squares sense.
///
/// Starts from the log-linear regression and refines with Gauss-Newton on
/// the untransformed residuals.
pub fn fit_power_law(
    x_ref: f64,
    xs: &[f64],
    ys: &[f64],
    what: &'static str,
) -> GasResult<PowerLawFit> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return Err(GasError::InvalidArg {
            what: "power-law fit needs at least two paired samples",
        });
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite() || *v <= 0.0) || x_ref <= 0.0 {
        return Err(GasError::InvalidArg {
            what: "power-law fit samples must be positive and finite",
        });
    }

    let mut params = log_linear_guess(x_ref, xs, ys, what)?;

    for _ in 0..MAX_ITERATIONS {
        let mut jtj = Matrix2::<f64>::zeros();
        let mut jtr = Vector2::<f64>::zeros();
        for (&x, &y) in xs.iter().zip(ys) {
            let ratio = x / x_ref;
            let pow = ratio.powf(params.y);
            let residual = params.x * pow - y;
            let row = Vector2::new(pow, params.x * pow * ratio.ln());
            jtj += row * row.transpose();
            jtr += row * residual;
        }
        let step = jtj
            .lu()
            .solve(&(-jtr))
            .ok_or(GasError::FitFailed { what })?;
        params += step;
        if !params.x.is_finite() || !params.y.is_finite() {
            return Err(GasError::FitFailed { what });
        }
        if step.norm() <= STEP_TOL * params.norm() {
            break;
        }
    }

    Ok(PowerLawFit {
        coefficient: params.x,
        exponent: params.y,
    })
}

fn log_linear_guess(
    x_ref: f64,
    xs: &[f64],
    ys: &[f64],
    what: &'static str,
) -> GasResult<Vector2<f64>> {
    let n = xs.len() as f64;
    let lx: Vec<f64> = xs.iter().map(|x| (x / x_ref).ln()).collect();
    let ly: Vec<f64> = ys.iter().map(|y| y.ln()).collect();
    let mean_x = lx.iter().sum::<f64>() / n;
    let mean_y = ly.iter().sum::<f64>() / n;
    let sxx: f64 = lx.iter().map(|x| (x - mean_x).powi(2)).sum();
    if sxx <= 0.0 {
        return Err(GasError::FitFailed { what });
    }
    let sxy: f64 = lx
        .iter()
        .zip(&ly)
        .map(|(x, y)| (x - mean_x) * (y - mean_y))
        .sum();
    let exponent = sxy / sxx;
    let coefficient = (mean_y - exponent * mean_x).exp();
    Ok(Vector2::new(coefficient, exponent))
}
