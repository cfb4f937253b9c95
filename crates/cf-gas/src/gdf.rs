//! Gas dynamic functions of the reduced velocity λ = c / a_crit.
//!
//! All functions take the heat-capacity ratio `k` explicitly. Functions whose
//! base `1 - (k-1)/(k+1)·λ²` would go negative return
//! [`GasError::NumericDomain`] instead of a NaN.

use crate::error::{GasError, GasResult};

fn base(what: &'static str, lambda: f64, k: f64) -> GasResult<f64> {
    let b = 1.0 - (k - 1.0) / (k + 1.0) * lambda * lambda;
    if b.is_finite() && b >= 0.0 {
        Ok(b)
    } else {
        Err(GasError::NumericDomain { what, lambda, k })
    }
}

/// Density ratio ρ/ρ* = (1 - (k-1)/(k+1)·λ²)^(1/(k-1)).
pub fn epsilon(lambda: f64, k: f64) -> GasResult<f64> {
    Ok(base("epsilon", lambda, k)?.powf(1.0 / (k - 1.0)))
}

/// Pressure ratio p/p* = ε(λ)^k.
pub fn pi(lambda: f64, k: f64) -> GasResult<f64> {
    Ok(epsilon(lambda, k)?.powf(k))
}

/// Temperature ratio T/T* = 1 - (k-1)/(k+1)·λ².
pub fn tau(lambda: f64, k: f64) -> f64 {
    1.0 - (k - 1.0) / (k + 1.0) * lambda * lambda
}

/// Mass flow function q(λ) = sqrt(2k / ((k+1)·R)) · λ · ε(λ).
///
/// Dimensional form (carries `sqrt(1/R)`) so that
/// `G = q · F · p* / sqrt(T*)` holds directly.
pub fn q(lambda: f64, k: f64, r: f64) -> GasResult<f64> {
    Ok((2.0 * k / ((k + 1.0) * r)).sqrt() * lambda * epsilon(lambda, k)?)
}

/// Critical speed of sound sqrt(2k/(k+1) · R · T*).
pub fn a_crit(k: f64, r: f64, t_stag: f64) -> GasResult<f64> {
    let v = 2.0 * k / (k + 1.0) * r * t_stag;
    if v.is_finite() && v > 0.0 {
        Ok(v.sqrt())
    } else {
        Err(GasError::NonPhysical {
            what: "critical speed of sound",
            value: v,
        })
    }
}

/// Mach number for a reduced velocity λ.
pub fn mach(lambda: f64, k: f64) -> GasResult<f64> {
    let b = base("mach", lambda, k)?;
    if b == 0.0 {
        return Err(GasError::NumericDomain {
            what: "mach",
            lambda,
            k,
        });
    }
    Ok((2.0 / (k + 1.0) * lambda * lambda / b).sqrt())
}

/// Reduced velocity λ for a Mach number; exact inverse of [`mach`].
pub fn lambda_from_mach(mach: f64, k: f64) -> GasResult<f64> {
    if !mach.is_finite() || mach < 0.0 {
        return Err(GasError::NonPhysical {
            what: "mach number",
            value: mach,
        });
    }
    let m2 = mach * mach;
    Ok(((k + 1.0) / 2.0 * m2 / (1.0 + (k - 1.0) / 2.0 * m2)).sqrt())
}

/// Limiting reduced velocity sqrt((k+1)/(k-1)) where static temperature vanishes.
pub fn lambda_max(k: f64) -> f64 {
    ((k + 1.0) / (k - 1.0)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const K: f64 = 1.4;
    const R: f64 = 287.0;

    #[test]
    fn functions_at_rest() {
        assert_eq!(epsilon(0.0, K).unwrap(), 1.0);
        assert_eq!(pi(0.0, K).unwrap(), 1.0);
        assert_eq!(tau(0.0, K), 1.0);
        assert_eq!(q(0.0, K, R).unwrap(), 0.0);
        assert_eq!(mach(0.0, K).unwrap(), 0.0);
    }

    #[test]
    fn critical_point() {
        // λ = 1 is M = 1
        assert!((mach(1.0, K).unwrap() - 1.0).abs() < 1e-12);
        assert!((tau(1.0, K) - 2.0 / 2.4).abs() < 1e-12);
        // π(1) = (2/(k+1))^(k/(k-1)) = 0.5283 for k = 1.4
        assert!((pi(1.0, K).unwrap() - 0.528_28).abs() < 1e-4);
    }

    #[test]
    fn q_peaks_at_critical() {
        let q1 = q(1.0, K, R).unwrap();
        assert!(q(0.9, K, R).unwrap() < q1);
        assert!(q(1.1, K, R).unwrap() < q1);
    }

    #[test]
    fn beyond_limit_is_domain_error() {
        let lambda = lambda_max(K) + 0.1;
        assert!(matches!(
            epsilon(lambda, K),
            Err(GasError::NumericDomain { what: "epsilon", .. })
        ));
        assert!(pi(lambda, K).is_err());
        assert!(q(lambda, K, R).is_err());
        assert!(mach(lambda, K).is_err());
        assert!(mach(lambda_max(K), K).is_err());
    }

    #[test]
    fn a_crit_air() {
        let a = a_crit(K, R, 288.0).unwrap();
        assert!((a - 310.6).abs() < 0.2);
        assert!(a_crit(K, R, -1.0).is_err());
    }

    #[test]
    fn lambda_from_mach_rejects_negative() {
        assert!(lambda_from_mach(-0.5, K).is_err());
        assert!(lambda_from_mach(f64::NAN, K).is_err());
    }
}
