//! Acceptance criteria for solved candidates.

use crate::error::{OptimizerError, OptimizerResult};

/// Overall targets a candidate compressor has to meet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DesignRequirements {
    /// Target overall stagnation pressure ratio
    pub pi_c: f64,
    /// Lowest acceptable overall adiabatic efficiency
    pub min_eta_ad: f64,
    /// Relative band above `pi_c` that is still accepted
    pub precision: f64,
}

impl DesignRequirements {
    pub const DEFAULT_PRECISION: f64 = 0.05;

    pub fn new(pi_c: f64, min_eta_ad: f64, precision: f64) -> OptimizerResult<Self> {
        let requirements = Self {
            pi_c,
            min_eta_ad,
            precision,
        };
        requirements.validate()?;
        Ok(requirements)
    }

    pub fn validate(&self) -> OptimizerResult<()> {
        let invalid = |what: String| Err(OptimizerError::InvalidRequirements { what });
        if !self.pi_c.is_finite() || self.pi_c <= 0.0 {
            return invalid(format!("target pressure ratio must be positive, got {}", self.pi_c));
        }
        if !self.min_eta_ad.is_finite() {
            return invalid(format!("minimum efficiency must be finite, got {}", self.min_eta_ad));
        }
        if !self.precision.is_finite() || self.precision <= 0.0 {
            return invalid(format!("precision must be positive, got {}", self.precision));
        }
        Ok(())
    }

    /// At or above the target and within `precision` of it.
    pub fn pi_c_is_valid(&self, pi_c: f64) -> bool {
        let residual = (pi_c - self.pi_c).abs() / self.pi_c;
        residual < self.precision && pi_c >= self.pi_c
    }

    pub fn eta_ad_is_valid(&self, eta_ad: f64) -> bool {
        eta_ad >= self.min_eta_ad
    }

    pub fn judge(&self, pi_c: f64, eta_ad: f64, stage_pressure_ratios: &[f64]) -> Verdict {
        if !(self.pi_c_is_valid(pi_c) && self.eta_ad_is_valid(eta_ad)) {
            Verdict::Rejected
        } else if pressure_trend_is_valid(stage_pressure_ratios) {
            Verdict::Valid
        } else {
            Verdict::QuasiValid
        }
    }
}

/// Stage pressure ratios must not increase along the flow path.
pub fn pressure_trend_is_valid(stage_pressure_ratios: &[f64]) -> bool {
    stage_pressure_ratios.windows(2).all(|w| w[1] <= w[0])
}

/// Outcome of the acceptance checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Misses the pressure-ratio or efficiency target.
    Rejected,
    /// Meets both targets but a rear stage is loaded more than a front one.
    QuasiValid,
    Valid,
}

impl Verdict {
    pub fn is_quasi_valid(self) -> bool {
        matches!(self, Verdict::QuasiValid | Verdict::Valid)
    }

    pub fn is_valid(self) -> bool {
        self == Verdict::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trend_filter() {
        assert!(!pressure_trend_is_valid(&[1.3, 1.25, 1.28]));
        assert!(pressure_trend_is_valid(&[1.3, 1.25, 1.2]));
        assert!(pressure_trend_is_valid(&[1.3, 1.3]));
        assert!(pressure_trend_is_valid(&[1.5]));
    }

    #[test]
    fn pressure_ratio_band() {
        let req = DesignRequirements::new(5.5, 0.84, 0.05).unwrap();
        assert!(req.pi_c_is_valid(5.5));
        assert!(req.pi_c_is_valid(5.7));
        assert!(!req.pi_c_is_valid(5.49));
        assert!(!req.pi_c_is_valid(5.8));
    }

    #[test]
    fn verdicts() {
        let req = DesignRequirements::new(2.0, 0.85, 0.1).unwrap();
        assert_eq!(req.judge(2.1, 0.86, &[1.5, 1.4]), Verdict::Valid);
        assert_eq!(req.judge(2.1, 0.86, &[1.4, 1.5]), Verdict::QuasiValid);
        assert_eq!(req.judge(2.1, 0.84, &[1.5, 1.4]), Verdict::Rejected);
        assert_eq!(req.judge(1.9, 0.9, &[1.5, 1.4]), Verdict::Rejected);
        assert!(Verdict::Valid.is_quasi_valid());
        assert!(!Verdict::QuasiValid.is_valid());
    }

    #[test]
    fn rejects_bad_requirements() {
        assert!(DesignRequirements::new(0.0, 0.8, 0.05).is_err());
        assert!(DesignRequirements::new(5.0, f64::NAN, 0.05).is_err());
        assert!(DesignRequirements::new(5.0, 0.8, 0.0).is_err());
    }
}
