use crate::CfError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Absolute + relative tolerance pair
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CfError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CfError::NonFinite { what, value: v })
    }
}

/// Require `lo < v < hi`.
pub fn ensure_open_range(v: Real, lo: Real, hi: Real, what: &'static str) -> Result<Real, CfError> {
    ensure_finite(v, what)?;
    if v > lo && v < hi {
        Ok(v)
    } else {
        Err(CfError::OutOfRange {
            what,
            value: v,
            expected: "open interval",
        })
    }
}

/// Relative change of `new` against `old`, falling back to the absolute
/// change when `old` is zero.
pub fn relative_change(old: Real, new: Real) -> Real {
    if old == 0.0 {
        (new - old).abs()
    } else {
        ((new - old) / old).abs()
    }
}

/// `num` evenly spaced values over `[start, end]`; the endpoint is exact.
pub fn linspace(start: Real, end: Real, num: usize) -> Vec<Real> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num - 1) as Real;
            let mut values: Vec<Real> = (0..num).map(|i| start + step * i as Real).collect();
            values[num - 1] = end;
            values
        }
    }
}

/// Values `start, start + step, ...` strictly below `stop` (or above for a
/// negative step).
pub fn arange(start: Real, stop: Real, step: Real) -> Result<Vec<Real>, CfError> {
    ensure_finite(start, "arange start")?;
    ensure_finite(stop, "arange stop")?;
    ensure_finite(step, "arange step")?;
    if step == 0.0 {
        return Err(CfError::InvalidArg {
            what: "arange step must be non-zero",
        });
    }
    // Guard against round-off pushing an exact multiple one step past stop.
    let count = ((stop - start) / step - 1e-9).ceil();
    if count <= 0.0 {
        return Ok(Vec::new());
    }
    Ok((0..count as usize)
        .map(|i| start + step * i as Real)
        .collect())
}
