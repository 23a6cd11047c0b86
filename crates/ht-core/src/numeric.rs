/// Floating point type used for every field value.
pub type Real = f64;

/// Absolute/relative tolerance pair for float comparisons.
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

/// Clamp `v` into `[lo, hi]`, mapping NaN to `lo` and infinities to the
/// matching bound.
///
/// Unlike `f64::clamp`, the result is never NaN.
pub fn clamp_finite(v: Real, lo: Real, hi: Real) -> Real {
    if v.is_nan() { lo } else { v.clamp(lo, hi) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_uses_either_tolerance() {
        let tol = Tolerances::default();
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(nearly_equal(2.0e5, 2.0e5 + 1e-5, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn clamp_finite_handles_non_finite() {
        assert_eq!(clamp_finite(Real::NAN, 0.0, 1.0), 0.0);
        assert_eq!(clamp_finite(Real::INFINITY, 0.0, 1.0), 1.0);
        assert_eq!(clamp_finite(Real::NEG_INFINITY, 0.0, 1.0), 0.0);
        assert_eq!(clamp_finite(0.25, 0.0, 1.0), 0.25);
    }
}
