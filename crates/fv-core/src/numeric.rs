use crate::FvError;

/// Floating point type used throughout system
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, FvError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(FvError::NonFinite { what, value: v })
    }
}

/// Closed numeric interval `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueRange {
    pub min: Real,
    pub max: Real,
}

impl ValueRange {
    pub fn new(min: Real, max: Real) -> Result<Self, FvError> {
        ensure_finite(min, "range min")?;
        ensure_finite(max, "range max")?;
        if min > max {
            return Err(FvError::InvalidArg {
                what: "range min exceeds max",
            });
        }
        Ok(Self { min, max })
    }

    pub fn span(&self) -> Real {
        self.max - self.min
    }

    /// Position of `v` inside the range, clamped to [0, 1].
    ///
    /// A degenerate range maps every finite value to 0.5.
    pub fn normalize(&self, v: Real) -> Real {
        let span = self.span();
        if span <= 0.0 {
            return 0.5;
        }
        ((v - self.min) / span).clamp(0.0, 1.0)
    }

    pub fn as_array(&self) -> [Real; 2] {
        [self.min, self.max]
    }
}

/// Min/max over the finite entries of `values`; NaN marks missing data.
///
/// Returns `None` when no entry is finite.
pub fn finite_range(values: &[Real]) -> Option<ValueRange> {
    let mut iter = values.iter().copied().filter(|v| v.is_finite());
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(ValueRange { min, max })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn finite_range_skips_nan() {
        let r = finite_range(&[Real::NAN, 3.0, -1.0, Real::NAN, 2.5]).unwrap();
        assert_eq!(r.min, -1.0);
        assert_eq!(r.max, 3.0);
    }

    #[test]
    fn finite_range_all_missing() {
        assert!(finite_range(&[Real::NAN, Real::NAN]).is_none());
        assert!(finite_range(&[]).is_none());
    }

    #[test]
    fn normalize_clamps_and_handles_degenerate() {
        let r = ValueRange::new(10.0, 20.0).unwrap();
        assert_eq!(r.normalize(15.0), 0.5);
        assert_eq!(r.normalize(-5.0), 0.0);
        assert_eq!(r.normalize(50.0), 1.0);

        let flat = ValueRange::new(4.0, 4.0).unwrap();
        assert_eq!(flat.normalize(4.0), 0.5);
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        assert!(ValueRange::new(2.0, 1.0).is_err());
        assert!(ValueRange::new(Real::NAN, 1.0).is_err());
    }
}
