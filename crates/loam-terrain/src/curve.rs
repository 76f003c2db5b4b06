//! Height remap curves applied before the final contrast boost.

/// A monotonic remap from an input height to an output height.
pub trait HeightCurve {
    fn evaluate(&self, t: f32) -> f32;
}

impl<F: Fn(f32) -> f32> HeightCurve for F {
    fn evaluate(&self, t: f32) -> f32 {
        self(t)
    }
}

/// The identity curve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LinearCurve;

impl HeightCurve for LinearCurve {
    fn evaluate(&self, t: f32) -> f32 {
        t
    }
}

/// Errors that can occur when building a [`KeyframeCurve`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CurveError {
    /// The curve has no keys.
    #[error("curve has no keys")]
    NoKeys,
    /// A key time or value is NaN or infinite.
    #[error("curve key {index} is not finite")]
    NonFinite { index: usize },
    /// Key times are not strictly increasing.
    #[error("curve key {index} is not after the previous key")]
    UnorderedKeys { index: usize },
}

/// A piecewise-linear curve through `(time, value)` keys.
///
/// Inputs before the first key or after the last key take that key's value.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyframeCurve {
    keys: Vec<(f32, f32)>,
}

impl KeyframeCurve {
    /// Build a curve from keys sorted by strictly increasing time.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError`] if `keys` is empty, contains non-finite values,
    /// or is not strictly increasing in time.
    pub fn new(keys: Vec<(f32, f32)>) -> Result<Self, CurveError> {
        if keys.is_empty() {
            return Err(CurveError::NoKeys);
        }
        for (index, &(t, v)) in keys.iter().enumerate() {
            if !t.is_finite() || !v.is_finite() {
                return Err(CurveError::NonFinite { index });
            }
            if index > 0 && t <= keys[index - 1].0 {
                return Err(CurveError::UnorderedKeys { index });
            }
        }
        Ok(Self { keys })
    }

    /// The straight line from `(0, 0)` to `(1, 1)`.
    pub fn linear() -> Self {
        Self {
            keys: vec![(0.0, 0.0), (1.0, 1.0)],
        }
    }

    pub fn keys(&self) -> &[(f32, f32)] {
        &self.keys
    }
}

impl HeightCurve for KeyframeCurve {
    fn evaluate(&self, t: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        // NaN falls through every comparison below.
        if t <= first.0 || t.is_nan() {
            return first.1;
        }
        if t >= last.0 {
            return last.1;
        }
        // First key strictly after t; t lies in [keys[i-1], keys[i]).
        let i = self.keys.partition_point(|&(kt, _)| kt <= t);
        let (t0, v0) = self.keys[i - 1];
        let (t1, v1) = self.keys[i];
        v0 + (v1 - v0) * (t - t0) / (t1 - t0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_linear_curve_is_identity() {
        for t in [0.0, 0.25, 0.9, 1.0] {
            assert_eq!(LinearCurve.evaluate(t), t);
            assert!((KeyframeCurve::linear().evaluate(t) - t).abs() < EPSILON);
        }
    }

    #[test]
    fn test_closure_is_a_curve() {
        let square = |t: f32| t * t;
        assert!((square.evaluate(0.5) - 0.25).abs() < EPSILON);
    }

    #[test]
    fn test_keyframe_interpolates_between_keys() {
        let curve = KeyframeCurve::new(vec![(0.0, 0.0), (0.5, 0.2), (1.0, 1.0)]).unwrap();
        assert!((curve.evaluate(0.25) - 0.1).abs() < EPSILON);
        assert!((curve.evaluate(0.5) - 0.2).abs() < EPSILON);
        assert!((curve.evaluate(0.75) - 0.6).abs() < EPSILON);
    }

    #[test]
    fn test_keyframe_clamps_outside_range() {
        let curve = KeyframeCurve::new(vec![(0.2, 0.1), (0.8, 0.9)]).unwrap();
        assert_eq!(curve.evaluate(-1.0), 0.1);
        assert_eq!(curve.evaluate(2.0), 0.9);
    }

    #[test]
    fn test_single_key_is_constant() {
        let curve = KeyframeCurve::new(vec![(0.5, 0.3)]).unwrap();
        assert_eq!(curve.evaluate(0.0), 0.3);
        assert_eq!(curve.evaluate(1.0), 0.3);
    }

    #[test]
    fn test_nan_input_takes_first_key() {
        let curve = KeyframeCurve::new(vec![(0.0, 0.2), (1.0, 0.8)]).unwrap();
        assert_eq!(curve.evaluate(f32::NAN), 0.2);
        assert_eq!(KeyframeCurve::linear().evaluate(f32::NAN), 0.0);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        assert_eq!(KeyframeCurve::new(vec![]), Err(CurveError::NoKeys));
        assert_eq!(
            KeyframeCurve::new(vec![(0.0, f32::NAN)]),
            Err(CurveError::NonFinite { index: 0 })
        );
        assert_eq!(
            KeyframeCurve::new(vec![(0.0, 0.0), (0.5, 0.5), (0.5, 1.0)]),
            Err(CurveError::UnorderedKeys { index: 2 })
        );
    }
}
