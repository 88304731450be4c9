//! Universes of discourse and triangular membership functions

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of sample intervals in a universe
pub const MAX_UNIVERSE_STEPS: usize = 100_000;

/// Closed numeric range sampled at a fixed resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UniverseBounds")]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
}

#[derive(Deserialize)]
struct UniverseBounds {
    min: f64,
    max: f64,
    step: f64,
}

impl TryFrom<UniverseBounds> for Universe {
    type Error = ConfigError;

    fn try_from(bounds: UniverseBounds) -> Result<Self, Self::Error> {
        Universe::new(bounds.min, bounds.max, bounds.step)
    }
}

impl Universe {
    /// Create a universe over `[min, max]` sampled every `step`
    ///
    /// At most [`MAX_UNIVERSE_STEPS`] intervals are allowed.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, ConfigError> {
        let finite = min.is_finite() && max.is_finite() && step.is_finite();
        let valid = finite && min < max && step > 0.0;
        if !valid || (max - min) / step > MAX_UNIVERSE_STEPS as f64 {
            return Err(ConfigError::InvalidUniverse { min, max, step });
        }
        Ok(Self { min, max, step })
    }

    pub(crate) const fn new_unchecked(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Whether `x` lies inside the closed range (NaN never does)
    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }

    /// Number of sample points, both bounds included
    pub fn len(&self) -> usize {
        self.steps() + 1
    }

    /// A valid universe always has at least two points
    pub fn is_empty(&self) -> bool {
        false
    }

    fn steps(&self) -> usize {
        ((self.max - self.min) / self.step).round().max(1.0) as usize
    }

    /// Sample points in ascending order; the last one is pinned to `max`
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        let steps = self.steps();
        (0..=steps).map(move |i| {
            if i == steps {
                self.max
            } else {
                (self.min + i as f64 * self.step).min(self.max)
            }
        })
    }
}

/// Triangular membership function with breakpoints `a <= b <= c`
///
/// The degree is 0 outside `[a, c]`, rises linearly from `a` to the peak at
/// `b`, then falls linearly to `c`. `a == b` gives a left shoulder and
/// `b == c` a right shoulder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct MembershipFunction {
    a: f64,
    b: f64,
    c: f64,
}

impl TryFrom<[f64; 3]> for MembershipFunction {
    type Error = ConfigError;

    fn try_from([a, b, c]: [f64; 3]) -> Result<Self, Self::Error> {
        MembershipFunction::triangular(a, b, c)
    }
}

impl From<MembershipFunction> for [f64; 3] {
    fn from(mf: MembershipFunction) -> Self {
        mf.breakpoints()
    }
}

impl MembershipFunction {
    /// Create a triangular function, rejecting unordered or non-finite breakpoints
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self, ConfigError> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();
        if !finite || a > b || b > c {
            return Err(ConfigError::InvalidBreakpoints { a, b, c });
        }
        Ok(Self { a, b, c })
    }

    pub(crate) const fn triangular_unchecked(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn breakpoints(&self) -> [f64; 3] {
        [self.a, self.b, self.c]
    }

    /// Peak of the triangle, where the degree is exactly 1
    pub fn peak(&self) -> f64 {
        self.b
    }

    /// Degree of membership of `x`, always in [0, 1]
    pub fn degree(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;
        if !(a..=c).contains(&x) {
            return 0.0;
        }
        if x == b {
            return 1.0;
        }
        let degree = if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        };
        degree.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_triangle_shape() {
        let mf = MembershipFunction::triangular(10.0, 20.0, 30.0).unwrap();
        assert_eq!(mf.degree(10.0), 0.0);
        assert_eq!(mf.degree(15.0), 0.5);
        assert_eq!(mf.degree(20.0), 1.0);
        assert_eq!(mf.degree(25.0), 0.5);
        assert_eq!(mf.degree(30.0), 0.0);
        assert_eq!(mf.degree(5.0), 0.0);
        assert_eq!(mf.degree(35.0), 0.0);
    }

    #[test]
    fn test_shoulders() {
        let left = MembershipFunction::triangular(0.0, 0.0, 20.0).unwrap();
        assert_eq!(left.degree(0.0), 1.0);
        assert_eq!(left.degree(10.0), 0.5);
        assert_eq!(left.degree(20.0), 0.0);

        let right = MembershipFunction::triangular(40.0, 50.0, 50.0).unwrap();
        assert_eq!(right.degree(50.0), 1.0);
        assert_eq!(right.degree(45.0), 0.5);
        assert_eq!(right.degree(50.5), 0.0);
    }

    #[test]
    fn test_singleton_triangle() {
        let mf = MembershipFunction::triangular(3.0, 3.0, 3.0).unwrap();
        assert_eq!(mf.degree(3.0), 1.0);
        assert_eq!(mf.degree(2.999), 0.0);
    }

    #[test]
    fn test_nan_has_no_membership() {
        let mf = MembershipFunction::triangular(0.0, 1.0, 2.0).unwrap();
        assert_eq!(mf.degree(f64::NAN), 0.0);
    }

    #[test]
    fn test_invalid_breakpoints() {
        assert!(MembershipFunction::triangular(2.0, 1.0, 3.0).is_err());
        assert!(MembershipFunction::triangular(0.0, 3.0, 2.0).is_err());
        assert!(MembershipFunction::triangular(0.0, f64::NAN, 2.0).is_err());
    }

    #[test]
    fn test_breakpoints_deserialize_validated() {
        let mf: MembershipFunction = serde_json::from_str("[1.0, 2.0, 3.0]").unwrap();
        assert_eq!(mf.breakpoints(), [1.0, 2.0, 3.0]);
        assert!(serde_json::from_str::<MembershipFunction>("[3.0, 2.0, 1.0]").is_err());
    }

    #[test]
    fn test_universe_points() {
        let universe = Universe::new(0.0, 50.0, 1.0).unwrap();
        let points: Vec<f64> = universe.points().collect();
        assert_eq!(points.len(), 51);
        assert_eq!(universe.len(), 51);
        assert_eq!(points[0], 0.0);
        assert_eq!(points[50], 50.0);
        assert_eq!(points[20], 20.0);
    }

    #[test]
    fn test_universe_pins_last_point() {
        let universe = Universe::new(0.0, 5.0, 2.0).unwrap();
        let points: Vec<f64> = universe.points().collect();
        assert_eq!(points, vec![0.0, 2.0, 4.0, 5.0]);
    }

    #[test]
    fn test_invalid_universe() {
        assert!(Universe::new(5.0, 0.0, 1.0).is_err());
        assert!(Universe::new(0.0, 5.0, 0.0).is_err());
        assert!(Universe::new(0.0, f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_universe_resolution_capped() {
        assert!(Universe::new(0.0, 50.0, 1e-15).is_err());
        let fine = r#"{ "min": 0.0, "max": 5.0, "step": 1e-12 }"#;
        assert!(serde_json::from_str::<Universe>(fine).is_err());

        let finest = Universe::new(0.0, 1.0, 1.0 / MAX_UNIVERSE_STEPS as f64).unwrap();
        assert_eq!(finest.len(), MAX_UNIVERSE_STEPS + 1);
    }

    #[test]
    fn test_universe_contains() {
        let universe = Universe::new(0.0, 5.0, 1.0).unwrap();
        assert!(universe.contains(0.0));
        assert!(universe.contains(5.0));
        assert!(!universe.contains(-0.1));
        assert!(!universe.contains(f64::NAN));
    }

    proptest! {
        #[test]
        fn degree_is_bounded(
            a in -50.0f64..50.0,
            w1 in 0.0f64..30.0,
            w2 in 0.0f64..30.0,
            x in -100.0f64..100.0,
        ) {
            let mf = MembershipFunction::triangular(a, a + w1, a + w1 + w2).unwrap();
            let degree = mf.degree(x);
            prop_assert!((0.0..=1.0).contains(&degree));
        }

        #[test]
        fn degree_monotonic_on_segments(
            a in -50.0f64..50.0,
            w1 in 0.1f64..30.0,
            w2 in 0.1f64..30.0,
            t1 in 0.0f64..1.0,
            t2 in 0.0f64..1.0,
        ) {
            let mf = MembershipFunction::triangular(a, a + w1, a + w1 + w2).unwrap();
            let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

            // rising edge
            let x_lo = a + lo * w1;
            let x_hi = a + hi * w1;
            prop_assert!(mf.degree(x_lo) <= mf.degree(x_hi) + 1e-12);

            // falling edge
            let y_lo = a + w1 + lo * w2;
            let y_hi = a + w1 + hi * w2;
            prop_assert!(mf.degree(y_lo) + 1e-12 >= mf.degree(y_hi));
        }
    }
}
