/// Tolerance used by every `approx_eq` in the crate.
pub const EPSILON: f64 = 0.000001;

/// Relative/absolute comparison: `|a - b| <= eps * max(1, |a|, |b|)`.
#[inline]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps * 1.0f64.max(a.abs()).max(b.abs())
}

/// Source of uniformly distributed values in `[0, 1)`.
///
/// Every `rand::Rng` is one, so a seeded `StdRng` can be passed anywhere a
/// deterministic source is needed.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }
}
