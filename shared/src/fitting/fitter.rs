use crate::types::Tick;

/// Blends two values. `t` is 0 at `a` and 1 at `b`.
pub trait Fitter<T> {
    fn fit(&self, a: &T, b: &T, t: f64) -> T;
}

impl<T, F: Fitter<T> + ?Sized> Fitter<T> for &F {
    fn fit(&self, a: &T, b: &T, t: f64) -> T {
        (**self).fit(a, b, t)
    }
}

/// Locates a key between two others, as the `t` a `Fitter` expects.
pub trait InverseFitter<K> {
    fn inverse_fit(&self, a: &K, b: &K, key: &K) -> f64;
}

/// Inverse fitter for tick-keyed samples
#[derive(Clone, Copy, Debug, Default)]
pub struct TickInverseFitter;

impl InverseFitter<Tick> for TickInverseFitter {
    fn inverse_fit(&self, a: &Tick, b: &Tick, key: &Tick) -> f64 {
        let span = i64::from(*b) - i64::from(*a);
        if span == 0 {
            return 0.0;
        }
        (i64::from(*key) - i64::from(*a)) as f64 / span as f64
    }
}

/// Ticks already unwrapped onto a common origin
impl InverseFitter<i64> for TickInverseFitter {
    fn inverse_fit(&self, a: &i64, b: &i64, key: &i64) -> f64 {
        let span = b - a;
        if span == 0 {
            return 0.0;
        }
        (key - a) as f64 / span as f64
    }
}

/// Inverse fitter for samples keyed by local time in seconds
#[derive(Clone, Copy, Debug, Default)]
pub struct TimeInverseFitter;

impl InverseFitter<f64> for TimeInverseFitter {
    fn inverse_fit(&self, a: &f64, b: &f64, key: &f64) -> f64 {
        let span = b - a;
        if span == 0.0 {
            return 0.0;
        }
        (key - a) / span
    }
}
