use std::collections::VecDeque;

use thiserror::Error;

use crate::fitting::fitter::{Fitter, InverseFitter};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FitError {
    /// There is nothing to fit against
    #[error("Cannot fit a value from an empty data set")]
    NoData,
}

/// Fits a value at an arbitrary key from a data set sorted by key.
///
/// An exact key hit returns the stored sample. A key between two samples is
/// interpolated. A key outside the data set holds the nearest sample.
pub struct DataSetFitter<I, F> {
    inverse: I,
    fitter: F,
}

impl<I, F> DataSetFitter<I, F> {
    pub fn new(inverse: I, fitter: F) -> Self {
        Self { inverse, fitter }
    }

    pub fn fit<K, T>(&self, samples: &VecDeque<(K, T)>, key: K) -> Result<T, FitError>
    where
        K: PartialOrd + Copy,
        T: Clone,
        I: InverseFitter<K>,
        F: Fitter<T>,
    {
        self.fit_by(samples, |sample_key| *sample_key, key)
    }

    /// Like `fit`, with samples ordered by `project(sample key)`. `key` is
    /// given in projected form.
    pub fn fit_by<K, Q, T>(
        &self,
        samples: &VecDeque<(K, T)>,
        project: impl Fn(&K) -> Q,
        key: Q,
    ) -> Result<T, FitError>
    where
        Q: PartialOrd,
        T: Clone,
        I: InverseFitter<Q>,
        F: Fitter<T>,
    {
        // first index with a key strictly above the requested one
        let upper = samples.partition_point(|(sample_key, _)| project(sample_key) <= key);

        if upper == 0 {
            return samples
                .front()
                .map(|(_, value)| value.clone())
                .ok_or(FitError::NoData);
        }

        let (lower_key, lower_value) = &samples[upper - 1];
        let lower_key = project(lower_key);
        if lower_key == key || upper == samples.len() {
            return Ok(lower_value.clone());
        }

        let (upper_key, upper_value) = &samples[upper];
        let t = self
            .inverse
            .inverse_fit(&lower_key, &project(upper_key), &key);
        Ok(self.fitter.fit(lower_value, upper_value, t))
    }
}
