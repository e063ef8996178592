use std::collections::VecDeque;

use thiserror::Error;

use crate::{
    config::history_capacity,
    fitting::{
        data_set_fitter::{DataSetFitter, FitError},
        fitter::{Fitter, TickInverseFitter, TimeInverseFitter},
    },
    types::Tick,
    wrapping_tick::{sequence_less_than, wrapping_diff},
};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HistoryError {
    /// Time keys must be finite
    #[error("Snapshot time {time}s is not a finite number")]
    InvalidTime { time: f64 },
    /// Entries are appended in key order only
    #[error("Snapshot at tick {tick} / time {time}s is older than the latest entry (tick {latest_tick} / time {latest_time}s)")]
    OutOfOrder {
        tick: Tick,
        time: f64,
        latest_tick: Tick,
        latest_time: f64,
    },
}

/// Bounded record of recently received snapshots, indexed both by the tick
/// they were sent at and by the local time they arrived at.
///
/// Both sequences hold the same snapshots, in ascending key order. Tick order
/// allows for wrap-around. Once full, every push evicts the oldest entry.
#[derive(Clone, Debug)]
pub struct SnapshotHistory<T> {
    capacity: usize,
    by_tick: VecDeque<(Tick, T)>,
    by_time: VecDeque<(f64, T)>,
}

impl<T: Clone> SnapshotHistory<T> {
    /// Sized to cover `HISTORY_SECONDS` of ticks
    pub fn new(tick_step: f64) -> Self {
        Self::with_capacity(history_capacity(tick_step))
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            by_tick: VecDeque::with_capacity(capacity),
            by_time: VecDeque::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, tick: Tick, time: f64, snapshot: T) -> Result<(), HistoryError> {
        if !time.is_finite() {
            return Err(HistoryError::InvalidTime { time });
        }

        if let (Some((latest_tick, _)), Some((latest_time, _))) =
            (self.by_tick.back(), self.by_time.back())
        {
            if sequence_less_than(tick, *latest_tick) || time < *latest_time {
                return Err(HistoryError::OutOfOrder {
                    tick,
                    time,
                    latest_tick: *latest_tick,
                    latest_time: *latest_time,
                });
            }
        }

        if self.by_tick.len() == self.capacity {
            self.by_tick.pop_front();
            self.by_time.pop_front();
        }

        self.by_tick.push_back((tick, snapshot.clone()));
        self.by_time.push_back((time, snapshot));

        Ok(())
    }

    pub fn fit_tick<F: Fitter<T>>(&self, fitter: &F, tick: Tick) -> Result<T, FitError> {
        let Some((origin, _)) = self.by_tick.front() else {
            return Err(FitError::NoData);
        };
        // unwrap every tick onto the oldest entry
        let unwrapped = |sample: &Tick| i64::from(wrapping_diff(*origin, *sample));
        let key = unwrapped(&tick);

        DataSetFitter::new(TickInverseFitter, fitter).fit_by(&self.by_tick, unwrapped, key)
    }

    pub fn fit_time<F: Fitter<T>>(&self, fitter: &F, time: f64) -> Result<T, FitError> {
        DataSetFitter::new(TimeInverseFitter, fitter).fit(&self.by_time, time)
    }
}

impl<T> SnapshotHistory<T> {
    pub fn latest(&self) -> Option<&T> {
        self.by_tick.back().map(|(_, snapshot)| snapshot)
    }

    pub fn latest_tick(&self) -> Option<Tick> {
        self.by_tick.back().map(|(tick, _)| *tick)
    }

    pub fn len(&self) -> usize {
        self.by_tick.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tick.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ticks(&self) -> impl Iterator<Item = &(Tick, T)> {
        self.by_tick.iter()
    }

    pub fn times(&self) -> impl Iterator<Item = &(f64, T)> {
        self.by_time.iter()
    }

    pub fn clear(&mut self) {
        self.by_tick.clear();
        self.by_time.clear();
    }
}
