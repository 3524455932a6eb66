//! Propagation statistics.
//!
//! Everything here is double-gated: the `metrics` cargo feature compiles
//! the collection in, and [`COLLECT_METRICS`] can still switch it off at
//! runtime. With the feature absent, [`is_enabled`] folds to a constant
//! `false` and every `record_*` call optimizes away.
//!
//! ```ignore
//! use tracknav::metrics::{PropagationMetrics, COLLECT_METRICS};
//!
//! // Compile with --features metrics; flip off at runtime if needed:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // During a batch tick:
//! metrics.record_track(&completion);
//! ```

use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

use crate::propagator::TrackCompletion;

/// Runtime switch for statistics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Whether statistics are collected right now (feature and runtime switch
/// combined).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Bounded history of the most recent samples.
///
/// Backed by a flat buffer that is overwritten in place once full: the
/// write cursor walks the buffer circularly, so recording never shifts or
/// reallocates anything after the warm-up phase. Iteration yields the
/// surviving samples oldest first.
#[derive(Debug, Clone)]
pub struct SampleRing<T> {
  slots: Vec<T>,
  /// Next slot to overwrite once the buffer is full; slot 0 while it
  /// still grows.
  cursor: usize,
  capacity: usize,
}

impl<T> SampleRing<T> {
  /// Ring keeping at most `capacity` samples.
  pub fn new(capacity: usize) -> Self {
    assert!(capacity > 0, "sample ring needs at least one slot");
    Self {
      slots: Vec::with_capacity(capacity),
      cursor: 0,
      capacity,
    }
  }

  /// Store a sample; the oldest one is overwritten once the ring is full.
  pub fn record(&mut self, value: T) {
    if self.slots.len() < self.capacity {
      self.slots.push(value);
    } else {
      self.slots[self.cursor] = value;
      self.cursor = (self.cursor + 1) % self.capacity;
    }
  }

  /// Number of samples currently held.
  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }

  /// Drop all samples.
  pub fn clear(&mut self) {
    self.slots.clear();
    self.cursor = 0;
  }

  /// Samples from oldest to newest.
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    let (newer, older) = self.slots.split_at(self.cursor);
    older.iter().chain(newer.iter())
  }

  /// The sample recorded last, if any.
  pub fn latest(&self) -> Option<&T> {
    if self.slots.len() < self.capacity {
      self.slots.last()
    } else {
      self.slots.get((self.cursor + self.capacity - 1) % self.capacity)
    }
  }
}

impl SampleRing<u64> {
  /// Arithmetic mean over the held samples, 0 when empty.
  pub fn mean(&self) -> f64 {
    if self.slots.is_empty() {
      return 0.0;
    }
    self.slots.iter().sum::<u64>() as f64 / self.slots.len() as f64
  }

  /// Smallest and largest held sample.
  pub fn bounds(&self) -> Option<(u64, u64)> {
    self.slots.iter().fold(None, |acc, &v| match acc {
      None => Some((v, v)),
      Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
  }
}

impl Default for SampleRing<u64> {
  fn default() -> Self {
    Self::new(128)
  }
}

/// Batch-level statistics, updated per completed track.
#[derive(Debug, Clone)]
pub struct PropagationMetrics {
  /// Recent per-track propagation times in microseconds.
  pub propagate_timings: SampleRing<u64>,
  /// Recent sensitive-hit counts per track.
  pub hits_per_track: SampleRing<u64>,
  /// Tracks that left the detector world.
  pub tracks_completed: u64,
  /// Tracks that were aborted.
  pub tracks_aborted: u64,
  /// Total absolute path length propagated.
  pub total_path: f64,
}

impl Default for PropagationMetrics {
  fn default() -> Self {
    Self {
      propagate_timings: SampleRing::new(128),
      hits_per_track: SampleRing::new(128),
      tracks_completed: 0,
      tracks_aborted: 0,
      total_path: 0.0,
    }
  }
}

impl PropagationMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reset all statistics.
  pub fn reset(&mut self) {
    self.propagate_timings.clear();
    self.hits_per_track.clear();
    self.tracks_completed = 0;
    self.tracks_aborted = 0;
    self.total_path = 0.0;
  }

  /// Account a completed propagation.
  pub fn record_track(&mut self, completion: &TrackCompletion) {
    if !is_enabled() {
      return;
    }

    self.propagate_timings.record(completion.propagate_time_us);
    self.hits_per_track.record(completion.sensitive_hits as u64);
    if completion.complete {
      self.tracks_completed += 1;
    } else {
      self.tracks_aborted += 1;
    }
    self.total_path += completion.path_length.abs();
  }

  /// Mean propagation time in microseconds.
  pub fn avg_propagate_time_us(&self) -> f64 {
    self.propagate_timings.mean()
  }
}
