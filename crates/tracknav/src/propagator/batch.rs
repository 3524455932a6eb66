//! Batch propagation stage, following the Enqueue -> Tick -> Completions
//! pattern.
//!
//! Tracks are independent: each request gets its own propagation state and
//! the read-only detector is shared, so a tick fans the pending requests
//! out over rayon without locking.

use rayon::prelude::*;
use web_time::Instant;

use crate::geometry::Detector;
use crate::navigation::ObjectTracer;
use crate::track::FreeTrack;
use crate::types::Scalar;

#[cfg(feature = "metrics")]
use crate::metrics::PropagationMetrics;

use super::actors::PathLimitAborter;
use super::stepper::{Stepper, StepperState};
use super::{Propagation, Propagator};

/// Request to propagate a single track.
#[derive(Clone, Copy)]
pub struct TrackRequest {
  /// Unique identifier for this request
  pub id: u64,
  /// Track parameters at the start vertex
  pub track: FreeTrack,
  /// Volume containing the vertex
  pub start_volume: u32,
}

/// Completed propagation result.
pub struct TrackCompletion {
  /// Request ID this completion corresponds to
  pub id: u64,
  /// Whether the track left the world through a portal
  pub complete: bool,
  /// Final track parameters
  pub track: FreeTrack,
  /// Signed path length accumulated
  pub path_length: Scalar,
  /// Number of sensitive surfaces encountered
  pub sensitive_hits: usize,
  /// Wall time of the propagation in microseconds
  pub propagate_time_us: u64,
}

/// Propagation stage that processes track requests in parallel.
pub struct PropagationStage<'d, S: Stepper> {
  detector: &'d Detector,
  propagator: Propagator<S>,
  /// Path budget handed to every track's aborter.
  path_limit: Scalar,
  /// Pending requests waiting to be processed
  pending: Vec<TrackRequest>,
  /// Completed results ready to be collected
  completed: Vec<TrackCompletion>,
  /// Next request ID
  next_id: u64,
  #[cfg(feature = "metrics")]
  pub metrics: PropagationMetrics,
}

impl<'d, S: Stepper + Sync> PropagationStage<'d, S> {
  pub fn new(detector: &'d Detector, propagator: Propagator<S>, path_limit: Scalar) -> Self {
    Self {
      detector,
      propagator,
      path_limit,
      pending: Vec::new(),
      completed: Vec::new(),
      next_id: 0,
      #[cfg(feature = "metrics")]
      metrics: PropagationMetrics::default(),
    }
  }

  /// Enqueue a track, returning the assigned ID.
  pub fn enqueue(&mut self, track: FreeTrack, start_volume: u32) -> u64 {
    let id = self.next_id;
    self.next_id += 1;
    self.pending.push(TrackRequest {
      id,
      track,
      start_volume,
    });
    id
  }

  /// Propagate all pending tracks in parallel and move the results to the
  /// completion queue. Returns the number of tracks processed this tick.
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "batch::tick")
  )]
  pub fn tick(&mut self) -> usize {
    if self.pending.is_empty() {
      return 0;
    }

    let requests = std::mem::take(&mut self.pending);
    let count = requests.len();

    let detector = self.detector;
    let propagator = &self.propagator;
    let path_limit = self.path_limit;

    let completions: Vec<TrackCompletion> = requests
      .into_par_iter()
      .map(|req| {
        let start = Instant::now();

        let mut prop = Propagation::with_inspector(
          detector,
          &propagator.stepper,
          req.track,
          req.start_volume,
          ObjectTracer::new(),
        );
        let mut actors = (PathLimitAborter::new(path_limit),);
        let complete = propagator.propagate(&mut prop, &mut actors);

        let sensitive_hits = prop
          .navigation
          .inspector()
          .trace
          .iter()
          .filter(|rec| rec.sf_desc.is_sensitive())
          .count();

        TrackCompletion {
          id: req.id,
          complete,
          track: *prop.stepping.track(),
          path_length: prop.stepping.path_accumulated(),
          sensitive_hits,
          propagate_time_us: start.elapsed().as_micros() as u64,
        }
      })
      .collect();

    #[cfg(feature = "metrics")]
    for completion in &completions {
      self.metrics.record_track(completion);
    }

    self.completed.extend(completions);
    count
  }

  /// Take all completed propagations.
  pub fn drain_completions(&mut self) -> Vec<TrackCompletion> {
    std::mem::take(&mut self.completed)
  }

  /// Number of pending requests.
  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  /// Number of completed results waiting to be drained.
  pub fn completed_count(&self) -> usize {
    self.completed.len()
  }

  /// True when no work remains.
  pub fn is_idle(&self) -> bool {
    self.pending.is_empty() && self.completed.is_empty()
  }
}
