//! Navigation: status flags, trust levels, configuration and the
//! navigator state machine.
//!
//! The navigator keeps a sorted cache of upcoming surface intersections in
//! its per-track state and refreshes it incrementally between stepper
//! calls. How much of the cache is reused is governed by the trust level:
//! actors and stepper policies may only *lower* trust; a successful
//! navigation call restores it to full.

pub mod inspectors;
pub mod navigator;

use crate::intersect::IntersectionRecord;
use crate::types::Scalar;
use crate::units::UM;

// Re-exports
pub use inspectors::{ObjectTracer, PrintInspector};
pub use navigator::{NavState, Navigator};

/// Navigation status flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i8)]
pub enum NavStatus {
  /// Unrecoverable error, propagation will be aborted.
  Abort = -3,
  /// Navigation exited successfully.
  OnTarget = -2,
  /// Not initialized yet.
  Unknown = -1,
  /// Moving towards the next surface.
  TowardsObject = 0,
  /// Reached a module surface.
  OnModule = 1,
  /// Reached a portal surface.
  OnPortal = 2,
}

/// Navigation direction with respect to the track momentum.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(i8)]
pub enum NavDirection {
  Backward = -1,
  Forward = 1,
}

impl NavDirection {
  #[inline]
  pub fn sign(&self) -> Scalar {
    *self as i8 as Scalar
  }
}

/// How fresh the candidate cache is deemed to be; governs how much work
/// an update performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrustLevel {
  /// Re-initialize the volume (run the local navigation from scratch).
  NoTrust,
  /// Re-evaluate distance and order of all cached candidates.
  Fair,
  /// Re-evaluate the distance to the current target only.
  High,
  /// The cache is up to date, nothing to do.
  Full,
}

/// Navigation configuration.
#[derive(Clone, Debug)]
pub struct NavConfig {
  /// Tolerance on the mask `is_inside` check for modules; portals are
  /// always checked with zero slack.
  pub mask_tolerance: Scalar,
  /// Maximal absolute path for a track to be considered on surface.
  pub on_surface_tolerance: Scalar,
  /// Negative cutoff: candidates at or behind this path are rejected.
  pub overstep_tolerance: Scalar,
  /// Per-axis half-size of the search window for grid accelerators.
  pub search_window: [usize; 2],
  /// Candidate cache capacity reserved at initialization.
  pub max_candidates: usize,
}

impl Default for NavConfig {
  fn default() -> Self {
    Self {
      mask_tolerance: 15.0 * UM,
      on_surface_tolerance: 1.0 * UM,
      overstep_tolerance: -100.0 * UM,
      search_window: [0, 0],
      max_candidates: 20,
    }
  }
}

impl NavConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_mask_tolerance(mut self, tol: Scalar) -> Self {
    self.mask_tolerance = tol;
    self
  }

  pub fn with_overstep_tolerance(mut self, tol: Scalar) -> Self {
    self.overstep_tolerance = tol;
    self
  }

  pub fn with_search_window(mut self, window: [usize; 2]) -> Self {
    self.search_window = window;
    self
  }

  pub fn with_max_candidates(mut self, n: usize) -> Self {
    self.max_candidates = n;
    self
  }
}

/// Read-only snapshot of the navigation state handed to inspectors.
pub struct NavView<'a> {
  pub status: NavStatus,
  pub trust_level: TrustLevel,
  pub direction: NavDirection,
  pub heartbeat: bool,
  pub volume: u32,
  pub candidates: &'a [IntersectionRecord],
  pub next_idx: usize,
  pub last_idx: usize,
}

impl NavView<'_> {
  /// The candidate that was just reached, if any.
  pub fn current(&self) -> Option<&IntersectionRecord> {
    self.next_idx.checked_sub(1).map(|i| &self.candidates[i])
  }

  /// The candidate the navigation moves towards, if any.
  pub fn next(&self) -> Option<&IntersectionRecord> {
    (self.next_idx < self.last_idx).then(|| &self.candidates[self.next_idx])
  }

  /// Number of still-reachable candidates.
  pub fn n_reachable(&self) -> usize {
    self.last_idx.saturating_sub(self.next_idx)
  }
}

/// Capability trait for observing the navigation flow.
///
/// Inspectors are called at the end of every init/update and on the
/// terminal transitions. The void inspector is a zero-sized no-op, so the
/// hot path monomorphizes to nothing.
pub trait Inspector {
  fn inspect(&mut self, view: &NavView<'_>, message: &str);
}

/// Inspector that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct VoidInspector;

impl Inspector for VoidInspector {
  #[inline]
  fn inspect(&mut self, _view: &NavView<'_>, _message: &str) {}
}

/// Pairs of inspectors compose.
impl<A: Inspector, B: Inspector> Inspector for (A, B) {
  fn inspect(&mut self, view: &NavView<'_>, message: &str) {
    self.0.inspect(view, message);
    self.1.inspect(view, message);
  }
}
