//! The geometry navigator: candidate cache, trust-level protocol and
//! volume switching.
//!
//! The navigator is initialized around a detector and performs a local
//! navigation within one volume at a time, based on the accelerator
//! structure the volume provides. Once the local candidates are exhausted
//! or a portal is reached, it moves on to the next volume through the
//! portal's navigation link.
//!
//! Every candidate carries the link to the volume behind its surface: a
//! module links back to its mother volume, a portal links to the next
//! volume along the track. The candidate cache is updated according to the
//! state's trust level, which actors and stepper policies may lower
//! between calls; `init` and a successful update restore full trust.
//!
//! The navigation heartbeat signals that the flow is still alive; it only
//! drops on a successful exit or an unrecoverable inconsistency.

use crate::geometry::{Barcode, Detector, SurfaceDesc, SurfaceKind};
use crate::intersect::{self, IntersectionRecord, Ray};
use crate::track::FreeTrack;
use crate::types::{Scalar, INVALID_VOLUME};

use super::{Inspector, NavConfig, NavDirection, NavStatus, NavView, TrustLevel, VoidInspector};

/// Per-track navigation state.
///
/// Owns the candidate cache exclusively; the detector reference is shared
/// and read-only. The cursor pair `(next, last)` brackets the sorted range
/// of still-reachable candidates.
pub struct NavState<'d, I: Inspector = VoidInspector> {
  detector: &'d Detector,
  candidates: Vec<IntersectionRecord>,
  next_idx: usize,
  last_idx: usize,
  inspector: I,
  status: NavStatus,
  direction: NavDirection,
  trust_level: TrustLevel,
  heartbeat: bool,
  volume_index: u32,
}

impl<'d> NavState<'d> {
  /// State starting in volume 0.
  pub fn new(detector: &'d Detector) -> Self {
    Self::new_in_volume(detector, 0)
  }

  /// State starting in a specific volume.
  pub fn new_in_volume(detector: &'d Detector, volume: u32) -> Self {
    Self::with_inspector(detector, volume, VoidInspector)
  }
}

impl<'d, I: Inspector> NavState<'d, I> {
  /// State with an attached inspector.
  pub fn with_inspector(detector: &'d Detector, volume: u32, inspector: I) -> Self {
    Self {
      detector,
      candidates: Vec::new(),
      next_idx: 0,
      last_idx: 0,
      inspector,
      status: NavStatus::Unknown,
      direction: NavDirection::Forward,
      trust_level: TrustLevel::NoTrust,
      heartbeat: false,
      volume_index: volume,
    }
  }

  #[inline]
  pub fn detector(&self) -> &'d Detector {
    self.detector
  }

  /// Currently cached candidates (the full cache, not just the reachable
  /// range).
  pub fn candidates(&self) -> &[IntersectionRecord] {
    &self.candidates
  }

  /// Number of still-reachable candidates.
  #[inline]
  pub fn n_candidates(&self) -> usize {
    self.last_idx.saturating_sub(self.next_idx)
  }

  /// The still-reachable, sorted candidate range `[next, last)`.
  pub fn reachable(&self) -> &[IntersectionRecord] {
    &self.candidates[self.next_idx..self.last_idx]
  }

  /// The candidate that was just reached, if any.
  #[inline]
  pub fn current(&self) -> Option<&IntersectionRecord> {
    self.next_idx.checked_sub(1).map(|i| &self.candidates[i])
  }

  /// The candidate the navigation moves towards (the current target).
  #[inline]
  pub fn next_record(&self) -> Option<&IntersectionRecord> {
    (self.next_idx < self.last_idx).then(|| &self.candidates[self.next_idx])
  }

  /// Distance to the current target, the stepper's path constraint.
  #[inline]
  pub fn target_path(&self) -> Scalar {
    self.next_record().map_or(0.0, |c| c.path)
  }

  /// The surface the navigation intends to reach next.
  pub fn next_surface(&self) -> Option<&SurfaceDesc> {
    self.next_record().map(|c| &c.sf_desc)
  }

  /// Barcode of the surface the navigation is on (invalid when not on
  /// surface).
  pub fn barcode(&self) -> Barcode {
    if matches!(self.status, NavStatus::OnModule | NavStatus::OnPortal) {
      self.current().map_or(Barcode::INVALID, |c| c.sf_desc.barcode)
    } else {
      Barcode::INVALID
    }
  }

  /// Current volume index.
  #[inline]
  pub fn volume(&self) -> u32 {
    self.volume_index
  }

  /// Set the start/new volume.
  #[inline]
  pub fn set_volume(&mut self, volume: u32) {
    self.volume_index = volume;
  }

  #[inline]
  pub fn status(&self) -> NavStatus {
    self.status
  }

  #[inline]
  pub fn direction(&self) -> NavDirection {
    self.direction
  }

  #[inline]
  pub fn set_direction(&mut self, dir: NavDirection) {
    self.direction = dir;
  }

  #[inline]
  pub fn trust_level(&self) -> TrustLevel {
    self.trust_level
  }

  /// Demand a full re-initialization of the current volume.
  #[inline]
  pub fn set_no_trust(&mut self) {
    self.trust_level = TrustLevel::NoTrust;
  }

  /// Demand a re-evaluation of all cached candidates. Never raises an
  /// already lower trust level.
  #[inline]
  pub fn set_fair_trust(&mut self) {
    self.trust_level = self.trust_level.min(TrustLevel::Fair);
  }

  /// Demand a re-evaluation of the current target. Never raises an
  /// already lower trust level.
  #[inline]
  pub fn set_high_trust(&mut self) {
    self.trust_level = self.trust_level.min(TrustLevel::High);
  }

  /// No-op kept for interface symmetry: trust can only be restored by the
  /// navigator itself.
  #[inline]
  pub fn set_full_trust(&mut self) {
    self.trust_level = self.trust_level.min(TrustLevel::Full);
  }

  #[inline]
  pub fn heartbeat(&self) -> bool {
    self.heartbeat
  }

  #[inline]
  pub fn is_on_module(&self) -> bool {
    self.status == NavStatus::OnModule
  }

  #[inline]
  pub fn is_on_portal(&self) -> bool {
    self.status == NavStatus::OnPortal
  }

  /// On a module that is a sensitive surface.
  pub fn is_on_sensitive(&self) -> bool {
    self.is_on_module() && self.barcode().kind() == SurfaceKind::Sensitive
  }

  /// On a surface that carries material.
  pub fn encountered_material(&self) -> bool {
    (self.is_on_module() || self.is_on_portal())
      && self.current().is_some_and(|c| c.sf_desc.has_material())
  }

  /// No reachable candidate left in the cache.
  #[inline]
  pub fn is_exhausted(&self) -> bool {
    self.next_idx >= self.last_idx
  }

  /// Navigation finished by reaching its target (left the world).
  #[inline]
  pub fn is_complete(&self) -> bool {
    self.status == NavStatus::OnTarget && !self.heartbeat
  }

  #[inline]
  pub fn inspector(&self) -> &I {
    &self.inspector
  }

  /// Terminal transition on an unrecoverable inconsistency. The cache is
  /// left in place for inspection.
  pub fn abort(&mut self) -> bool {
    self.status = NavStatus::Abort;
    self.heartbeat = false;
    self.trust_level = TrustLevel::Full;
    self.run_inspector("Aborted: ");
    self.heartbeat
  }

  /// Terminal transition on reaching the target / leaving the detector
  /// world. Clears the cache.
  pub fn exit(&mut self) -> bool {
    self.status = NavStatus::OnTarget;
    self.heartbeat = false;
    self.trust_level = TrustLevel::Full;
    self.run_inspector("Exited: ");
    self.clear();
    self.heartbeat
  }

  /// The ray probing the geometry: the track direction signed with the
  /// navigation direction.
  fn nav_ray(&self, track: &FreeTrack) -> Ray {
    Ray::new(track.pos, track.dir * self.direction.sign())
  }

  fn clear(&mut self) {
    self.candidates.clear();
    self.next_idx = 0;
    self.last_idx = 0;
  }

  fn run_inspector(&mut self, message: &str) {
    let Self {
      inspector,
      candidates,
      status,
      trust_level,
      direction,
      heartbeat,
      volume_index,
      next_idx,
      last_idx,
      ..
    } = self;
    let view = NavView {
      status: *status,
      trust_level: *trust_level,
      direction: *direction,
      heartbeat: *heartbeat,
      volume: *volume_index,
      candidates: candidates.as_slice(),
      next_idx: *next_idx,
      last_idx: *last_idx,
    };
    inspector.inspect(&view, message);
  }
}

/// The navigator. Stateless: all mutable data lives in [`NavState`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Navigator;

impl Navigator {
  /// Initialize the candidate cache for the state's current volume.
  ///
  /// Queries the volume's accelerator structure, intersects every
  /// candidate surface and sorts the reachable intersections by path.
  /// Returns the heartbeat; a failed init means the propagation setup is
  /// broken.
  pub fn init<I: Inspector>(
    &self,
    state: &mut NavState<'_, I>,
    track: &FreeTrack,
    cfg: &NavConfig,
  ) -> bool {
    let det = state.detector;
    let volume = det.volume(state.volume_index);
    let ray = state.nav_ray(track);

    state.clear();
    state.heartbeat = true;
    state.candidates.reserve(cfg.max_candidates);

    // Search for neighboring surfaces and fill the cache
    let volume_trf = det.transform(volume.transform);
    let candidates = &mut state.candidates;
    det.accel().visit_neighborhood(
      volume,
      volume_trf,
      ray.pos,
      ray.dir,
      cfg.search_window,
      |sf_idx| {
        let sf = det.surface(sf_idx);
        let mask = det.mask(sf);
        let trf = det.transform(sf.transform);
        let mask_tol = if sf.is_portal() { 0.0 } else { cfg.mask_tolerance };
        intersect::intersect_append(
          &ray,
          sf,
          mask,
          trf,
          mask_tol,
          cfg.overstep_tolerance,
          candidates,
        );
      },
    );

    // Sort and pick the closest candidate; no unreachable entries are in
    // the cache after a local navigation
    intersect::sort_by_path(&mut state.candidates);
    state.next_idx = 0;
    state.last_idx = state.candidates.len();

    self.update_navigation_state(state, cfg);

    // If init failed, the propagation setup is broken
    if state.trust_level != TrustLevel::Full {
      state.heartbeat = false;
    }
    state.run_inspector("Init complete: ");

    state.heartbeat
  }

  /// Complete update of the navigation flow after a stepper call.
  ///
  /// Restores full trust to the candidate cache according to the current
  /// trust level, then checks whether the track stepped onto a portal and
  /// a volume switch is due. When trust cannot be restored, the volume is
  /// re-initialized; if that fails too, the navigation aborts.
  pub fn update<I: Inspector>(
    &self,
    state: &mut NavState<'_, I>,
    track: &FreeTrack,
    cfg: &NavConfig,
  ) -> bool {
    self.update_kernel(state, track, cfg);

    // Update was completely successful (most likely case)
    if state.trust_level == TrustLevel::Full {
      return state.heartbeat;
    }

    // Did we run into a portal?
    if state.is_on_portal() {
      let link = state.current().map_or(INVALID_VOLUME, |c| c.volume_link);
      state.set_volume(link);

      // Reached the end of the detector world
      if link == INVALID_VOLUME {
        return state.exit();
      }

      self.init(state, track, cfg);
      // Fresh initialization in the new volume: reset trust and heartbeat
      state.trust_level = TrustLevel::Full;
      state.heartbeat = true;
      return state.heartbeat;
    }

    // No trust could be restored: local navigation might be exhausted
    let alive = self.init(state, track, cfg);
    state.heartbeat &= alive;

    // Should never fail after a complete re-initialization
    if state.trust_level != TrustLevel::Full || state.is_exhausted() {
      return state.abort();
    }

    state.heartbeat
  }

  /// Re-evaluate the cache according to the trust level.
  fn update_kernel<I: Inspector>(
    &self,
    state: &mut NavState<'_, I>,
    track: &FreeTrack,
    cfg: &NavConfig,
  ) {
    // Current candidates are up to date, nothing left to do
    if state.trust_level == TrustLevel::Full {
      return;
    }

    let ray = state.nav_ray(track);

    // Update only the current target, while the state is still coherent
    if state.trust_level == TrustLevel::High {
      let target = state.next_idx;
      if state.is_exhausted() || !self.refresh_candidate(state, &ray, target, cfg) {
        // The target is not reachable anymore: high trust is broken
        state.status = NavStatus::Unknown;
        state.set_no_trust();
        return;
      }

      self.update_navigation_state(state, cfg);
      state.run_inspector("Update complete: high trust: ");

      // Done if the track has not reached a surface yet, or trust is gone
      // (portal reached or cache exhausted)
      if state.status == NavStatus::TowardsObject || state.trust_level == TrustLevel::NoTrust {
        return;
      }

      // Track is on a module: ready the following target as well
      let target = state.next_idx;
      if self.refresh_candidate(state, &ray, target, cfg) {
        return;
      }

      // The following target is not reachable: escalate to a full cache
      // refresh
      state.set_fair_trust();
    }

    // Re-evaluate and re-sort all remaining candidates, for a stale but
    // not invalid state
    if state.trust_level == TrustLevel::Fair {
      for idx in state.next_idx..state.last_idx {
        if !self.refresh_candidate(state, &ray, idx, cfg) {
          // Force unreachable candidates to the tail of the sort
          state.candidates[idx].path = Scalar::MAX;
        }
      }
      intersect::sort_by_path(&mut state.candidates[state.next_idx..state.last_idx]);
      // Ignore invalidated elements when determining exhaustion
      state.last_idx = state.candidates[state.next_idx..]
        .iter()
        .position(|c| c.path == Scalar::MAX)
        .map_or(state.candidates.len(), |off| state.next_idx + off);

      self.update_navigation_state(state, cfg);
      state.run_inspector("Update complete: fair trust: ");
      return;
    }

    // An actor flagged the cache as broken; other no-trust cases are
    // handled after the portal check in `update`
    if state.trust_level == TrustLevel::NoTrust {
      let alive = self.init(state, track, cfg);
      state.heartbeat &= alive;
    }
  }

  /// Re-establish status and trust after the cache was brought up to
  /// date.
  ///
  /// Advances the target cursor when the track reached the current
  /// candidate; flags no-trust when a volume switch or re-initialization
  /// is needed.
  fn update_navigation_state<I: Inspector>(&self, state: &mut NavState<'_, I>, cfg: &NavConfig) {
    let on_object = state
      .next_record()
      .is_some_and(|c| c.path.abs() <= cfg.on_surface_tolerance);

    if on_object {
      // The track reached the current candidate; advancing the cursor may
      // exhaust the cache
      state.next_idx += 1;
      state.status = if state.current().is_some_and(|c| c.sf_desc.is_portal()) {
        NavStatus::OnPortal
      } else {
        NavStatus::OnModule
      };
    } else {
      state.status = NavStatus::TowardsObject;
    }

    // Exhaustion or a portal landing triggers the init of a [new] volume.
    // In backward navigation or with strongly bent tracks the cache may
    // not be exhausted when exiting the volume (the ray sees the far side
    // of the volume).
    state.trust_level = if state.is_exhausted() || state.is_on_portal() {
      TrustLevel::NoTrust
    } else {
      TrustLevel::Full
    };
  }

  /// Re-intersect a single candidate in place and report whether the
  /// track can still reach it.
  fn refresh_candidate<I: Inspector>(
    &self,
    state: &mut NavState<'_, I>,
    ray: &Ray,
    idx: usize,
    cfg: &NavConfig,
  ) -> bool {
    let det = state.detector;
    let rec = &mut state.candidates[idx];
    if rec.sf_desc.barcode.is_invalid() {
      return false;
    }

    let sf = rec.sf_desc;
    let mask = det.mask(&sf);
    let trf = det.transform(sf.transform);
    let mask_tol = if sf.is_portal() { 0.0 } else { cfg.mask_tolerance };

    intersect::update_candidate(ray, rec, mask, trf, mask_tol, cfg.overstep_tolerance)
  }
}

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;
