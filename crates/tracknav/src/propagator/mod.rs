//! Propagator glue: drives the init -> step -> update -> actors cycle.
//!
//! The propagator owns a stepper and the navigation configuration; each
//! in-flight track owns a [`Propagation`] state holding the stepper state
//! and the navigator state. The navigator provides the distance to the
//! next candidate as the step constraint; after every step a simple
//! stepper policy lowers the cache trust accordingly.

pub mod actors;
pub mod batch;
pub mod stepper;
pub mod trajectories;

use crate::geometry::Detector;
use crate::navigation::{Inspector, NavConfig, NavState, Navigator, VoidInspector};
use crate::track::FreeTrack;

// Re-exports
pub use actors::{Actor, ActorChain, PathLimitAborter};
pub use batch::{PropagationStage, TrackCompletion, TrackRequest};
pub use stepper::{LineStepper, RkStepper, Stepper, StepperState};
pub use trajectories::Helix;

/// Per-track propagation state: stepper state plus navigation state.
pub struct Propagation<'d, S: Stepper, I: Inspector = VoidInspector> {
  pub stepping: S::State,
  pub navigation: NavState<'d, I>,
}

impl<'d, S: Stepper> Propagation<'d, S> {
  /// State for a track starting in `volume`.
  pub fn new(detector: &'d Detector, stepper: &S, track: FreeTrack, volume: u32) -> Self {
    Self {
      stepping: stepper.start(track),
      navigation: NavState::new_in_volume(detector, volume),
    }
  }
}

impl<'d, S: Stepper, I: Inspector> Propagation<'d, S, I> {
  /// State with an attached navigation inspector.
  pub fn with_inspector(
    detector: &'d Detector,
    stepper: &S,
    track: FreeTrack,
    volume: u32,
    inspector: I,
  ) -> Self {
    Self {
      stepping: stepper.start(track),
      navigation: NavState::with_inspector(detector, volume, inspector),
    }
  }
}

/// Drives a track through the detector.
pub struct Propagator<S: Stepper> {
  pub stepper: S,
  pub cfg: NavConfig,
}

impl<S: Stepper> Propagator<S> {
  pub fn new(stepper: S, cfg: NavConfig) -> Self {
    Self { stepper, cfg }
  }

  /// Run the full propagation loop until the navigation finishes.
  ///
  /// Returns whether the track left the detector world through a portal
  /// (as opposed to aborting).
  #[cfg_attr(
    feature = "tracing",
    tracing::instrument(skip_all, name = "propagator::propagate")
  )]
  pub fn propagate<I, C>(&self, prop: &mut Propagation<'_, S, I>, actors: &mut C) -> bool
  where
    I: Inspector,
    C: ActorChain<S::State>,
  {
    let navigator = Navigator;

    let track = *prop.stepping.track();
    let mut heartbeat = navigator.init(&mut prop.navigation, &track, &self.cfg);
    actors.run(&mut prop.navigation, &mut prop.stepping);
    heartbeat &= prop.navigation.heartbeat();

    while heartbeat {
      // Advance up to the next candidate, within all constraints
      let target = prop.navigation.target_path();
      let direction = prop.navigation.direction();
      let taken = self.stepper.step(&mut prop.stepping, target, direction);

      // Stepper policy: a truncated step leaves the whole cache stale,
      // a free step only moves the distance to the current target
      if taken < target - self.cfg.on_surface_tolerance {
        prop.navigation.set_fair_trust();
      } else {
        prop.navigation.set_high_trust();
      }

      let track = *prop.stepping.track();
      heartbeat = navigator.update(&mut prop.navigation, &track, &self.cfg);

      actors.run(&mut prop.navigation, &mut prop.stepping);
      heartbeat &= prop.navigation.heartbeat();
    }

    prop.navigation.is_complete()
  }
}

#[cfg(test)]
#[path = "propagator_test.rs"]
mod propagator_test;
