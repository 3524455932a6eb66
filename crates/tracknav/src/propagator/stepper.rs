//! Steppers - advance a track by a given path length.
//!
//! A stepper exposes the current track state, accepts an external
//! path-length constraint and advances up to the navigation target it is
//! handed. The navigator never drives the integration itself; it only
//! provides the distance to the next candidate as the step constraint.

use crate::navigation::NavDirection;
use crate::track::FreeTrack;
use crate::types::{Scalar, Vector3};

/// Access to the state every stepper maintains.
pub trait StepperState {
  /// Current track parameters.
  fn track(&self) -> &FreeTrack;

  fn track_mut(&mut self) -> &mut FreeTrack;

  /// Signed path length accumulated so far.
  fn path_accumulated(&self) -> Scalar;

  /// Cap on the size of the next step, set by actors.
  fn constraint(&self) -> Scalar;

  fn set_constraint(&mut self, max_step: Scalar);

  fn release_constraint(&mut self);
}

/// A track integrator.
pub trait Stepper {
  type State: StepperState;

  /// Fresh state at a track vertex.
  fn start(&self, track: FreeTrack) -> Self::State;

  /// Advance towards the navigation target (a non-negative distance along
  /// the navigation direction). Returns the distance actually taken,
  /// which is smaller when a constraint or the step cap truncated it.
  fn step(&self, state: &mut Self::State, target: Scalar, dir: NavDirection) -> Scalar;
}

// =============================================================================
// Straight-line stepper
// =============================================================================

/// State of the straight-line stepper.
pub struct LineState {
  track: FreeTrack,
  path: Scalar,
  constraint: Scalar,
}

impl StepperState for LineState {
  fn track(&self) -> &FreeTrack {
    &self.track
  }

  fn track_mut(&mut self) -> &mut FreeTrack {
    &mut self.track
  }

  fn path_accumulated(&self) -> Scalar {
    self.path
  }

  fn constraint(&self) -> Scalar {
    self.constraint
  }

  fn set_constraint(&mut self, max_step: Scalar) {
    self.constraint = max_step;
  }

  fn release_constraint(&mut self) {
    self.constraint = Scalar::MAX;
  }
}

/// Stepper for field-free propagation.
#[derive(Clone, Copy, Debug)]
pub struct LineStepper {
  /// Cap on a single step.
  pub max_step: Scalar,
}

impl Default for LineStepper {
  fn default() -> Self {
    Self {
      max_step: Scalar::MAX,
    }
  }
}

impl Stepper for LineStepper {
  type State = LineState;

  fn start(&self, track: FreeTrack) -> LineState {
    LineState {
      track,
      path: 0.0,
      constraint: Scalar::MAX,
    }
  }

  fn step(&self, state: &mut LineState, target: Scalar, dir: NavDirection) -> Scalar {
    let h = target.min(state.constraint).min(self.max_step).max(0.0);
    let signed = h * dir.sign();

    state.track.pos += state.track.dir * signed;
    state.track.time += signed;
    state.path += signed;
    h
  }
}

// =============================================================================
// Runge-Kutta-Nystrom stepper
// =============================================================================

/// State of the RKN4 stepper.
pub struct RkState {
  track: FreeTrack,
  path: Scalar,
  constraint: Scalar,
}

impl StepperState for RkState {
  fn track(&self) -> &FreeTrack {
    &self.track
  }

  fn track_mut(&mut self) -> &mut FreeTrack {
    &mut self.track
  }

  fn path_accumulated(&self) -> Scalar {
    self.path
  }

  fn constraint(&self) -> Scalar {
    self.constraint
  }

  fn set_constraint(&mut self, max_step: Scalar) {
    self.constraint = max_step;
  }

  fn release_constraint(&mut self) {
    self.constraint = Scalar::MAX;
  }
}

/// 4th-order Runge-Kutta-Nystrom stepper in a constant magnetic field.
///
/// Curved steps towards a straight-ray distance estimate undershoot; the
/// trust-level machinery of the navigator absorbs this by re-evaluating
/// the target after every step.
#[derive(Clone, Copy, Debug)]
pub struct RkStepper {
  /// Constant field vector.
  pub b_field: Vector3,
  /// Cap on a single step, bounds the integration error per step.
  pub max_step: Scalar,
}

impl RkStepper {
  pub fn new(b_field: Vector3) -> Self {
    Self {
      b_field,
      max_step: 100.0,
    }
  }

  pub fn with_max_step(mut self, max_step: Scalar) -> Self {
    self.max_step = max_step;
    self
  }

  /// One RKN4 stage: `dt/ds = qop * (t x B)`.
  #[inline]
  fn eval_k(&self, qop: Scalar, t: Vector3) -> Vector3 {
    t.cross(self.b_field) * qop
  }
}

impl Stepper for RkStepper {
  type State = RkState;

  fn start(&self, track: FreeTrack) -> RkState {
    RkState {
      track,
      path: 0.0,
      constraint: Scalar::MAX,
    }
  }

  fn step(&self, state: &mut RkState, target: Scalar, dir: NavDirection) -> Scalar {
    let h = target.min(state.constraint).min(self.max_step).max(0.0);
    let s = h * dir.sign();

    let qop = state.track.qop;
    let t = state.track.dir;

    let k1 = self.eval_k(qop, t);
    let k2 = self.eval_k(qop, t + k1 * (0.5 * s));
    let k3 = self.eval_k(qop, t + k2 * (0.5 * s));
    let k4 = self.eval_k(qop, t + k3 * s);

    state.track.pos += t * s + (k1 + k2 + k3) * (s * s / 6.0);
    state.track.dir = (t + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (s / 6.0)).normalize();
    state.track.time += s;
    state.path += s;
    h
  }
}

#[cfg(test)]
#[path = "stepper_test.rs"]
mod stepper_test;
