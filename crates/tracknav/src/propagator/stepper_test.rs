use glam::DVec3;

use crate::propagator::trajectories::Helix;
use crate::units::{E, GEV, T};

use super::*;

#[test]
fn line_stepper_advances_straight() {
  let stepper = LineStepper::default();
  let track = FreeTrack::new(DVec3::ZERO, 0.0, DVec3::new(0.0, 0.0, 2.0), 0.0);
  let mut state = stepper.start(track);

  let taken = stepper.step(&mut state, 10.0, NavDirection::Forward);
  assert_eq!(taken, 10.0);
  assert!((state.track().pos - DVec3::new(0.0, 0.0, 10.0)).length() < 1e-12);
  assert_eq!(state.path_accumulated(), 10.0);
}

#[test]
fn line_stepper_honors_constraint() {
  let stepper = LineStepper::default();
  let track = FreeTrack::new(DVec3::ZERO, 0.0, DVec3::Z, 0.0);
  let mut state = stepper.start(track);
  state.set_constraint(4.0);

  let taken = stepper.step(&mut state, 10.0, NavDirection::Forward);
  assert_eq!(taken, 4.0);
  assert!((state.track().pos.z - 4.0).abs() < 1e-12);

  state.release_constraint();
  let taken = stepper.step(&mut state, 6.0, NavDirection::Forward);
  assert_eq!(taken, 6.0);
  assert!((state.track().pos.z - 10.0).abs() < 1e-12);
}

#[test]
fn backward_step_retraces() {
  let stepper = LineStepper::default();
  let track = FreeTrack::new(DVec3::new(0.0, 0.0, 50.0), 0.0, DVec3::Z, 0.0);
  let mut state = stepper.start(track);

  stepper.step(&mut state, 20.0, NavDirection::Backward);
  assert!((state.track().pos.z - 30.0).abs() < 1e-12);
  assert_eq!(state.path_accumulated(), -20.0);
}

#[test]
fn rk_stepper_follows_the_helix() {
  let b = DVec3::new(0.0, 0.0, 1.0 * T);
  let stepper = RkStepper::new(b).with_max_step(5.0);
  let track = FreeTrack::new(DVec3::ZERO, 0.0, DVec3::new(1.0, 0.0, 1.0) * GEV, -1.0 * E);
  let helix = Helix::new(&track, b);

  let mut state = stepper.start(track);
  let mut total = 0.0;
  while total < 500.0 {
    total += stepper.step(&mut state, 500.0 - total, NavDirection::Forward);
  }

  let truth = helix.pos(500.0);
  let err = (state.track().pos - truth).length();
  assert!(err < 1e-3, "RK position error {err} after 500 mm");

  let dir_err = (state.track().dir - helix.dir(500.0)).length();
  assert!(dir_err < 1e-6, "RK direction error {dir_err}");
}

#[test]
fn rk_stepper_neutral_track_is_straight() {
  let b = DVec3::new(0.0, 0.0, 1.0 * T);
  let stepper = RkStepper::new(b);
  let track = FreeTrack {
    pos: DVec3::ZERO,
    dir: DVec3::Z,
    qop: 0.0,
    time: 0.0,
  };

  let mut state = stepper.start(track);
  stepper.step(&mut state, 50.0, NavDirection::Forward);
  assert!((state.track().pos - DVec3::new(0.0, 0.0, 50.0)).length() < 1e-12);
}

#[test]
fn rk_step_cap_truncates() {
  let stepper = RkStepper::new(DVec3::ZERO).with_max_step(25.0);
  let track = FreeTrack::new(DVec3::ZERO, 0.0, DVec3::Z, 0.0);
  let mut state = stepper.start(track);

  let taken = stepper.step(&mut state, 100.0, NavDirection::Forward);
  assert_eq!(taken, 25.0);
}
