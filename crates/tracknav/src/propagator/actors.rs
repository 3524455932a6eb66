//! Actors - per-step callbacks run after every navigation update.
//!
//! Actors observe the propagation and may mutate the navigation state only
//! between navigator calls, and only by lowering trust, flipping the
//! direction or requesting an abort. Chains are tuples, composed at
//! compile time.

use crate::navigation::{Inspector, NavState};
use crate::types::Scalar;

use super::stepper::StepperState;

/// A single propagation actor.
pub trait Actor<S: StepperState> {
  fn act<I: Inspector>(&mut self, navigation: &mut NavState<'_, I>, stepping: &mut S);
}

/// A tuple of actors run in order.
pub trait ActorChain<S: StepperState> {
  fn run<I: Inspector>(&mut self, navigation: &mut NavState<'_, I>, stepping: &mut S);
}

impl<S: StepperState> ActorChain<S> for () {
  fn run<I: Inspector>(&mut self, _navigation: &mut NavState<'_, I>, _stepping: &mut S) {}
}

impl<S: StepperState, A: Actor<S>> ActorChain<S> for (A,) {
  fn run<I: Inspector>(&mut self, navigation: &mut NavState<'_, I>, stepping: &mut S) {
    self.0.act(navigation, stepping);
  }
}

impl<S: StepperState, A: Actor<S>, B: Actor<S>> ActorChain<S> for (A, B) {
  fn run<I: Inspector>(&mut self, navigation: &mut NavState<'_, I>, stepping: &mut S) {
    self.0.act(navigation, stepping);
    self.1.act(navigation, stepping);
  }
}

impl<S: StepperState, A: Actor<S>, B: Actor<S>, C: Actor<S>> ActorChain<S> for (A, B, C) {
  fn run<I: Inspector>(&mut self, navigation: &mut NavState<'_, I>, stepping: &mut S) {
    self.0.act(navigation, stepping);
    self.1.act(navigation, stepping);
    self.2.act(navigation, stepping);
  }
}

/// Cooperative cancellation on a total path budget.
///
/// Constrains the stepper to the remaining budget and aborts the
/// navigation once the budget is spent.
#[derive(Clone, Copy, Debug)]
pub struct PathLimitAborter {
  path_limit: Scalar,
}

impl PathLimitAborter {
  pub fn new(path_limit: Scalar) -> Self {
    Self { path_limit }
  }
}

impl<S: StepperState> Actor<S> for PathLimitAborter {
  fn act<I: Inspector>(&mut self, navigation: &mut NavState<'_, I>, stepping: &mut S) {
    let used = stepping.path_accumulated().abs();
    if used >= self.path_limit {
      navigation.abort();
    } else {
      stepping.set_constraint(self.path_limit - used);
    }
  }
}
