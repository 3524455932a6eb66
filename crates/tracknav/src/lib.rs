//! tracknav - engine-independent detector geometry navigation
//!
//! This crate answers two questions for a track advancing through a
//! hierarchically structured detector: which surface does the track cross
//! next, and - once a surface is reached - is it a module to record or a
//! portal into a neighbouring volume. It maintains a sorted cache of
//! upcoming intersection candidates per track and updates it
//! incrementally, governed by an explicit trust-level protocol, instead of
//! re-intersecting the full neighbourhood on every step.
//!
//! # Features
//!
//! - **Trust-level navigation**: full / high / fair / no-trust cache
//!   updates, volume switching at portals
//! - **Shape-dispatched intersectors**: plane, cylinder (generic and
//!   portal), line/wire, cone
//! - **Grid surface finders**: circular/open axes, windowed
//!   bin-neighbourhood search
//! - **Steppers**: straight line and RKN4 in a constant field, behind a
//!   common contract
//! - **Batch propagation**: rayon-parallel Enqueue -> Tick -> Completions
//!   stage over disjoint per-track states
//!
//! # Example
//!
//! ```ignore
//! use tracknav::prelude::*;
//!
//! let detector = tracknav::toys::build_telescope(&[0.0, 10.0, 20.0]);
//! let propagator = Propagator::new(LineStepper::default(), NavConfig::default());
//!
//! let track = FreeTrack::new(pos, 0.0, momentum, charge);
//! let mut state = Propagation::new(&detector, &propagator.stepper, track, 0);
//! let mut actors = (PathLimitAborter::new(2_000.0),);
//!
//! assert!(propagator.propagate(&mut state, &mut actors));
//! ```

pub mod types;
pub mod units;

pub mod geometry;
pub mod grid;
pub mod intersect;

pub mod accel;
pub mod navigation;
pub mod propagator;
pub mod track;

// Reference detectors for tests and benches
pub mod toys;

// Propagation statistics (zero overhead unless the `metrics` feature is on)
pub mod metrics;

// Re-export commonly used items
pub use geometry::{Barcode, Detector, DetectorBuilder, Mask, MaskShape, SurfaceDesc, SurfaceKind};
pub use intersect::{IntersectionRecord, IntersectionStatus, Ray};
pub use navigation::{
  Inspector, NavConfig, NavDirection, NavState, NavStatus, Navigator, ObjectTracer,
  PrintInspector, TrustLevel, VoidInspector,
};
pub use propagator::{
  LineStepper, PathLimitAborter, Propagation, PropagationStage, Propagator, RkStepper, Stepper,
};
pub use track::FreeTrack;

/// The usual imports for driving a propagation.
pub mod prelude {
  pub use crate::navigation::{NavConfig, NavDirection, NavState, NavStatus, Navigator, TrustLevel};
  pub use crate::propagator::{
    Actor, ActorChain, LineStepper, PathLimitAborter, Propagation, Propagator, RkStepper, Stepper,
    StepperState,
  };
  pub use crate::track::FreeTrack;
}
