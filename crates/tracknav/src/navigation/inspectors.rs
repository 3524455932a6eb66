//! Concrete navigation inspectors for validation and debugging.

use std::fmt::Write;

use crate::intersect::IntersectionRecord;

use super::{Inspector, NavStatus, NavView};

/// Records every surface the navigation reaches.
///
/// Useful for checking the visited-surface sequence of a propagation
/// against an expectation.
#[derive(Default)]
pub struct ObjectTracer {
  /// Intersections of all reached surfaces, in encounter order.
  pub trace: Vec<IntersectionRecord>,
}

impl ObjectTracer {
  pub fn new() -> Self {
    Self::default()
  }
}

impl Inspector for ObjectTracer {
  fn inspect(&mut self, view: &NavView<'_>, _message: &str) {
    if matches!(view.status, NavStatus::OnModule | NavStatus::OnPortal) {
      if let Some(rec) = view.current() {
        self.trace.push(*rec);
      }
    }
  }
}

/// Accumulates a human-readable log of the navigation flow.
#[derive(Default)]
pub struct PrintInspector {
  log: String,
}

impl PrintInspector {
  pub fn new() -> Self {
    Self::default()
  }

  /// The accumulated debug log.
  pub fn log(&self) -> &str {
    &self.log
  }
}

impl Inspector for PrintInspector {
  fn inspect(&mut self, view: &NavView<'_>, message: &str) {
    let _ = writeln!(
      self.log,
      "{message}volume: {}, status: {:?}, trust: {:?}, reachable: {}, heartbeat: {}",
      view.volume,
      view.status,
      view.trust_level,
      view.n_reachable(),
      view.heartbeat
    );
    if let Some(next) = view.next() {
      let _ = writeln!(
        self.log,
        "  -> next: {:?} at path {:.4}",
        next.sf_desc.barcode, next.path
      );
    }
  }
}
