//! Quadratic equation helper for the second-order surface intersectors.

use crate::types::Scalar;

/// Solutions of `a*t^2 + b*t + c = 0`, ordered.
#[derive(Clone, Copy, Debug)]
pub struct QuadraticEquation {
  solutions: usize,
  smaller: Scalar,
  larger: Scalar,
}

impl QuadraticEquation {
  /// Solve the equation. Degenerates to the linear case for `a == 0`.
  pub fn new(a: Scalar, b: Scalar, c: Scalar) -> Self {
    if a == 0.0 {
      if b == 0.0 {
        return Self::none();
      }
      let t = -c / b;
      return Self {
        solutions: 1,
        smaller: t,
        larger: t,
      };
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
      return Self::none();
    }
    if discriminant == 0.0 {
      let t = -0.5 * b / a;
      return Self {
        solutions: 1,
        smaller: t,
        larger: t,
      };
    }

    // Citardauq form for the root matching b's sign, standard form for the
    // other; avoids cancellation when b dominates.
    let q = -0.5 * (b + b.signum() * discriminant.sqrt());
    let t0 = q / a;
    let t1 = c / q;
    Self {
      solutions: 2,
      smaller: t0.min(t1),
      larger: t0.max(t1),
    }
  }

  fn none() -> Self {
    Self {
      solutions: 0,
      smaller: Scalar::MAX,
      larger: Scalar::MAX,
    }
  }

  #[inline]
  pub fn solutions(&self) -> usize {
    self.solutions
  }

  #[inline]
  pub fn smaller(&self) -> Scalar {
    self.smaller
  }

  #[inline]
  pub fn larger(&self) -> Scalar {
    self.larger
  }

  /// The reachable root nearest to a reference path, if any.
  ///
  /// Used by the in-place refresh of two-root surfaces: a cached near or
  /// far crossing re-binds to whichever root its previous path is closest
  /// to, instead of always collapsing onto the near one.
  pub fn closest_to(&self, reference: Scalar, overstep_tol: Scalar) -> Option<Scalar> {
    let mut best: Option<Scalar> = None;
    let mut consider = |t: Scalar| {
      let better = best.map_or(true, |b| (t - reference).abs() < (b - reference).abs());
      if t > overstep_tol && better {
        best = Some(t);
      }
    };
    if self.solutions > 0 {
      consider(self.smaller);
    }
    if self.solutions > 1 {
      consider(self.larger);
    }
    best
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn two_roots_ordered() {
    // (t - 2)(t + 3) = t^2 + t - 6
    let qe = QuadraticEquation::new(1.0, 1.0, -6.0);
    assert_eq!(qe.solutions(), 2);
    assert!((qe.smaller() + 3.0).abs() < 1e-12);
    assert!((qe.larger() - 2.0).abs() < 1e-12);
  }

  #[test]
  fn no_real_roots() {
    let qe = QuadraticEquation::new(1.0, 0.0, 1.0);
    assert_eq!(qe.solutions(), 0);
  }

  #[test]
  fn linear_fallback() {
    let qe = QuadraticEquation::new(0.0, 2.0, -8.0);
    assert_eq!(qe.solutions(), 1);
    assert!((qe.smaller() - 4.0).abs() < 1e-12);
  }

  #[test]
  fn closest_root_selection() {
    // Roots -3 and 2
    let qe = QuadraticEquation::new(1.0, 1.0, -6.0);

    // Each reference re-binds to its own root
    assert_eq!(qe.closest_to(-2.5, -10.0), Some(-3.0));
    assert_eq!(qe.closest_to(1.5, -10.0), Some(2.0));

    // The overstep cutoff hides the behind root
    assert_eq!(qe.closest_to(-2.5, -0.1), Some(2.0));
    // No reachable root at all
    assert_eq!(qe.closest_to(0.0, 5.0), None);
  }

  #[test]
  fn cancellation_stability() {
    // Roots 1e-8 and 1e8: the naive formula loses the small root
    let qe = QuadraticEquation::new(1.0, -(1e8 + 1e-8), 1.0);
    assert_eq!(qe.solutions(), 2);
    assert!((qe.smaller() - 1e-8).abs() / 1e-8 < 1e-6);
    assert!((qe.larger() - 1e8).abs() / 1e8 < 1e-12);
  }
}
