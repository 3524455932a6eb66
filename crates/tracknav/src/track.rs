//! Free track parameters - the state a stepper advances and the navigator
//! reads.

use crate::types::{Point3, Scalar, Vector3};

/// Track state in global coordinates, parameterized by position, unit
/// direction, time and charge over momentum magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FreeTrack {
  /// Global position.
  pub pos: Point3,
  /// Unit direction of motion.
  pub dir: Vector3,
  /// Charge over momentum magnitude, `q / |p|`. Zero for neutral tracks.
  pub qop: Scalar,
  /// Global time.
  pub time: Scalar,
}

impl FreeTrack {
  /// Build track parameters from a vertex, momentum vector and charge.
  pub fn new(pos: Point3, time: Scalar, momentum: Vector3, q: Scalar) -> Self {
    let p = momentum.length();
    Self {
      pos,
      dir: momentum / p,
      qop: q / p,
      time,
    }
  }

  /// Momentum magnitude. Meaningless for neutral tracks (`qop == 0`).
  #[inline]
  pub fn p(&self) -> Scalar {
    1.0 / self.qop.abs()
  }

  /// Transverse momentum with respect to a field axis.
  pub fn pt(&self, axis: Vector3) -> Scalar {
    let along = self.dir.dot(axis.normalize());
    self.p() * (1.0 - along * along).max(0.0).sqrt()
  }
}

#[cfg(test)]
mod tests {
  use glam::DVec3;

  use super::*;

  #[test]
  fn qop_from_momentum_and_charge() {
    let track = FreeTrack::new(DVec3::ZERO, 0.0, DVec3::new(1.0, 0.0, 1.0), -1.0);
    assert!((track.qop + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12);
    assert!((track.dir.length() - 1.0).abs() < 1e-12);
    assert!((track.p() - std::f64::consts::SQRT_2).abs() < 1e-12);
  }

  #[test]
  fn transverse_momentum() {
    let track = FreeTrack::new(DVec3::ZERO, 0.0, DVec3::new(1.0, 0.0, 1.0), -1.0);
    assert!((track.pt(DVec3::Z) - 1.0).abs() < 1e-12);
  }
}
