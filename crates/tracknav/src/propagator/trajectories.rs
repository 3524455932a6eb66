//! Analytic test trajectories.
//!
//! The helix is the exact solution for a charged track in a constant
//! magnetic field; it serves as truth reference for the numeric steppers
//! and as a standalone trajectory generator in tests.

use crate::track::FreeTrack;
use crate::types::{Point3, Scalar, Vector3};

/// Below this curvature the helix degenerates to a straight line.
const STRAIGHT_TOL: Scalar = 1e-16;

/// Helix trajectory of a charged track in a constant field.
#[derive(Clone, Copy, Debug)]
pub struct Helix {
  origin: Point3,
  time: Scalar,
  qop: Scalar,
  /// Field direction (unit).
  b_hat: Vector3,
  /// Signed angular rate of the direction vector per path length.
  omega: Scalar,
  /// Direction component along the field.
  t_par: Scalar,
  /// Direction component transverse to the field.
  t_perp: Vector3,
}

impl Helix {
  /// Build the helix through a track vertex in field `b`.
  pub fn new(track: &FreeTrack, b: Vector3) -> Self {
    let b_mag = b.length();
    let b_hat = if b_mag > 0.0 { b / b_mag } else { Vector3::Z };
    let t_par = track.dir.dot(b_hat);
    Self {
      origin: track.pos,
      time: track.time,
      qop: track.qop,
      b_hat,
      omega: -track.qop * b_mag,
      t_par,
      t_perp: track.dir - b_hat * t_par,
    }
  }

  #[inline]
  pub fn qop(&self) -> Scalar {
    self.qop
  }

  #[inline]
  pub fn time(&self) -> Scalar {
    self.time
  }

  /// Bending radius, `pT / (|q| B)`.
  pub fn radius(&self) -> Scalar {
    self.t_perp.length() / self.omega.abs()
  }

  /// Position after path length `s`.
  pub fn pos(&self, s: Scalar) -> Point3 {
    if self.omega.abs() < STRAIGHT_TOL {
      return self.origin + (self.b_hat * self.t_par + self.t_perp) * s;
    }
    let angle = self.omega * s;
    let cross = self.b_hat.cross(self.t_perp);
    self.origin
      + self.b_hat * (self.t_par * s)
      + (self.t_perp * angle.sin() + cross * (1.0 - angle.cos())) / self.omega
  }

  /// Direction after path length `s`.
  pub fn dir(&self, s: Scalar) -> Vector3 {
    if self.omega.abs() < STRAIGHT_TOL {
      return self.b_hat * self.t_par + self.t_perp;
    }
    let angle = self.omega * s;
    let cross = self.b_hat.cross(self.t_perp);
    self.b_hat * self.t_par + self.t_perp * angle.cos() + cross * angle.sin()
  }
}

#[cfg(test)]
#[path = "trajectories_test.rs"]
mod trajectories_test;
