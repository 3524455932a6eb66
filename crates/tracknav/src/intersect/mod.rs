//! Ray-surface intersection: the record type cached by the navigator and
//! the shape-dispatched intersector functions.
//!
//! Intersectors are stateless functions of
//! `(ray, surface, mask, transform, mask_tol, overstep_tol)`. They enforce
//! the mask bounds (widened by `mask_tol`) and reject candidates at or
//! behind the overstep cutoff. A candidate is *reachable* iff its status is
//! [`IntersectionStatus::Inside`] and `path > overstep_tol`; intersectors
//! fold the path condition into the status they report.

pub mod cone;
pub mod cylinder;
pub mod line;
pub mod plane;
pub mod quadratic;

use crate::geometry::{Mask, MaskShape, SurfaceDesc};
use crate::types::{Point2, Point3, Scalar, Transform3, Vector3, INVALID_VOLUME, VolumeLink};

/// Outcome of a single surface intersection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntersectionStatus {
  /// No intersection point (parallel ray, no real roots, behind the
  /// overstep cutoff).
  Missed,
  /// Intersection point exists but lies outside the mask bounds.
  Outside,
  /// Intersection point within the mask bounds.
  Inside,
}

/// Sign of the path relative to the track motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntersectionDirection {
  /// Behind the track position.
  Opposite,
  /// In front of the track position.
  Along,
}

impl IntersectionDirection {
  /// Direction flag from the sign of a path length.
  #[inline]
  pub fn from_path(path: Scalar) -> Self {
    if path.is_sign_negative() {
      IntersectionDirection::Opposite
    } else {
      IntersectionDirection::Along
    }
  }
}

/// Straight-line probe trajectory used by all intersectors.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
  pub pos: Point3,
  /// Unit direction.
  pub dir: Vector3,
}

impl Ray {
  pub fn new(pos: Point3, dir: Vector3) -> Self {
    Self { pos, dir }
  }

  /// Point at signed path length `t`.
  #[inline]
  pub fn point_at(&self, t: Scalar) -> Point3 {
    self.pos + self.dir * t
  }
}

/// A candidate in the navigator's intersection cache.
#[derive(Clone, Copy, Debug)]
pub struct IntersectionRecord {
  /// Signed path length from the current track position.
  pub path: Scalar,
  /// Intersection point in the surface's local 2D frame.
  pub local: Point2,
  /// Copy of the intersected surface descriptor.
  pub sf_desc: SurfaceDesc,
  /// Volume on the other side (meaningful for portals).
  pub volume_link: VolumeLink,
  /// Along/opposite the track motion.
  pub direction: IntersectionDirection,
  pub status: IntersectionStatus,
  /// |surface normal . track direction| at the intersection point.
  pub cos_incidence_angle: Scalar,
}

impl Default for IntersectionRecord {
  fn default() -> Self {
    Self {
      path: Scalar::MAX,
      local: Point2::ZERO,
      sf_desc: SurfaceDesc::default(),
      volume_link: INVALID_VOLUME,
      direction: IntersectionDirection::Along,
      status: IntersectionStatus::Missed,
      cos_incidence_angle: 0.0,
    }
  }
}

impl IntersectionRecord {
  #[inline]
  pub fn is_inside(&self) -> bool {
    self.status == IntersectionStatus::Inside
  }
}

/// Intersect a surface and append every reachable in-bounds candidate to
/// the cache. Second-order shapes can contribute two candidates.
pub fn intersect_append(
  ray: &Ray,
  sf: &SurfaceDesc,
  mask: &Mask,
  trf: &Transform3,
  mask_tol: Scalar,
  overstep_tol: Scalar,
  cache: &mut Vec<IntersectionRecord>,
) {
  match mask.shape {
    MaskShape::Rectangle { .. } | MaskShape::Unbounded | MaskShape::Annulus { .. } => {
      let rec = plane::intersect(ray, sf, mask, trf, mask_tol, overstep_tol);
      if rec.is_inside() {
        cache.push(rec);
      }
    }
    MaskShape::Cylinder { .. } => {
      for rec in cylinder::intersect_full(ray, sf, mask, trf, mask_tol, overstep_tol) {
        if rec.is_inside() {
          cache.push(rec);
        }
      }
    }
    MaskShape::PortalCylinder { .. } => {
      let rec = cylinder::intersect_portal(ray, sf, mask, trf, mask_tol, overstep_tol);
      if rec.is_inside() {
        cache.push(rec);
      }
    }
    MaskShape::Wire { .. } => {
      let rec = line::intersect(ray, sf, mask, trf, mask_tol, overstep_tol);
      if rec.is_inside() {
        cache.push(rec);
      }
    }
    MaskShape::Cone { .. } => {
      for rec in cone::intersect_full(ray, sf, mask, trf, mask_tol, overstep_tol) {
        if rec.is_inside() {
          cache.push(rec);
        }
      }
    }
  }
}

/// Re-intersect an existing candidate in place.
///
/// Portal cylinders refresh with their closest reachable root (the far
/// side of a volume boundary is never the target). Generic two-root
/// shapes can hold two cache slots at once, so their refresh re-binds
/// each candidate to the reachable root nearest its cached path - a near
/// and a far crossing keep tracking their own roots. Returns whether the
/// candidate is still reachable.
pub fn update_candidate(
  ray: &Ray,
  rec: &mut IntersectionRecord,
  mask: &Mask,
  trf: &Transform3,
  mask_tol: Scalar,
  overstep_tol: Scalar,
) -> bool {
  let sf = rec.sf_desc;
  match mask.shape {
    MaskShape::Rectangle { .. } | MaskShape::Unbounded | MaskShape::Annulus { .. } => {
      *rec = plane::intersect(ray, &sf, mask, trf, mask_tol, overstep_tol);
    }
    MaskShape::Cylinder { .. } => {
      return cylinder::update_full(ray, rec, mask, trf, mask_tol, overstep_tol);
    }
    MaskShape::PortalCylinder { .. } => {
      *rec = cylinder::intersect_portal(ray, &sf, mask, trf, mask_tol, overstep_tol);
    }
    MaskShape::Wire { .. } => {
      *rec = line::intersect(ray, &sf, mask, trf, mask_tol, overstep_tol);
    }
    MaskShape::Cone { .. } => {
      return cone::update_full(ray, rec, mask, trf, mask_tol, overstep_tol);
    }
  }
  rec.is_inside()
}

/// Stable in-place insertion sort on the path key.
///
/// The candidate caches stay tiny, and sorting must not allocate on the
/// update path, which rules out the stdlib merge sort.
pub(crate) fn sort_by_path(recs: &mut [IntersectionRecord]) {
  for i in 1..recs.len() {
    let mut j = i;
    while j > 0 && recs[j - 1].path > recs[j].path {
      recs.swap(j - 1, j);
      j -= 1;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rec(path: Scalar) -> IntersectionRecord {
    IntersectionRecord {
      path,
      ..Default::default()
    }
  }

  #[test]
  fn sort_is_stable_and_ordered() {
    let mut recs = vec![rec(5.0), rec(1.0), rec(3.0), rec(Scalar::MAX), rec(2.0)];
    sort_by_path(&mut recs);
    let paths: Vec<Scalar> = recs.iter().map(|r| r.path).collect();
    assert_eq!(paths, vec![1.0, 2.0, 3.0, 5.0, Scalar::MAX]);
  }

  #[test]
  fn direction_from_path_sign() {
    assert_eq!(
      IntersectionDirection::from_path(-0.5),
      IntersectionDirection::Opposite
    );
    assert_eq!(
      IntersectionDirection::from_path(0.5),
      IntersectionDirection::Along
    );
  }
}
