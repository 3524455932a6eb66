//! Plane intersector, used by the rectangle, unbounded and annulus masks.

use crate::geometry::{Mask, SurfaceDesc};
use crate::types::{Scalar, Transform3};

use super::{IntersectionDirection, IntersectionRecord, IntersectionStatus, Ray};

/// Below this |normal . direction| the ray is treated as parallel.
const PARALLEL_TOL: Scalar = 1e-12;

/// Intersect a ray with the surface plane (local z = 0).
pub fn intersect(
  ray: &Ray,
  sf: &SurfaceDesc,
  mask: &Mask,
  trf: &Transform3,
  mask_tol: Scalar,
  overstep_tol: Scalar,
) -> IntersectionRecord {
  let mut is = IntersectionRecord {
    sf_desc: *sf,
    ..Default::default()
  };

  let normal = trf.matrix3.z_axis;
  let denom = normal.dot(ray.dir);
  if denom.abs() < PARALLEL_TOL {
    is.status = IntersectionStatus::Missed;
    return is;
  }

  let t = normal.dot(trf.translation - ray.pos) / denom;
  is.path = t;

  // Not valid for navigation when at or behind the overstep cutoff
  if t > overstep_tol {
    let local3 = trf.inverse().transform_point3(ray.point_at(t));
    is.local = mask.plane_local(local3);

    if mask.is_inside(is.local, mask_tol) {
      is.status = IntersectionStatus::Inside;
      is.volume_link = mask.volume_link;
      is.direction = IntersectionDirection::from_path(t);
      is.cos_incidence_angle = denom.abs();
    } else {
      is.status = IntersectionStatus::Outside;
    }
  }

  is
}

#[cfg(test)]
#[path = "plane_test.rs"]
mod plane_test;
