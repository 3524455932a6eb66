//! Line/wire intersector: point of closest approach of the ray to the
//! wire axis.

use crate::geometry::{Mask, SurfaceDesc};
use crate::types::{Point2, Scalar, Transform3};

use super::{IntersectionDirection, IntersectionRecord, IntersectionStatus, Ray};

/// Below this the ray runs parallel to the wire.
const PARALLEL_TOL: Scalar = 1e-5;

/// Intersect a ray with a wire surface.
///
/// The local frame is (signed closest-approach distance, z along the
/// wire); the sign follows the orientation of `dir x wire` against the
/// separation vector.
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

  // Wire direction and center
  let z = trf.matrix3.z_axis;
  let center = trf.translation;

  let zd = z.dot(ray.dir);
  let denom = 1.0 - zd * zd;
  if denom < PARALLEL_TOL {
    is.status = IntersectionStatus::Missed;
    return is;
  }

  // Separation of the wire center from the track position
  let t2l = center - ray.pos;

  // Path length to the point of closest approach on the track
  let t = (t2l.dot(ray.dir) - t2l.dot(z) * zd) / denom;
  is.path = t;

  if t > overstep_tol {
    let m = ray.point_at(t);
    let to_poca = m - center;
    let along_wire = to_poca.dot(z);
    let radial = to_poca - z * along_wire;
    let sign = ray.dir.cross(z).dot(to_poca).signum();
    is.local = Point2::new(sign * radial.length(), along_wire);

    if mask.is_inside(is.local, mask_tol) {
      is.status = IntersectionStatus::Inside;
      is.volume_link = mask.volume_link;
      is.direction = IntersectionDirection::from_path(t);
      is.cos_incidence_angle = zd.abs();
    } else {
      is.status = IntersectionStatus::Outside;
    }
  }

  is
}

#[cfg(test)]
#[path = "line_test.rs"]
mod line_test;
