//! Cone intersector: quadratic treatment analogous to the cylinder, with
//! the apex at the local origin and the sheet opening along +z.

use crate::geometry::{Mask, MaskShape, SurfaceDesc};
use crate::types::{Point2, Scalar, Transform3};

use super::quadratic::QuadraticEquation;
use super::{IntersectionDirection, IntersectionRecord, IntersectionStatus, Ray};

fn slope(mask: &Mask) -> Scalar {
  match mask.shape {
    MaskShape::Cone { slope, .. } => slope,
    _ => unreachable!("cone intersector called with a non-cone mask"),
  }
}

fn solve(ray: &Ray, mask: &Mask, trf: &Transform3) -> (QuadraticEquation, Ray) {
  let inv = trf.inverse();
  let local_ray = Ray {
    pos: inv.transform_point3(ray.pos),
    dir: inv.transform_vector3(ray.dir),
  };

  let k2 = slope(mask) * slope(mask);
  let (p, d) = (local_ray.pos, local_ray.dir);
  let a = d.x * d.x + d.y * d.y - k2 * d.z * d.z;
  let b = 2.0 * (p.x * d.x + p.y * d.y - k2 * p.z * d.z);
  let c = p.x * p.x + p.y * p.y - k2 * p.z * p.z;

  (QuadraticEquation::new(a, b, c), local_ray)
}

fn build_candidate(
  local_ray: &Ray,
  sf: &SurfaceDesc,
  mask: &Mask,
  t: Scalar,
  mask_tol: Scalar,
) -> IntersectionRecord {
  let k = slope(mask);
  let hit = local_ray.point_at(t);
  let r = k * hit.z;

  let mut is = IntersectionRecord {
    sf_desc: *sf,
    path: t,
    local: Point2::new(r * hit.y.atan2(hit.x), hit.z),
    ..Default::default()
  };

  if mask.is_inside(is.local, mask_tol) {
    is.status = IntersectionStatus::Inside;
    is.volume_link = mask.volume_link;
    is.direction = IntersectionDirection::from_path(t);
    // Cone surface normal: (cos phi, sin phi, -k) / sqrt(1 + k^2)
    let rho = hit.truncate().length();
    if rho > 0.0 {
      let phi_cos = hit.x / rho;
      let phi_sin = hit.y / rho;
      let norm = (1.0 + k * k).sqrt();
      let n_dot_d =
        (phi_cos * local_ray.dir.x + phi_sin * local_ray.dir.y - k * local_ray.dir.z) / norm;
      is.cos_incidence_angle = n_dot_d.abs();
    }
  } else {
    is.status = IntersectionStatus::Outside;
  }

  is
}

/// Generic cone intersection: both roots reported when reachable.
pub fn intersect_full(
  ray: &Ray,
  sf: &SurfaceDesc,
  mask: &Mask,
  trf: &Transform3,
  mask_tol: Scalar,
  overstep_tol: Scalar,
) -> [IntersectionRecord; 2] {
  let mut out = [
    IntersectionRecord {
      sf_desc: *sf,
      ..Default::default()
    },
    IntersectionRecord {
      sf_desc: *sf,
      ..Default::default()
    },
  ];

  let (qe, local_ray) = solve(ray, mask, trf);
  if qe.solutions() > 0 && qe.smaller() > overstep_tol {
    out[0] = build_candidate(&local_ray, sf, mask, qe.smaller(), mask_tol);
  }
  if qe.solutions() > 1 && qe.larger() > overstep_tol {
    out[1] = build_candidate(&local_ray, sf, mask, qe.larger(), mask_tol);
  }

  out
}

/// Refresh a cached candidate in place.
///
/// Like the generic cylinder, a cone keeps up to two crossings alive in
/// the cache; each candidate re-binds to the reachable root nearest its
/// cached path.
pub fn update_full(
  ray: &Ray,
  rec: &mut IntersectionRecord,
  mask: &Mask,
  trf: &Transform3,
  mask_tol: Scalar,
  overstep_tol: Scalar,
) -> bool {
  let sf = rec.sf_desc;

  let (qe, local_ray) = solve(ray, mask, trf);
  match qe.closest_to(rec.path, overstep_tol) {
    Some(t) => {
      *rec = build_candidate(&local_ray, &sf, mask, t, mask_tol);
      rec.is_inside()
    }
    None => {
      *rec = IntersectionRecord {
        sf_desc: sf,
        ..Default::default()
      };
      false
    }
  }
}
