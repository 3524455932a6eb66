//! Cylinder intersectors.
//!
//! The generic intersector reports up to two candidates along the ray (one
//! in front, one behind). The portal variant returns only the closest
//! reachable root: a portal is a volume boundary, and while the track is
//! inside the volume the far side is never the next surface.

use crate::geometry::{Mask, MaskShape, SurfaceDesc};
use crate::types::{Point2, Scalar, Transform3};

use super::quadratic::QuadraticEquation;
use super::{IntersectionDirection, IntersectionRecord, IntersectionStatus, Ray};

/// Below this squared transverse direction the ray runs parallel to the
/// cylinder axis.
const AXIAL_TOL: Scalar = 1e-24;

fn radius(mask: &Mask) -> Scalar {
  match mask.shape {
    MaskShape::Cylinder { radius, .. } | MaskShape::PortalCylinder { radius, .. } => radius,
    _ => unreachable!("cylinder intersector called with a non-cylinder mask"),
  }
}

/// Solve for the path lengths where the ray crosses the cylinder sheet,
/// in the surface-local frame.
fn solve(ray: &Ray, mask: &Mask, trf: &Transform3) -> Option<(QuadraticEquation, Ray)> {
  let inv = trf.inverse();
  let local_ray = Ray {
    pos: inv.transform_point3(ray.pos),
    dir: inv.transform_vector3(ray.dir),
  };

  let r = radius(mask);
  let a = local_ray.dir.x * local_ray.dir.x + local_ray.dir.y * local_ray.dir.y;
  if a < AXIAL_TOL {
    return None;
  }
  let b = 2.0 * (local_ray.pos.x * local_ray.dir.x + local_ray.pos.y * local_ray.dir.y);
  let c = local_ray.pos.x * local_ray.pos.x + local_ray.pos.y * local_ray.pos.y - r * r;

  Some((QuadraticEquation::new(a, b, c), local_ray))
}

/// Build the candidate at path `t`, checking the mask bounds.
fn build_candidate(
  local_ray: &Ray,
  sf: &SurfaceDesc,
  mask: &Mask,
  t: Scalar,
  mask_tol: Scalar,
) -> IntersectionRecord {
  let r = radius(mask);
  let hit = local_ray.point_at(t);

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
    // Radial surface normal against the track direction
    is.cos_incidence_angle = ((hit.x * local_ray.dir.x + hit.y * local_ray.dir.y) / r).abs();
  } else {
    is.status = IntersectionStatus::Outside;
  }

  is
}

/// Generic cylinder intersection: both roots are reported when reachable.
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

  let Some((qe, local_ray)) = solve(ray, mask, trf) else {
    return out;
  };

  if qe.solutions() > 0 && qe.smaller() > overstep_tol {
    out[0] = build_candidate(&local_ray, sf, mask, qe.smaller(), mask_tol);
  }
  if qe.solutions() > 1 && qe.larger() > overstep_tol {
    out[1] = build_candidate(&local_ray, sf, mask, qe.larger(), mask_tol);
  }

  out
}

/// Refresh a cached candidate of a generic cylinder in place.
///
/// A generic cylinder can hold two cache slots at once, one per crossing.
/// The refresh re-solves the quadratic and re-binds the candidate to the
/// reachable root nearest its cached path, so the near and the far
/// crossing keep tracking their own roots across steps.
pub fn update_full(
  ray: &Ray,
  rec: &mut IntersectionRecord,
  mask: &Mask,
  trf: &Transform3,
  mask_tol: Scalar,
  overstep_tol: Scalar,
) -> bool {
  let sf = rec.sf_desc;

  let root = solve(ray, mask, trf)
    .and_then(|(qe, local_ray)| qe.closest_to(rec.path, overstep_tol).map(|t| (t, local_ray)));

  match root {
    Some((t, local_ray)) => {
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

/// Portal cylinder intersection: only the closest reachable root.
///
/// When the smaller root lies at or behind the overstep cutoff but the
/// larger one is in front, the larger root is selected.
pub fn intersect_portal(
  ray: &Ray,
  sf: &SurfaceDesc,
  mask: &Mask,
  trf: &Transform3,
  mask_tol: Scalar,
  overstep_tol: Scalar,
) -> IntersectionRecord {
  let missed = IntersectionRecord {
    sf_desc: *sf,
    ..Default::default()
  };

  let Some((qe, local_ray)) = solve(ray, mask, trf) else {
    return missed;
  };

  if qe.solutions() > 0 && qe.larger() > overstep_tol {
    let t = if qe.smaller() > overstep_tol {
      qe.smaller()
    } else {
      qe.larger()
    };
    build_candidate(&local_ray, sf, mask, t, mask_tol)
  } else {
    missed
  }
}

#[cfg(test)]
#[path = "cylinder_test.rs"]
mod cylinder_test;
