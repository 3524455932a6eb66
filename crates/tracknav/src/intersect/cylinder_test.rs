use glam::DVec3;

use super::*;

fn cylinder(radius: f64, half_z: f64) -> Mask {
  Mask::new(MaskShape::Cylinder { radius, half_z }, 0)
}

fn portal(radius: f64, half_z: f64) -> Mask {
  Mask::new(MaskShape::PortalCylinder { radius, half_z }, 8)
}

#[test]
fn two_candidates_from_outside() {
  let mask = cylinder(4.0, 100.0);
  let ray = Ray::new(DVec3::new(-10.0, 0.0, 0.0), DVec3::X);

  let [near, far] = intersect_full(
    &ray,
    &SurfaceDesc::default(),
    &mask,
    &Transform3::IDENTITY,
    0.0,
    -0.1,
  );

  assert_eq!(near.status, IntersectionStatus::Inside);
  assert!((near.path - 6.0).abs() < 1e-12);
  assert_eq!(far.status, IntersectionStatus::Inside);
  assert!((far.path - 14.0).abs() < 1e-12);

  // Radial incidence on a perpendicular crossing
  assert!((near.cos_incidence_angle - 1.0).abs() < 1e-12);
  assert!((far.cos_incidence_angle - 1.0).abs() < 1e-12);
}

#[test]
fn behind_root_rejected_from_inside() {
  let mask = cylinder(4.0, 100.0);
  let ray = Ray::new(DVec3::ZERO, DVec3::X);

  let [near, far] = intersect_full(
    &ray,
    &SurfaceDesc::default(),
    &mask,
    &Transform3::IDENTITY,
    0.0,
    -0.1,
  );

  // The root at -4 is behind the overstep cutoff
  assert_eq!(near.status, IntersectionStatus::Missed);
  assert_eq!(far.status, IntersectionStatus::Inside);
  assert!((far.path - 4.0).abs() < 1e-12);
}

#[test]
fn portal_selects_larger_root_from_inside() {
  let mask = portal(40.0, 200.0);
  let ray = Ray::new(DVec3::ZERO, DVec3::X);

  let hit = intersect_portal(
    &ray,
    &SurfaceDesc::default(),
    &mask,
    &Transform3::IDENTITY,
    0.0,
    -0.1,
  );

  assert_eq!(hit.status, IntersectionStatus::Inside);
  assert!((hit.path - 40.0).abs() < 1e-12);
  assert_eq!(hit.volume_link, 8);
}

#[test]
fn portal_selects_smaller_root_from_outside() {
  let mask = portal(40.0, 200.0);
  let ray = Ray::new(DVec3::new(-100.0, 0.0, 0.0), DVec3::X);

  let hit = intersect_portal(
    &ray,
    &SurfaceDesc::default(),
    &mask,
    &Transform3::IDENTITY,
    0.0,
    -0.1,
  );

  assert_eq!(hit.status, IntersectionStatus::Inside);
  assert!((hit.path - 60.0).abs() < 1e-12);
}

#[test]
fn z_bounds_flag_outside() {
  let mask = cylinder(4.0, 10.0);
  // Steep ray exits through the open end: hit at z = 40
  let ray = Ray::new(DVec3::ZERO, DVec3::new(0.1, 0.0, 1.0).normalize());

  let [_, far] = intersect_full(
    &ray,
    &SurfaceDesc::default(),
    &mask,
    &Transform3::IDENTITY,
    0.0,
    -0.1,
  );
  assert_eq!(far.status, IntersectionStatus::Outside);
}

#[test]
fn axial_ray_misses() {
  let mask = cylinder(4.0, 100.0);
  let ray = Ray::new(DVec3::new(1.0, 0.0, 0.0), DVec3::Z);

  let hit = intersect_portal(
    &ray,
    &SurfaceDesc::default(),
    &mask,
    &Transform3::IDENTITY,
    0.0,
    -0.1,
  );
  assert_eq!(hit.status, IntersectionStatus::Missed);
}

#[test]
fn refresh_keeps_near_far_identity() {
  use crate::intersect::update_candidate;

  let mask = cylinder(4.0, 100.0);
  let ray = Ray::new(DVec3::new(-10.0, 0.0, 0.0), DVec3::X);
  let [mut near, mut far] = intersect_full(
    &ray,
    &SurfaceDesc::default(),
    &mask,
    &Transform3::IDENTITY,
    0.0,
    -0.1,
  );

  // The track advanced 3 mm towards the cylinder
  let moved = Ray::new(DVec3::new(-7.0, 0.0, 0.0), DVec3::X);
  assert!(update_candidate(&moved, &mut near, &mask, &Transform3::IDENTITY, 0.0, -0.1));
  assert!(update_candidate(&moved, &mut far, &mask, &Transform3::IDENTITY, 0.0, -0.1));

  // Each cache slot kept tracking its own crossing
  assert!((near.path - 3.0).abs() < 1e-12);
  assert!((far.path - 11.0).abs() < 1e-12);
}

#[test]
fn refresh_invalidates_when_behind() {
  use crate::intersect::update_candidate;

  let mask = cylinder(4.0, 100.0);
  let ray = Ray::new(DVec3::new(-10.0, 0.0, 0.0), DVec3::X);
  let [_, mut far] = intersect_full(
    &ray,
    &SurfaceDesc::default(),
    &mask,
    &Transform3::IDENTITY,
    0.0,
    -0.1,
  );

  // Both crossings are behind the track now
  let gone = Ray::new(DVec3::new(10.0, 0.0, 0.0), DVec3::X);
  assert!(!update_candidate(&gone, &mut far, &mask, &Transform3::IDENTITY, 0.0, -0.1));
  assert_eq!(far.status, IntersectionStatus::Missed);
}

#[test]
fn azimuthal_local_coordinate() {
  let mask = cylinder(4.0, 100.0);
  let ray = Ray::new(DVec3::new(-10.0, 0.0, 5.0), DVec3::X);

  let [near, far] = intersect_full(
    &ray,
    &SurfaceDesc::default(),
    &mask,
    &Transform3::IDENTITY,
    0.0,
    -0.1,
  );

  // First crossing at (-4, 0): phi = pi, local = (r*pi, z)
  assert!((near.local.x - 4.0 * std::f64::consts::PI).abs() < 1e-9);
  assert!((near.local.y - 5.0).abs() < 1e-12);
  // Second crossing at (4, 0): phi = 0
  assert!(far.local.x.abs() < 1e-9);
}
