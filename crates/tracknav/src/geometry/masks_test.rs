use super::*;

#[test]
fn rectangle_bounds_with_tolerance() {
  let mask = Mask::new(
    MaskShape::Rectangle {
      half_x: 10.0,
      half_y: 5.0,
    },
    0,
  );

  assert!(mask.is_inside(Point2::new(0.0, 0.0), 0.0));
  assert!(mask.is_inside(Point2::new(10.0, -5.0), 0.0));
  assert!(!mask.is_inside(Point2::new(10.1, 0.0), 0.0));

  // Tolerance widens the check
  assert!(mask.is_inside(Point2::new(10.1, 0.0), 0.2));
  assert!(!mask.is_inside(Point2::new(0.0, 5.3), 0.2));
}

#[test]
fn unbounded_accepts_everything() {
  let mask = Mask::new(MaskShape::Unbounded, 3);
  assert!(mask.is_inside(Point2::new(1e12, -1e12), 0.0));
  assert_eq!(mask.volume_link, 3);
}

#[test]
fn annulus_radial_bounds() {
  let mask = Mask::new(
    MaskShape::Annulus {
      r_min: 20.0,
      r_max: 40.0,
    },
    1,
  );

  // Local frame is (r, phi); phi is unbounded
  assert!(mask.is_inside(Point2::new(30.0, 3.0), 0.0));
  assert!(!mask.is_inside(Point2::new(19.9, 0.0), 0.0));
  assert!(!mask.is_inside(Point2::new(40.1, 0.0), 0.0));
  assert!(mask.is_inside(Point2::new(19.9, 0.0), 0.2));
}

#[test]
fn cylinder_bounds_z_only() {
  let mask = Mask::new(
    MaskShape::Cylinder {
      radius: 50.0,
      half_z: 100.0,
    },
    2,
  );

  // Local frame is (r*phi, z); the azimuthal coordinate is unbounded
  assert!(mask.is_inside(Point2::new(150.0, 99.0), 0.0));
  assert!(!mask.is_inside(Point2::new(0.0, 100.5), 0.0));
}

#[test]
fn wire_cell_bounds() {
  let mask = Mask::new(
    MaskShape::Wire {
      cell_radius: 5.0,
      half_z: 200.0,
    },
    0,
  );

  // Signed closest-approach distance on the first axis
  assert!(mask.is_inside(Point2::new(-4.9, 150.0), 0.0));
  assert!(!mask.is_inside(Point2::new(5.1, 0.0), 0.0));
  assert!(!mask.is_inside(Point2::new(0.0, 201.0), 0.0));
}

#[test]
fn cone_z_range() {
  let mask = Mask::new(
    MaskShape::Cone {
      slope: 0.5,
      z_min: 10.0,
      z_max: 100.0,
    },
    0,
  );

  assert!(mask.is_inside(Point2::new(0.0, 50.0), 0.0));
  assert!(!mask.is_inside(Point2::new(0.0, 9.0), 0.0));
  assert!(!mask.is_inside(Point2::new(0.0, 101.0), 0.0));
}

#[test]
fn plane_local_mapping() {
  let rect = Mask::new(
    MaskShape::Rectangle {
      half_x: 1.0,
      half_y: 1.0,
    },
    0,
  );
  let ring = Mask::new(
    MaskShape::Annulus {
      r_min: 0.0,
      r_max: 10.0,
    },
    0,
  );

  let p = glam::DVec3::new(3.0, 4.0, 0.0);
  assert_eq!(rect.plane_local(p), Point2::new(3.0, 4.0));

  let polar = ring.plane_local(p);
  assert!((polar.x - 5.0).abs() < 1e-12);
  assert!((polar.y - 4.0_f64.atan2(3.0)).abs() < 1e-12);
}
