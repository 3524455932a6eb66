//! Reference detectors for tests and benches.
//!
//! Deliberately small: a telescope of planes along z and a two-volume
//! barrel with a gridded sensitive layer. Both exercise the full
//! navigation stack (portals, brute-force lists, grid search) without
//! pulling in a real geometry description.

use std::f64::consts::PI;

use glam::{DMat3, DVec3};

use crate::geometry::{Detector, DetectorBuilder, Mask, MaskShape, SurfaceKind};
use crate::grid::{Axis, AxisBounds, GridFrame, MultiAxes, SurfaceGrid};
use crate::types::{Transform3, INVALID_VOLUME, MATERIAL_NONE};

/// Distance of the telescope exit portal behind the last module.
pub const TELESCOPE_ENVELOPE: f64 = 10.0;

/// Telescope detector: one volume, unbounded plane modules at the given z
/// positions, terminated by a portal plane that leaves the world.
///
/// Surface indices follow the position order; the portal is the last
/// index.
pub fn build_telescope(positions: &[f64]) -> Detector {
  let mut builder = DetectorBuilder::new();
  let vol = builder.add_volume(Transform3::IDENTITY);

  for &z in positions {
    builder.add_surface(
      vol,
      SurfaceKind::Sensitive,
      Transform3::from_translation(DVec3::new(0.0, 0.0, z)),
      Mask::new(MaskShape::Unbounded, vol),
      0,
    );
  }

  let exit_z = positions.last().copied().unwrap_or(0.0) + TELESCOPE_ENVELOPE;
  builder.add_surface(
    vol,
    SurfaceKind::Portal,
    Transform3::from_translation(DVec3::new(0.0, 0.0, exit_z)),
    Mask::new(MaskShape::Unbounded, INVALID_VOLUME),
    MATERIAL_NONE,
  );

  builder.build().expect("telescope geometry is consistent")
}

/// Barrel layout parameters.
pub struct BarrelConfig {
  pub inner_radius: f64,
  pub layer_radius: f64,
  pub outer_radius: f64,
  pub half_z: f64,
  pub n_phi: usize,
  pub n_z: usize,
}

impl Default for BarrelConfig {
  fn default() -> Self {
    Self {
      inner_radius: 40.0,
      layer_radius: 60.0,
      outer_radius: 80.0,
      half_z: 200.0,
      n_phi: 8,
      n_z: 4,
    }
  }
}

/// Two-volume barrel detector.
///
/// Volume 0 is the empty inner tube (r < inner_radius), volume 1 the
/// barrel with a sensitive layer of rectangle modules on a (phi, z)
/// cylinder grid. The outer portal cylinder and the disc portals leave
/// the world.
pub fn build_barrel(cfg: &BarrelConfig) -> Detector {
  let mut builder = DetectorBuilder::new();
  let inner = builder.add_volume(Transform3::IDENTITY);
  let barrel = builder.add_volume(Transform3::IDENTITY);

  let portal_cylinder = |radius: f64, link: u32| {
    Mask::new(
      MaskShape::PortalCylinder {
        radius,
        half_z: cfg.half_z,
      },
      link,
    )
  };
  let portal_disc = |r_min: f64, r_max: f64| Mask::new(MaskShape::Annulus { r_min, r_max }, INVALID_VOLUME);
  let disc_at = |z: f64| Transform3::from_translation(DVec3::new(0.0, 0.0, z));

  // Inner volume boundaries
  builder.add_surface(
    inner,
    SurfaceKind::Portal,
    Transform3::IDENTITY,
    portal_cylinder(cfg.inner_radius, barrel),
    MATERIAL_NONE,
  );
  builder.add_surface(
    inner,
    SurfaceKind::Portal,
    disc_at(cfg.half_z),
    portal_disc(0.0, cfg.inner_radius),
    MATERIAL_NONE,
  );
  builder.add_surface(
    inner,
    SurfaceKind::Portal,
    disc_at(-cfg.half_z),
    portal_disc(0.0, cfg.inner_radius),
    MATERIAL_NONE,
  );

  // Barrel volume boundaries
  builder.add_surface(
    barrel,
    SurfaceKind::Portal,
    Transform3::IDENTITY,
    portal_cylinder(cfg.inner_radius, inner),
    MATERIAL_NONE,
  );
  builder.add_surface(
    barrel,
    SurfaceKind::Portal,
    Transform3::IDENTITY,
    portal_cylinder(cfg.outer_radius, INVALID_VOLUME),
    MATERIAL_NONE,
  );
  builder.add_surface(
    barrel,
    SurfaceKind::Portal,
    disc_at(cfg.half_z),
    portal_disc(cfg.inner_radius, cfg.outer_radius),
    MATERIAL_NONE,
  );
  builder.add_surface(
    barrel,
    SurfaceKind::Portal,
    disc_at(-cfg.half_z),
    portal_disc(cfg.inner_radius, cfg.outer_radius),
    MATERIAL_NONE,
  );

  // Sensitive layer: rectangle modules tangent to the layer cylinder,
  // registered in a (phi, z) grid
  let mut grid = SurfaceGrid::new(
    GridFrame::Cylindrical,
    MultiAxes::new([
      Axis::regular(cfg.n_phi, -PI, PI, AxisBounds::Circular),
      Axis::regular(cfg.n_z, -cfg.half_z, cfg.half_z, AxisBounds::Open),
    ]),
  );

  // Half extents with a little overlap between neighbouring modules
  let half_tangential = 1.1 * PI * cfg.layer_radius / cfg.n_phi as f64;
  let half_length = 1.1 * cfg.half_z / cfg.n_z as f64;
  let z_pitch = 2.0 * cfg.half_z / cfg.n_z as f64;

  for i_phi in 0..cfg.n_phi {
    let phi = -PI + (i_phi as f64 + 0.5) * 2.0 * PI / cfg.n_phi as f64;
    let radial = DVec3::new(phi.cos(), phi.sin(), 0.0);
    let tangential = DVec3::new(-phi.sin(), phi.cos(), 0.0);

    for i_z in 0..cfg.n_z {
      let z = -cfg.half_z + (i_z as f64 + 0.5) * z_pitch;
      // Module frame: x tangential, y along global z, normal radial
      let trf = Transform3::from_mat3_translation(
        DMat3::from_cols(tangential, DVec3::Z, radial),
        radial * cfg.layer_radius + DVec3::new(0.0, 0.0, z),
      );

      let sf = builder.add_surface(
        barrel,
        SurfaceKind::Sensitive,
        trf,
        Mask::new(
          MaskShape::Rectangle {
            half_x: half_tangential,
            half_y: half_length,
          },
          barrel,
        ),
        0,
      );
      grid.populate([phi, z], sf);
    }
  }

  builder.attach_grid(barrel, grid);
  builder.build().expect("barrel geometry is consistent")
}
