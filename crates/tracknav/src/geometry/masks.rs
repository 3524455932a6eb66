//! Surface masks - the bounded extent of a surface in its local frame.
//!
//! A mask pairs a shape with the navigation link of the volume on the other
//! side of the surface (the mother volume for modules). Shape dispatch is a
//! plain match on the [`MaskShape`] tag: adding a shape means one new
//! variant plus one intersector.
//!
//! # Local frames
//!
//! Each shape fixes the meaning of the 2D local point handed to
//! [`Mask::is_inside`]:
//! - `Rectangle`, `Unbounded`: cartesian (x, y) on the surface plane
//! - `Annulus`: polar (r, phi) on the surface plane
//! - `Cylinder`, `PortalCylinder`: (r * phi, z) on the cylinder sheet
//! - `Wire`: (signed closest-approach distance, z along the wire)
//! - `Cone`: (r * phi, z) on the cone sheet

use crate::types::{Point2, Scalar, VolumeLink};

/// Shape tag with the bounds parameters of the mask.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MaskShape {
  /// Bounded plane, half extents along local x/y.
  Rectangle { half_x: Scalar, half_y: Scalar },

  /// Plane without bounds; every intersection point is inside.
  /// Used by telescope-style module layouts.
  Unbounded,

  /// Ring on a plane, bounded in radius. The usual disc-portal shape.
  Annulus { r_min: Scalar, r_max: Scalar },

  /// Full cylinder sheet at fixed radius, bounded along z.
  Cylinder { radius: Scalar, half_z: Scalar },

  /// Cylinder sheet used as a volume boundary. Same bounds as
  /// [`MaskShape::Cylinder`], but intersected with the closest-root rule.
  PortalCylinder { radius: Scalar, half_z: Scalar },

  /// Drift cell around a wire: bounded by the cell radius and the wire
  /// half length.
  Wire { cell_radius: Scalar, half_z: Scalar },

  /// Cone sheet around local z with apex at the origin.
  /// `slope` is tan of the opening half-angle.
  Cone {
    slope: Scalar,
    z_min: Scalar,
    z_max: Scalar,
  },
}

/// A surface mask: shape bounds plus the volume behind the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mask {
  pub shape: MaskShape,
  /// Volume on the other side: next volume for portals, mother volume for
  /// modules.
  pub volume_link: VolumeLink,
}

impl Mask {
  pub fn new(shape: MaskShape, volume_link: VolumeLink) -> Self {
    Self { shape, volume_link }
  }

  /// Check whether a local point lies within the mask bounds.
  ///
  /// `tol` widens the check; portals are queried with `tol = 0`.
  #[inline]
  pub fn is_inside(&self, local: Point2, tol: Scalar) -> bool {
    match self.shape {
      MaskShape::Rectangle { half_x, half_y } => {
        local.x.abs() <= half_x + tol && local.y.abs() <= half_y + tol
      }
      MaskShape::Unbounded => true,
      MaskShape::Annulus { r_min, r_max } => local.x >= r_min - tol && local.x <= r_max + tol,
      MaskShape::Cylinder { half_z, .. } | MaskShape::PortalCylinder { half_z, .. } => {
        local.y.abs() <= half_z + tol
      }
      MaskShape::Wire {
        cell_radius,
        half_z,
      } => local.x.abs() <= cell_radius + tol && local.y.abs() <= half_z + tol,
      MaskShape::Cone { z_min, z_max, .. } => local.y >= z_min - tol && local.y <= z_max + tol,
    }
  }

  /// Map a point in the surface's local 3D frame to the mask-local 2D frame
  /// for the plane-like shapes.
  #[inline]
  pub fn plane_local(&self, local3: glam::DVec3) -> Point2 {
    match self.shape {
      MaskShape::Annulus { .. } => {
        Point2::new(local3.truncate().length(), local3.y.atan2(local3.x))
      }
      _ => Point2::new(local3.x, local3.y),
    }
  }
}

#[cfg(test)]
#[path = "masks_test.rs"]
mod masks_test;
