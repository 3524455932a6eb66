//! Shared geometric type aliases and link sentinels.

/// Scalar type used throughout the geometry and navigation code.
pub type Scalar = f64;

/// Point/vector in global 3D space.
pub type Point3 = glam::DVec3;

/// Direction vector in global 3D space (unit length by convention).
pub type Vector3 = glam::DVec3;

/// Point in a surface-local 2D frame.
pub type Point2 = glam::DVec2;

/// Rigid placement transform of a surface or volume.
pub type Transform3 = glam::DAffine3;

/// Index of a volume in the detector's volume container.
///
/// Portals carry this as their navigation link; [`INVALID_VOLUME`] means
/// "the other side is outside the detector world".
pub type VolumeLink = u32;

/// Sentinel for a volume link that leaves the detector world.
pub const INVALID_VOLUME: VolumeLink = u32::MAX;

/// Sentinel for an unset store index (transform, mask, material).
pub const INVALID_INDEX: u32 = u32::MAX;

/// Material link sentinel: the surface carries no material.
pub const MATERIAL_NONE: u32 = u32::MAX;

/// Returns true when a link still points at a real store entry.
#[inline]
pub fn is_valid_index(idx: u32) -> bool {
  idx != INVALID_INDEX
}
