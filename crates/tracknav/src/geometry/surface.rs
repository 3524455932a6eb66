//! Surface descriptor - the opaque handle stored in the detector's surface
//! container and copied into intersection records.

use super::barcode::{Barcode, SurfaceKind};
use crate::types::{VolumeLink, MATERIAL_NONE};

/// Descriptor of a single detector surface.
///
/// All fields are indices into the detector's stores; the descriptor itself
/// is a small copyable value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceDesc {
  /// Packed (volume, index, kind) identifier.
  pub barcode: Barcode,
  /// Index into the transform store.
  pub transform: u32,
  /// Index into the mask store (the mask carries the shape tag).
  pub mask: u32,
  /// Index into the material store, [`MATERIAL_NONE`] when bare.
  pub material: u32,
  /// Navigation link: next volume for portals, mother volume for modules.
  pub volume_link: VolumeLink,
}

impl SurfaceDesc {
  #[inline]
  pub fn kind(&self) -> SurfaceKind {
    self.barcode.kind()
  }

  #[inline]
  pub fn is_portal(&self) -> bool {
    self.barcode.kind() == SurfaceKind::Portal
  }

  #[inline]
  pub fn is_sensitive(&self) -> bool {
    self.barcode.kind() == SurfaceKind::Sensitive
  }

  #[inline]
  pub fn has_material(&self) -> bool {
    self.material != MATERIAL_NONE
  }
}

impl Default for SurfaceDesc {
  fn default() -> Self {
    Self {
      barcode: Barcode::INVALID,
      transform: crate::types::INVALID_INDEX,
      mask: crate::types::INVALID_INDEX,
      material: MATERIAL_NONE,
      volume_link: crate::types::INVALID_VOLUME,
    }
  }
}
