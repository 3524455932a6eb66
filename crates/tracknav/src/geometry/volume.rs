//! Volume descriptor with its accelerator multi-link.

use crate::types::INVALID_INDEX;

/// Which spatial index a volume entry addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccelKind {
  /// Exhaustive list of surface indices.
  BruteForce,
  /// 2D grid on a cylinder sheet, axes (phi, z).
  Cyl2Grid,
  /// 2D grid on a disc, axes (r, phi).
  DiscGrid,
}

/// Tagged reference into the accelerator store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccelLink {
  pub kind: AccelKind,
  pub index: u32,
}

impl AccelLink {
  /// Unset entry in the accel multi-link.
  pub const INVALID: AccelLink = AccelLink {
    kind: AccelKind::BruteForce,
    index: INVALID_INDEX,
  };

  pub fn new(kind: AccelKind, index: u32) -> Self {
    Self { kind, index }
  }

  #[inline]
  pub fn is_valid(&self) -> bool {
    self.index != INVALID_INDEX
  }
}

/// Descriptor of a detector volume.
///
/// The accelerator multi-link is an ordered pair: entry 0 always addresses
/// the portal brute-force structure, entry 1 (optional) the index over the
/// sensitive surfaces.
#[derive(Clone, Copy, Debug)]
pub struct VolumeDesc {
  /// Index in the detector's volume container.
  pub index: u32,
  /// Placement transform index.
  pub transform: u32,
  /// Ordered accelerator links, invalid entries are skipped.
  pub accel_links: [AccelLink; 2],
}

impl VolumeDesc {
  pub fn new(index: u32, transform: u32) -> Self {
    Self {
      index,
      transform,
      accel_links: [AccelLink::INVALID; 2],
    }
  }
}
