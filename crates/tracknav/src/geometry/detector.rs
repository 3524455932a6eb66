//! Detector - immutable geometry store shared by all navigation states.
//!
//! A detector is assembled once through [`DetectorBuilder`] and read-only
//! afterwards, so any number of per-track navigation states can share one
//! instance without locking.

use crate::accel::AccelStore;
use crate::grid::SurfaceGrid;
use crate::types::{Transform3, INVALID_VOLUME};

use super::barcode::{Barcode, SurfaceKind};
use super::masks::Mask;
use super::surface::SurfaceDesc;
use super::volume::{AccelLink, VolumeDesc};

/// Immutable detector geometry.
pub struct Detector {
  volumes: Vec<VolumeDesc>,
  surfaces: Vec<SurfaceDesc>,
  masks: Vec<Mask>,
  transforms: Vec<Transform3>,
  accel: AccelStore,
}

impl Detector {
  #[inline]
  pub fn volume(&self, index: u32) -> &VolumeDesc {
    &self.volumes[index as usize]
  }

  #[inline]
  pub fn surface(&self, index: u32) -> &SurfaceDesc {
    &self.surfaces[index as usize]
  }

  #[inline]
  pub fn mask(&self, sf: &SurfaceDesc) -> &Mask {
    &self.masks[sf.mask as usize]
  }

  #[inline]
  pub fn transform(&self, index: u32) -> &Transform3 {
    &self.transforms[index as usize]
  }

  #[inline]
  pub fn accel(&self) -> &AccelStore {
    &self.accel
  }

  pub fn volumes(&self) -> &[VolumeDesc] {
    &self.volumes
  }

  pub fn surfaces(&self) -> &[SurfaceDesc] {
    &self.surfaces
  }

  pub fn n_volumes(&self) -> usize {
    self.volumes.len()
  }
}

/// Errors raised while assembling a detector.
#[derive(Debug, PartialEq, Eq)]
pub enum BuildError {
  /// A surface or grid referenced a volume index that was never added.
  UnknownVolume(u32),
  /// A mask's volume link points at a volume that does not exist
  /// (and is not the leaving-world sentinel).
  DanglingVolumeLink { surface: u32, link: u32 },
  /// A grid bin stores a surface index outside the surface container.
  DanglingGridEntry { surface: u32 },
  /// A sensitive-surface grid was attached twice to the same volume.
  DuplicateGrid(u32),
}

impl std::fmt::Display for BuildError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      BuildError::UnknownVolume(v) => write!(f, "unknown volume index {v}"),
      BuildError::DanglingVolumeLink { surface, link } => {
        write!(f, "surface {surface} links to nonexistent volume {link}")
      }
      BuildError::DanglingGridEntry { surface } => {
        write!(f, "grid references nonexistent surface {surface}")
      }
      BuildError::DuplicateGrid(v) => {
        write!(f, "volume {v} already has a sensitive-surface grid")
      }
    }
  }
}

impl std::error::Error for BuildError {}

/// Builder that assembles the immutable [`Detector`].
///
/// Surfaces are registered per volume; `build` wires the per-volume
/// brute-force lists (portals and passives, plus sensitives when the volume
/// has no grid) and the accelerator multi-links.
#[derive(Default)]
pub struct DetectorBuilder {
  volumes: Vec<VolumeDesc>,
  surfaces: Vec<SurfaceDesc>,
  masks: Vec<Mask>,
  transforms: Vec<Transform3>,
  grids: Vec<(u32, SurfaceGrid)>,
}

impl DetectorBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a volume with its placement transform, returning its index.
  pub fn add_volume(&mut self, transform: Transform3) -> u32 {
    let index = self.volumes.len() as u32;
    let trf_idx = self.push_transform(transform);
    self.volumes.push(VolumeDesc::new(index, trf_idx));
    index
  }

  /// Register a surface in `volume`, returning its global surface index.
  ///
  /// The mask's `volume_link` is copied into the descriptor: the next
  /// volume for portals, the mother volume for modules.
  pub fn add_surface(
    &mut self,
    volume: u32,
    kind: SurfaceKind,
    transform: Transform3,
    mask: Mask,
    material: u32,
  ) -> u32 {
    let index = self.surfaces.len() as u32;
    let trf_idx = self.push_transform(transform);
    let mask_idx = self.masks.len() as u32;
    self.masks.push(mask);
    self.surfaces.push(SurfaceDesc {
      barcode: Barcode::new(volume, index, kind),
      transform: trf_idx,
      mask: mask_idx,
      material,
      volume_link: mask.volume_link,
    });
    index
  }

  /// Attach a populated sensitive-surface grid to a volume.
  ///
  /// The grid bins must hold global surface indices as returned by
  /// [`DetectorBuilder::add_surface`]; the accelerator kind follows from
  /// the grid's local frame.
  pub fn attach_grid(&mut self, volume: u32, grid: SurfaceGrid) {
    self.grids.push((volume, grid));
  }

  fn push_transform(&mut self, transform: Transform3) -> u32 {
    let idx = self.transforms.len() as u32;
    self.transforms.push(transform);
    idx
  }

  /// Validate links and assemble the detector.
  pub fn build(self) -> Result<Detector, BuildError> {
    let n_volumes = self.volumes.len() as u32;
    let n_surfaces = self.surfaces.len() as u32;
    let mut volumes = self.volumes;

    for sf in &self.surfaces {
      if sf.barcode.volume() >= n_volumes {
        return Err(BuildError::UnknownVolume(sf.barcode.volume()));
      }
      if sf.volume_link != INVALID_VOLUME && sf.volume_link >= n_volumes {
        return Err(BuildError::DanglingVolumeLink {
          surface: sf.barcode.index(),
          link: sf.volume_link,
        });
      }
    }

    let mut accel = AccelStore::default();

    // Sensitive-surface grids first, so the brute-force assembly below
    // knows which volumes are covered.
    let mut grid_links: Vec<Option<AccelLink>> = vec![None; volumes.len()];
    for (volume, grid) in self.grids {
      if volume >= n_volumes {
        return Err(BuildError::UnknownVolume(volume));
      }
      if grid_links[volume as usize].is_some() {
        return Err(BuildError::DuplicateGrid(volume));
      }
      for entry in grid.all() {
        if entry >= n_surfaces {
          return Err(BuildError::DanglingGridEntry { surface: entry });
        }
      }
      grid_links[volume as usize] = Some(accel.push_grid(grid));
    }

    for (v, volume) in volumes.iter_mut().enumerate() {
      let has_grid = grid_links[v].is_some();
      let listed: Vec<u32> = self
        .surfaces
        .iter()
        .filter(|sf| sf.barcode.volume() as usize == v)
        .filter(|sf| !has_grid || sf.kind() != SurfaceKind::Sensitive)
        .map(|sf| sf.barcode.index())
        .collect();

      volume.accel_links[0] = accel.push_brute_force(listed);
      if let Some(link) = grid_links[v] {
        volume.accel_links[1] = link;
      }
    }

    Ok(Detector {
      volumes,
      surfaces: self.surfaces,
      masks: self.masks,
      transforms: self.transforms,
      accel,
    })
  }
}
