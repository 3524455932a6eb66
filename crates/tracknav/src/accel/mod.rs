//! Accelerator store - the per-volume spatial indices queried during
//! navigation.
//!
//! Two index families exist: brute-force surface lists (portals and
//! low-density volumes) and 2D surface grids for the sensitive layers.
//! A volume addresses its indices through the tagged entries of its
//! accelerator multi-link; the neighbourhood visitor walks every valid
//! entry and yields candidate surface indices to the caller.

use crate::geometry::{AccelKind, AccelLink, VolumeDesc};
use crate::grid::{GridFrame, SurfaceGrid};
use crate::types::{Point3, Transform3, Vector3};

/// Tagged collection of all spatial indices of a detector.
#[derive(Default)]
pub struct AccelStore {
  brute_force: Vec<Vec<u32>>,
  cyl_grids: Vec<SurfaceGrid>,
  disc_grids: Vec<SurfaceGrid>,
}

impl AccelStore {
  /// Store a brute-force surface list, returning its link.
  pub fn push_brute_force(&mut self, surfaces: Vec<u32>) -> AccelLink {
    let index = self.brute_force.len() as u32;
    self.brute_force.push(surfaces);
    AccelLink::new(AccelKind::BruteForce, index)
  }

  /// Store a surface grid, returning its link. The accelerator kind
  /// follows from the grid's local frame.
  pub fn push_grid(&mut self, grid: SurfaceGrid) -> AccelLink {
    match grid.frame() {
      GridFrame::Cylindrical => {
        let index = self.cyl_grids.len() as u32;
        self.cyl_grids.push(grid);
        AccelLink::new(AccelKind::Cyl2Grid, index)
      }
      GridFrame::Polar => {
        let index = self.disc_grids.len() as u32;
        self.disc_grids.push(grid);
        AccelLink::new(AccelKind::DiscGrid, index)
      }
    }
  }

  /// Surface list behind a brute-force link.
  pub fn brute_force(&self, index: u32) -> &[u32] {
    &self.brute_force[index as usize]
  }

  /// Grid behind a grid link.
  pub fn grid(&self, link: AccelLink) -> &SurfaceGrid {
    match link.kind {
      AccelKind::Cyl2Grid => &self.cyl_grids[link.index as usize],
      AccelKind::DiscGrid => &self.disc_grids[link.index as usize],
      AccelKind::BruteForce => unreachable!("brute-force link passed to grid accessor"),
    }
  }

  /// Visit the candidate surfaces around a track position.
  ///
  /// Walks every valid entry of the volume's accelerator multi-link in
  /// order and calls `visitor` with each candidate surface index. Grids
  /// are queried with the given per-axis search window; duplicates across
  /// bins are passed through.
  pub fn visit_neighborhood(
    &self,
    volume: &VolumeDesc,
    volume_trf: &Transform3,
    pos: Point3,
    dir: Vector3,
    search_window: [usize; 2],
    mut visitor: impl FnMut(u32),
  ) {
    for link in volume.accel_links {
      if !link.is_valid() {
        continue;
      }
      match link.kind {
        AccelKind::BruteForce => {
          for &sf in &self.brute_force[link.index as usize] {
            visitor(sf);
          }
        }
        AccelKind::Cyl2Grid | AccelKind::DiscGrid => {
          let grid = self.grid(link);
          let loc = grid.project(volume_trf, pos, dir);
          for sf in grid.search(loc, search_window) {
            visitor(sf);
          }
        }
      }
    }
  }
}
