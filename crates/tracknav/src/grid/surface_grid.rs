//! Surface grid - 2D spatial index over surface indices.
//!
//! A grid pairs two axes with flat bin storage and answers neighbourhood
//! queries for the navigator: project the track position into the grid's
//! local frame, look up the bins of a search window, yield the stored
//! surface indices. Duplicates across bins are permitted; the caller
//! deduplicates through path-length sorting.

use smallvec::SmallVec;

use crate::types::{Point3, Scalar, Transform3, Vector3};

use super::axis::MultiAxes;
use super::bin_view::BinView;

/// Capacity of the inline bin storage; bins beyond this spill to the heap.
const BIN_CAPACITY: usize = 4;

/// Local frame the grid's axes are defined in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridFrame {
  /// Cylinder sheet: axes (phi, z).
  Cylindrical,
  /// Disc: axes (r, phi).
  Polar,
}

/// 2D grid of surface indices.
#[derive(Clone, Debug)]
pub struct SurfaceGrid {
  frame: GridFrame,
  axes: MultiAxes<2>,
  bins: Vec<SmallVec<[u32; BIN_CAPACITY]>>,
}

impl SurfaceGrid {
  /// Create an empty grid over the given axes.
  pub fn new(frame: GridFrame, axes: MultiAxes<2>) -> Self {
    let bins = vec![SmallVec::new(); axes.nbins()];
    Self { frame, axes, bins }
  }

  #[inline]
  pub fn frame(&self) -> GridFrame {
    self.frame
  }

  #[inline]
  pub fn axes(&self) -> &MultiAxes<2> {
    &self.axes
  }

  /// Total number of bins.
  pub fn nbins(&self) -> usize {
    self.bins.len()
  }

  /// Serialize a local multi-index into the global bin index (row-major).
  #[inline]
  pub fn serialize(&self, loc: [usize; 2]) -> usize {
    loc[0] * self.axes.axis(1).nbins() + loc[1]
  }

  /// Local multi-index of a global bin index.
  #[inline]
  pub fn deserialize(&self, gbin: usize) -> [usize; 2] {
    let n1 = self.axes.axis(1).nbins();
    [gbin / n1, gbin % n1]
  }

  /// Content of the bin at a local multi-index.
  pub fn bin(&self, loc: [usize; 2]) -> &[u32] {
    &self.bins[self.serialize(loc)]
  }

  /// Single entry of a bin, addressed by global bin index.
  pub fn at(&self, gbin: usize, entry: usize) -> u32 {
    self.bins[gbin][entry]
  }

  /// Store a surface index in the bin containing a local point.
  pub fn populate(&mut self, point: [Scalar; 2], surface: u32) {
    let loc = self.axes.bins(point);
    self.populate_bin(loc, surface);
  }

  /// Store a surface index in the bin at a local multi-index.
  pub fn populate_bin(&mut self, loc: [usize; 2], surface: u32) {
    let gbin = self.serialize(loc);
    self.bins[gbin].push(surface);
  }

  /// Project a global position into the grid's local frame.
  ///
  /// `trf` is the placement transform of the owning volume; the direction
  /// is part of the projection contract but unused by the flat frames.
  pub fn project(&self, trf: &Transform3, pos: Point3, _dir: Vector3) -> [Scalar; 2] {
    let local = trf.inverse().transform_point3(pos);
    match self.frame {
      GridFrame::Cylindrical => [local.y.atan2(local.x), local.z],
      GridFrame::Polar => [local.truncate().length(), local.y.atan2(local.x)],
    }
  }

  /// Surface indices in the bin containing a local point.
  pub fn search_point(&self, point: [Scalar; 2]) -> impl Iterator<Item = u32> + '_ {
    self.bin(self.axes.bins(point)).iter().copied()
  }

  /// Surface indices of all bins in a search window around a local point.
  ///
  /// `window` holds the per-axis half-sizes; `[0, 0]` visits only the bin
  /// containing the point.
  pub fn search(&self, point: [Scalar; 2], window: [usize; 2]) -> impl Iterator<Item = u32> + '_ {
    let ranges = self.axes.bin_ranges(point, window);
    BinView::new(&self.axes, ranges)
      .flat_map(move |loc| self.bins[self.serialize(loc)].iter().copied())
  }

  /// Flat iterator over every stored surface index.
  pub fn all(&self) -> impl Iterator<Item = u32> + '_ {
    self.bins.iter().flat_map(|bin| bin.iter().copied())
  }
}

#[cfg(test)]
#[path = "surface_grid_test.rs"]
mod surface_grid_test;
