//! Grid axes: regular or irregular binning combined with open or circular
//! bounds behavior.
//!
//! An axis maps a coordinate to a local bin index. Open axes clamp
//! out-of-range lookups to the edge bins, circular axes wrap modulo the
//! bin count (azimuthal angle). Range lookups around a point keep the raw,
//! unwrapped indices so the bin view can apply circular wrapping per axis
//! at iteration time.

use std::ops::Range;

use crate::types::Scalar;

/// Out-of-range behavior of an axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisBounds {
  /// Clamp lookups to `[0, nbins - 1]`.
  Open,
  /// Wrap lookups modulo `nbins` (periodic coordinate).
  Circular,
}

/// Bin edge layout of an axis.
#[derive(Clone, Debug)]
pub enum AxisBinning {
  /// Equidistant bins over `[min, max)`.
  Regular {
    n_bins: usize,
    min: Scalar,
    max: Scalar,
  },
  /// Explicit, sorted bin edges (`edges.len() - 1` bins).
  Irregular { edges: Vec<Scalar> },
}

/// A single grid axis.
#[derive(Clone, Debug)]
pub struct Axis {
  binning: AxisBinning,
  bounds: AxisBounds,
}

impl Axis {
  /// Equidistant axis over `[min, max)`.
  pub fn regular(n_bins: usize, min: Scalar, max: Scalar, bounds: AxisBounds) -> Self {
    debug_assert!(n_bins > 0 && max > min);
    Self {
      binning: AxisBinning::Regular { n_bins, min, max },
      bounds,
    }
  }

  /// Axis with explicit bin edges (must be sorted ascending).
  pub fn irregular(edges: Vec<Scalar>, bounds: AxisBounds) -> Self {
    debug_assert!(edges.len() >= 2);
    debug_assert!(edges.windows(2).all(|w| w[0] < w[1]));
    Self {
      binning: AxisBinning::Irregular { edges },
      bounds,
    }
  }

  #[inline]
  pub fn bounds(&self) -> AxisBounds {
    self.bounds
  }

  /// Number of bins on this axis.
  pub fn nbins(&self) -> usize {
    match &self.binning {
      AxisBinning::Regular { n_bins, .. } => *n_bins,
      AxisBinning::Irregular { edges } => edges.len() - 1,
    }
  }

  /// Lower edge of the axis range.
  pub fn min(&self) -> Scalar {
    match &self.binning {
      AxisBinning::Regular { min, .. } => *min,
      AxisBinning::Irregular { edges } => edges[0],
    }
  }

  /// Upper edge of the axis range.
  pub fn max(&self) -> Scalar {
    match &self.binning {
      AxisBinning::Regular { max, .. } => *max,
      AxisBinning::Irregular { edges } => edges[edges.len() - 1],
    }
  }

  /// Raw (unclamped, unwrapped) bin index of a coordinate.
  fn raw_bin(&self, v: Scalar) -> i64 {
    match &self.binning {
      AxisBinning::Regular { n_bins, min, max } => {
        let step = (max - min) / *n_bins as Scalar;
        ((v - min) / step).floor() as i64
      }
      AxisBinning::Irregular { edges } => edges.partition_point(|e| *e <= v) as i64 - 1,
    }
  }

  /// Map a raw index into the valid bin range according to the bounds.
  #[inline]
  pub fn wrap(&self, index: i64) -> usize {
    let n = self.nbins() as i64;
    match self.bounds {
      AxisBounds::Open => index.clamp(0, n - 1) as usize,
      AxisBounds::Circular => index.rem_euclid(n) as usize,
    }
  }

  /// Bin index of a coordinate.
  #[inline]
  pub fn bin(&self, v: Scalar) -> usize {
    self.wrap(self.raw_bin(v))
  }

  /// Raw index range of a symmetric search window around a coordinate.
  ///
  /// Open axes clamp the range to the axis; circular axes keep the raw
  /// indices so the caller can wrap each one individually.
  pub fn bin_range(&self, v: Scalar, half_window: usize) -> Range<i64> {
    let raw = self.raw_bin(v);
    let half = half_window as i64;
    match self.bounds {
      AxisBounds::Open => {
        let n = self.nbins() as i64;
        // Out-of-range lookups behave like `bin`: the window sits on the
        // edge bin
        let raw = raw.clamp(0, n - 1);
        (raw - half).clamp(0, n)..(raw + half + 1).clamp(0, n)
      }
      AxisBounds::Circular => raw - half..raw + half + 1,
    }
  }
}

/// Fixed set of `D` axes spanning a grid's local frame.
#[derive(Clone, Debug)]
pub struct MultiAxes<const D: usize> {
  axes: [Axis; D],
}

impl<const D: usize> MultiAxes<D> {
  pub fn new(axes: [Axis; D]) -> Self {
    Self { axes }
  }

  #[inline]
  pub fn axis(&self, i: usize) -> &Axis {
    &self.axes[i]
  }

  /// Total number of bins over all axes.
  pub fn nbins(&self) -> usize {
    self.axes.iter().map(Axis::nbins).product()
  }

  /// Local multi-index of a point.
  pub fn bins(&self, point: [Scalar; D]) -> [usize; D] {
    std::array::from_fn(|i| self.axes[i].bin(point[i]))
  }

  /// Per-axis raw index ranges of a search window around a point.
  pub fn bin_ranges(&self, point: [Scalar; D], window: [usize; D]) -> [Range<i64>; D] {
    std::array::from_fn(|i| self.axes[i].bin_range(point[i], window[i]))
  }
}

#[cfg(test)]
#[path = "axis_test.rs"]
mod axis_test;
