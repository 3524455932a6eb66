//! Bin view - lazy iteration over the bins of a search window.
//!
//! The view walks the Cartesian product of the per-axis index ranges in
//! lexicographic order (first axis slowest), wrapping circular axes at
//! dereference time. The order is deterministic so that downstream test
//! expectations are stable.

use std::ops::Range;

use super::axis::MultiAxes;

/// Iterator over the local bin indices of a search window.
pub struct BinView<'a, const D: usize> {
  axes: &'a MultiAxes<D>,
  ranges: [Range<i64>; D],
  cursor: [i64; D],
  exhausted: bool,
}

impl<'a, const D: usize> BinView<'a, D> {
  /// Build a view from the raw per-axis ranges of
  /// [`MultiAxes::bin_ranges`].
  pub fn new(axes: &'a MultiAxes<D>, ranges: [Range<i64>; D]) -> Self {
    let exhausted = ranges.iter().any(|r| r.is_empty());
    let cursor = std::array::from_fn(|i| ranges[i].start);
    Self {
      axes,
      ranges,
      cursor,
      exhausted,
    }
  }

  /// Number of bins in the window.
  pub fn len(&self) -> usize {
    self.ranges.iter().map(|r| r.clone().count()).product()
  }

  pub fn is_empty(&self) -> bool {
    self.ranges.iter().any(|r| r.is_empty())
  }
}

impl<const D: usize> Iterator for BinView<'_, D> {
  type Item = [usize; D];

  fn next(&mut self) -> Option<Self::Item> {
    if self.exhausted {
      return None;
    }

    // Wrap the current raw cursor into valid local indices per axis
    let out = std::array::from_fn(|i| self.axes.axis(i).wrap(self.cursor[i]));

    // Odometer increment, last axis fastest
    let mut axis = D;
    loop {
      if axis == 0 {
        self.exhausted = true;
        break;
      }
      axis -= 1;
      self.cursor[axis] += 1;
      if self.cursor[axis] < self.ranges[axis].end {
        break;
      }
      self.cursor[axis] = self.ranges[axis].start;
    }

    Some(out)
  }
}

#[cfg(test)]
#[path = "bin_view_test.rs"]
mod bin_view_test;
