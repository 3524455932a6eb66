//! N-dimensional binned grids used as per-volume surface finders.
//!
//! - [`axis`]: regular/irregular axes with open or circular bounds
//! - [`bin_view`]: lazy Cartesian-product iteration over a search window
//! - [`surface_grid`]: the 2D surface index consumed by the navigator

pub mod axis;
pub mod bin_view;
pub mod surface_grid;

// Re-exports
pub use axis::{Axis, AxisBinning, AxisBounds, MultiAxes};
pub use bin_view::BinView;
pub use surface_grid::{GridFrame, SurfaceGrid};
