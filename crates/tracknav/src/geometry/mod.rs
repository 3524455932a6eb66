//! Detector geometry: barcodes, masks, surface/volume descriptors and the
//! immutable detector store.

pub mod barcode;
pub mod detector;
pub mod masks;
pub mod surface;
pub mod volume;

// Re-exports
pub use barcode::{Barcode, SurfaceKind};
pub use detector::{BuildError, Detector, DetectorBuilder};
pub use masks::{Mask, MaskShape};
pub use surface::SurfaceDesc;
pub use volume::{AccelKind, AccelLink, VolumeDesc};
