//! Natural unit system for tracking: lengths in millimeters, momenta in GeV,
//! charges in elementary charges.
//!
//! In this system the bending radius of a track comes out directly in
//! millimeters: `R = pT / (|q| * B)` with `pT` in GeV, `q` in units of `e`
//! and `B` expressed through [`T`].

/// Millimeter (base length unit).
pub const MM: f64 = 1.0;

/// Micrometer.
pub const UM: f64 = 1e-3 * MM;

/// Centimeter.
pub const CM: f64 = 10.0 * MM;

/// Meter.
pub const M: f64 = 1000.0 * MM;

/// GeV (base momentum/energy unit).
pub const GEV: f64 = 1.0;

/// Tesla, expressed in GeV/(mm * e).
///
/// A 1 GeV track in a 1 T field curls with R = 1/T mm ~ 3.3356 m.
pub const T: f64 = 0.000299792458;

/// Elementary charge (base charge unit).
pub const E: f64 = 1.0;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bending_radius_scale() {
    // 1 GeV transverse momentum in 1 T: R = p / (q B) ~ 3.34 m
    let r = 1.0 * GEV / (E * T);
    assert!((r - 3335.64).abs() / 3335.64 < 1e-4);
  }

  #[test]
  fn length_ratios() {
    assert_eq!(M, 100.0 * CM);
    assert_eq!(MM, 1000.0 * UM);
  }
}
