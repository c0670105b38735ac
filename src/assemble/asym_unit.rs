//! Rescales centroid coordinates between the reduced [0,1]³ asymmetric-unit
//! box and its true fractional extent inside the full unit cell.
//!
//! Both directions are per-structure affine maps driven by the space
//! group's bounding box. No clamping happens here: inputs are already
//! bounded upstream, and an out-of-range value means an upstream bug,
//! which the debug assertions surface instead of hiding.

use crate::symmetry::SpaceGroupInfo;
use nalgebra::Vector3;

/// Unit-cell fractional coordinate → reduced [0,1]³ asymmetric-unit
/// coordinate: `(frac - lo) / (hi - lo)`.
pub fn scale_to_unit_box(frac: Vector3<f64>, sg: &SpaceGroupInfo) -> Vector3<f64> {
    let scaled = (frac - sg.asym_unit_lo).component_div(&(sg.asym_unit_hi - sg.asym_unit_lo));
    debug_assert!(
        scaled.iter().all(|v| (-1e-9..=1.0 + 1e-9).contains(v)),
        "fractional centroid {frac:?} lies outside the asymmetric unit"
    );
    scaled
}

/// Reduced [0,1]³ coordinate → unit-cell fractional coordinate:
/// `reduced * (hi - lo) + lo`.
pub fn descale_from_unit_box(reduced: Vector3<f64>, sg: &SpaceGroupInfo) -> Vector3<f64> {
    debug_assert!(
        reduced.iter().all(|v| (-1e-9..=1.0 + 1e-9).contains(v)),
        "reduced centroid {reduced:?} lies outside [0,1]³"
    );
    reduced.component_mul(&(sg.asym_unit_hi - sg.asym_unit_lo)) + sg.asym_unit_lo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symmetry::fixtures;
    use approx::assert_relative_eq;

    #[test]
    fn p1_box_is_identity() {
        let sg = fixtures::p1();
        let v = Vector3::new(0.2, 0.5, 0.9);
        assert_relative_eq!(scale_to_unit_box(v, &sg), v);
        assert_relative_eq!(descale_from_unit_box(v, &sg), v);
    }

    #[test]
    fn p21c_box_round_trip() {
        let sg = fixtures::p21_c();
        let reduced = Vector3::new(0.4, 0.8, 0.1);
        let frac = descale_from_unit_box(reduced, &sg);
        // y is squeezed into [0, 1/4].
        assert_relative_eq!(frac[1], 0.2, epsilon = 1e-12);
        assert_relative_eq!(scale_to_unit_box(frac, &sg), reduced, epsilon = 1e-12);
    }

    #[test]
    fn corners_map_to_corners() {
        let sg = fixtures::p212121();
        let lo = descale_from_unit_box(Vector3::zeros(), &sg);
        let hi = descale_from_unit_box(Vector3::new(1.0, 1.0, 1.0), &sg);
        assert_relative_eq!(lo, sg.asym_unit_lo);
        assert_relative_eq!(hi, sg.asym_unit_hi);
    }
}
