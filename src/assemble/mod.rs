//! The decode-and-assemble pipeline.
//!
//! A raw learned parameter vector flows through four pure stages —
//! standardization codec, bound enforcement, crystal-system projection,
//! asymmetric-unit rescaling — to become a [`CellParameters`], which the
//! symmetry expander then turns into a [`Supercell`]. Each stage is also
//! exported on its own for callers that need only part of the pipeline.

pub mod asym_unit;
pub mod bounds;
pub mod codec;
mod expand;
pub mod lattice;

pub use bounds::BoundMode;
pub use codec::{OrientationBlock, RawCellVector};

use crate::error::Error;
use crate::model::{CellParameters, MoleculeGeometry, Supercell};
use crate::symmetry::{SpaceGroupInfo, SpaceGroupRegistry};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Configuration for decoding raw parameter vectors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Bound-enforcement mode for angles and centroid.
    pub mode: BoundMode,
    /// Dataset means for the 12 decoded components, if the input is
    /// standardized.
    pub mean: Option<Vec<f64>>,
    /// Dataset standard deviations, paired with `mean`.
    pub std: Option<Vec<f64>>,
}

/// Decodes one raw parameter vector into physically valid cell parameters.
///
/// Applies, in order: destandardization (when statistics are configured),
/// block splitting, bound enforcement, orientation decoding, crystal-system
/// projection for the group's lattice system, and descaling of the
/// centroid from the reduced asymmetric-unit box into unit-cell fractional
/// coordinates.
pub fn decode_parameters(
    raw: &[f64],
    sg: &SpaceGroupInfo,
    config: &DecodeConfig,
) -> Result<CellParameters, Error> {
    let destd;
    let values: &[f64] = match (&config.mean, &config.std) {
        (Some(mean), Some(std)) => {
            destd = codec::destandardize(raw, mean, std)?;
            &destd
        }
        _ => raw,
    };
    let blocks = codec::split(values)?;

    let lengths = Vector3::from_iterator(
        blocks
            .lengths
            .iter()
            .map(|&x| bounds::softplus_floor(x, bounds::LENGTH_FLOOR)),
    );
    let angles = Vector3::from_iterator(blocks.angles.iter().map(|&x| {
        bounds::enforce_1d_bound(x, bounds::ANGLE_SPAN, bounds::ANGLE_CENTER, config.mode)
    }));
    let reduced = Vector3::from_iterator(blocks.centroid.iter().map(|&x| {
        bounds::enforce_1d_bound(
            x,
            bounds::CENTROID_SPAN,
            bounds::CENTROID_CENTER,
            config.mode,
        )
    }));

    let orientation = match blocks.orientation {
        OrientationBlock::Angles(a) => Vector3::new(a[0], a[1], a[2]),
        OrientationBlock::Encoded(e) => bounds::decode_to_sph_rotvec(&e)?,
    };

    let (lengths, angles) = lattice::enforce_crystal_system(lengths, angles, sg.lattice_system);
    let centroid = asym_unit::descale_from_unit_box(reduced, sg);

    let params = CellParameters::new(lengths, angles, centroid, orientation);
    if params
        .lengths
        .iter()
        .chain(params.angles.iter())
        .chain(params.centroid.iter())
        .chain(params.orientation.iter())
        .any(|v| !v.is_finite())
    {
        return Err(Error::NumericOverflow {
            context: "parameter decode",
        });
    }
    Ok(params)
}

/// Builds the periodic supercell for one structure.
///
/// Looks the space group up in the registry, applies its operators to the
/// asymmetric-unit molecule, and tiles out to the interaction cutoff.
pub fn build_supercell(
    params: &CellParameters,
    sg_index: usize,
    registry: &SpaceGroupRegistry,
    molecule: &MoleculeGeometry,
    cutoff: f64,
) -> Result<Supercell, Error> {
    let sg = registry.get(sg_index)?;
    expand::build_supercell(params, sg, sg_index, molecule, cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;
    use crate::symmetry::fixtures;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn decode_bounds_every_block() {
        let sg = fixtures::p1();
        let raw = vec![3.0, -8.0, 0.5, 4.0, -4.0, 0.0, 9.0, -9.0, 0.2, 0.3, -1.2, 2.5];
        let params = decode_parameters(&raw, &sg, &DecodeConfig::default()).unwrap();

        for l in params.lengths.iter() {
            assert!(*l > 0.0);
        }
        for a in params.angles.iter() {
            assert!(*a > FRAC_PI_2 - bounds::ANGLE_SPAN && *a < FRAC_PI_2 + bounds::ANGLE_SPAN);
        }
        for c in params.centroid.iter() {
            assert!(*c >= 0.0 && *c <= 1.0);
        }
        // Decoded-orientation vectors pass through unchanged.
        assert_relative_eq!(params.orientation, Vector3::new(0.3, -1.2, 2.5));
    }

    #[test]
    fn decode_enforces_lattice_system() {
        let sg = fixtures::p212121(); // orthorhombic
        let raw = vec![1.0, 2.0, 3.0, 1.2, 1.9, 1.4, 0.0, 0.0, 0.0, 0.1, 0.1, 0.1];
        let params = decode_parameters(&raw, &sg, &DecodeConfig::default()).unwrap();
        assert_relative_eq!(
            params.angles,
            Vector3::new(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2)
        );
    }

    #[test]
    fn decode_descales_centroid_into_asym_unit() {
        let sg = fixtures::p21_c(); // y extent [0, 1/4]
        let mut raw = vec![0.0; 12];
        raw[7] = 100.0; // hard-bounds to reduced y = 1.0
        let config = DecodeConfig {
            mode: BoundMode::Hard,
            ..DecodeConfig::default()
        };
        let params = decode_parameters(&raw, &sg, &config).unwrap();
        assert_relative_eq!(params.centroid[1], 0.25, epsilon = 1e-12);
    }

    #[test]
    fn decode_handles_encoded_orientation_width() {
        let sg = fixtures::p1();
        let mut raw = vec![0.0; 15];
        raw[9..15].copy_from_slice(&[0.5, 0.5, 1.0, 0.0, -1.0, 0.0]);
        let params = decode_parameters(&raw, &sg, &DecodeConfig::default()).unwrap();
        // Magnitude atan2(0, -1) + π = 2π.
        assert_relative_eq!(params.orientation[2], 2.0 * std::f64::consts::PI);
    }

    #[test]
    fn decode_rejects_bad_width() {
        let sg = fixtures::p1();
        assert!(matches!(
            decode_parameters(&[0.0; 10], &sg, &DecodeConfig::default()),
            Err(Error::Shape { got: 10, .. })
        ));
    }

    #[test]
    fn build_supercell_rejects_unknown_group() {
        let registry = fixtures::registry();
        let mol = MoleculeGeometry::new(vec![Vector3::zeros()], vec![Element::C]);
        let params = CellParameters::new(
            Vector3::new(10.0, 10.0, 10.0),
            Vector3::new(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2),
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 0.0, 0.01),
        );
        assert!(matches!(
            build_supercell(&params, 99, &registry, &mol, 5.0),
            Err(Error::UnknownSpaceGroup(99))
        ));
        assert!(build_supercell(&params, 1, &registry, &mol, 5.0).is_ok());
    }
}
