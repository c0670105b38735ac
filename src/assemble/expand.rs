//! Expands one asymmetric-unit molecule into a finite periodic supercell.
//!
//! Every space-group operator is applied to the placed molecule to fill
//! one unit cell, then the cell is tiled by integer lattice translations
//! far enough out that every atom within the interaction cutoff of the
//! canonical molecule is present. Images are wrapped at the molecule
//! level: the whole copy is shifted so its centroid lands in [0,1)³,
//! which keeps rigid bodies intact across the fractional boundary.

use crate::error::Error;
use crate::model::{AtomOrigin, CellParameters, MoleculeGeometry, Supercell};
use crate::symmetry::SpaceGroupInfo;
use nalgebra::Vector3;

/// Builds the supercell for one structure.
///
/// `params.centroid` must already be a unit-cell fractional coordinate
/// (descaled from the asymmetric-unit box); the decode pipeline
/// guarantees this. `sg_index` is only used to label errors.
pub fn build_supercell(
    params: &CellParameters,
    sg: &SpaceGroupInfo,
    sg_index: usize,
    molecule: &MoleculeGeometry,
    cutoff: f64,
) -> Result<Supercell, Error> {
    sg.validate(sg_index)?;
    let cell = params.cell_matrix()?;
    let z = sg.operators.len();
    let n_atoms = molecule.atom_count();

    // Canonical molecule in unit-cell fractional coordinates: center the
    // local frame, rotate about the centroid, convert, translate.
    let rotation = params.rotation();
    let local_centroid = molecule.centroid();
    let frac_atoms: Vec<Vector3<f64>> = molecule
        .positions()
        .iter()
        .map(|p| cell.cart_to_frac(rotation * (p - local_centroid)) + params.centroid)
        .collect();

    // One molecule per operator; images shifted so their centroid wraps
    // into [0,1)³.
    let mut cell_frac: Vec<Vec<Vector3<f64>>> = Vec::with_capacity(z);
    for op in &sg.operators {
        let image_centroid = op.apply(params.centroid);
        let shift = image_centroid.map(|v| v - v.floor()) - image_centroid;
        cell_frac.push(frac_atoms.iter().map(|f| op.apply(*f) + shift).collect());
    }

    // Lattice translations whose cells can reach the cutoff sphere around
    // the canonical centroid. Both molecules protrude: an in-range
    // canonical atom lies up to cutoff + radius from the centroid, and an
    // image atom up to radius beyond its cell's bounding sphere (half body
    // diagonal), so a cell is kept iff its center is within
    // cutoff + 2·radius + bound.
    let widths = cell.perpendicular_widths();
    let bound = cell.bounding_radius();
    let reach = cutoff + 2.0 * molecule.radius();
    let k: Vec<i64> = (0..3)
        .map(|i| ((reach + 2.0 * bound) / widths[i]).ceil() as i64)
        .collect();

    let canonical_cart = cell.frac_to_cart(params.centroid);
    let half = Vector3::new(0.5, 0.5, 0.5);
    let mut translations: Vec<Vector3<f64>> = vec![Vector3::zeros()];
    for na in -k[0]..=k[0] {
        for nb in -k[1]..=k[1] {
            for nc in -k[2]..=k[2] {
                if (na, nb, nc) == (0, 0, 0) {
                    continue;
                }
                let n = Vector3::new(na as f64, nb as f64, nc as f64);
                let cell_center = cell.frac_to_cart(n + half);
                if (cell_center - canonical_cart).norm() <= reach + bound {
                    translations.push(n);
                }
            }
        }
    }

    let n_cells = translations.len();
    let total = n_cells * z * n_atoms;
    let mut positions = Vec::with_capacity(total);
    let mut elements = Vec::with_capacity(total);
    let mut origins = Vec::with_capacity(total);
    let mut molecule_ids = Vec::with_capacity(total);

    for (cell_rank, n) in translations.iter().enumerate() {
        for (op_idx, mol_frac) in cell_frac.iter().enumerate() {
            let copy = cell_rank * z + op_idx;
            let origin = if cell_rank == 0 && op_idx == 0 {
                AtomOrigin::Canonical
            } else {
                AtomOrigin::Image
            };
            for f in mol_frac {
                positions.push(cell.frac_to_cart(f + n));
                origins.push(origin);
                molecule_ids.push(copy);
            }
            elements.extend_from_slice(molecule.elements());
        }
    }

    Ok(Supercell {
        positions,
        elements,
        origins,
        molecule_ids,
        atoms_per_molecule: n_atoms,
        z,
        n_cells,
        volume: cell.volume,
        mol_volume: molecule.vdw_volume(),
        canonical_order: molecule.canonical_order().to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CellParameters, Element, MoleculeGeometry};
    use crate::symmetry::fixtures;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn point_molecule() -> MoleculeGeometry {
        MoleculeGeometry::new(vec![Vector3::zeros()], vec![Element::C])
    }

    fn cubic_params(a: f64) -> CellParameters {
        CellParameters::new(
            Vector3::new(a, a, a),
            Vector3::new(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2),
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 0.0, 0.01),
        )
    }

    #[test]
    fn p1_point_molecule_face_adjacent_supercell() {
        let sg = fixtures::p1();
        let cell = build_supercell(&cubic_params(10.0), &sg, 1, &point_molecule(), 5.0).unwrap();

        assert_relative_eq!(cell.volume, 1000.0, max_relative = 1e-12);
        assert_eq!(cell.z, 1);
        // Canonical atom plus the six face-adjacent translated copies.
        assert_eq!(cell.n_cells, 7);
        assert_eq!(cell.atom_count(), 7);
        assert_eq!(cell.canonical_indices(), vec![0]);
        assert_relative_eq!(cell.positions[0], Vector3::new(5.0, 5.0, 5.0), epsilon = 1e-9);
        // Every image sits exactly one lattice vector away.
        for p in &cell.positions[1..] {
            assert_relative_eq!((p - cell.positions[0]).norm(), 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn multiplicity_invariant_per_space_group() {
        let mol = MoleculeGeometry::new(
            vec![
                Vector3::new(0.0, 0.0, 0.0),
                Vector3::new(1.1, 0.0, 0.0),
                Vector3::new(0.0, 1.1, 0.0),
            ],
            vec![Element::O, Element::C, Element::N],
        );
        for (idx, sg) in [
            (1, fixtures::p1()),
            (2, fixtures::p_1bar()),
            (14, fixtures::p21_c()),
            (19, fixtures::p212121()),
        ] {
            let mut params = cubic_params(12.0);
            params.centroid = Vector3::new(0.1, 0.12, 0.2);
            let cell = build_supercell(&params, &sg, idx, &mol, 6.0).unwrap();

            let canonical = cell.canonical_indices().len();
            let unit_cell_atoms: usize = cell
                .molecule_ids
                .iter()
                .filter(|&&m| m < cell.z)
                .count();
            assert_eq!(canonical * sg.multiplicity(), unit_cell_atoms);
            assert_eq!(cell.multiplicity(), cell.z * cell.n_cells);
            assert_eq!(cell.atom_count(), cell.multiplicity() * mol.atom_count());
        }
    }

    #[test]
    fn inversion_image_is_wrapped_into_cell() {
        let sg = fixtures::p_1bar();
        let mut params = cubic_params(10.0);
        params.centroid = Vector3::new(0.25, 0.25, 0.25);
        let cell = build_supercell(&params, &sg, 2, &point_molecule(), 1.0).unwrap();

        // Image centroid -0.25 wraps to 0.75 in every axis.
        let image = cell
            .positions
            .iter()
            .zip(&cell.molecule_ids)
            .find(|(_, &m)| m == 1)
            .map(|(p, _)| *p)
            .unwrap();
        assert_relative_eq!(image, Vector3::new(7.5, 7.5, 7.5), epsilon = 1e-9);
    }

    #[test]
    fn tiling_keeps_in_range_images_of_protruding_molecules() {
        // A wide molecule near the cell corner: its image atoms reach into
        // cells whose centers sit farther out than cutoff + radius, so the
        // tight build must still contain every atom pair within the cutoff.
        let mol = MoleculeGeometry::new(
            vec![Vector3::new(-3.0, 0.0, 0.0), Vector3::new(3.0, 0.0, 0.0)],
            vec![Element::C, Element::C],
        );
        let mut params = cubic_params(10.0);
        params.centroid = Vector3::new(0.99, 0.99, 0.99);
        let sg = fixtures::p_1bar();

        let pairs_within = |cell: &Supercell, cutoff: f64| -> usize {
            let mut n = 0;
            for &c in &cell.canonical_indices() {
                for (i, p) in cell.positions.iter().enumerate() {
                    if cell.origins[i] == AtomOrigin::Image
                        && (p - cell.positions[c]).norm() <= cutoff
                    {
                        n += 1;
                    }
                }
            }
            n
        };

        let tight = build_supercell(&params, &sg, 2, &mol, 5.0).unwrap();
        let generous = build_supercell(&params, &sg, 2, &mol, 30.0).unwrap();
        assert_eq!(pairs_within(&tight, 5.0), pairs_within(&generous, 5.0));
    }

    #[test]
    fn empty_operator_list_is_fatal() {
        let mut sg = fixtures::p1();
        sg.operators.clear();
        let res = build_supercell(&cubic_params(10.0), &sg, 1, &point_molecule(), 5.0);
        assert!(matches!(
            res,
            Err(Error::EmptySymmetryGroup { space_group: 1 })
        ));
    }

    #[test]
    fn degenerate_cell_is_reported() {
        let mut params = cubic_params(10.0);
        params.angles = Vector3::new(0.3, 0.3, 2.9);
        let res = build_supercell(&params, &fixtures::p1(), 1, &point_molecule(), 5.0);
        assert!(matches!(res, Err(Error::DegenerateCell { .. })));
    }

    #[test]
    fn rotation_is_applied_about_the_centroid() {
        // Two-atom molecule along x, rotated π/2 about z: ends up along y.
        let mol = MoleculeGeometry::new(
            vec![Vector3::new(-1.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)],
            vec![Element::C, Element::C],
        );
        let mut params = cubic_params(20.0);
        params.orientation = Vector3::new(0.0, 0.0, FRAC_PI_2);
        let cell = build_supercell(&params, &fixtures::p1(), 1, &mol, 1.0).unwrap();

        let center = Vector3::new(10.0, 10.0, 10.0);
        assert_relative_eq!(cell.positions[0], center + Vector3::new(0.0, -1.0, 0.0), epsilon = 1e-9);
        assert_relative_eq!(cell.positions[1], center + Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-9);
    }
}
