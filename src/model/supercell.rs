use super::element::Element;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Whether an atom belongs to the reference asymmetric-unit copy or to a
/// symmetry/translation image of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AtomOrigin {
    Canonical,
    Image,
}

/// A finite periodic environment around one asymmetric-unit molecule.
///
/// Built fresh per scoring call and never mutated; rebuild it whenever
/// the parameters change. Atoms are stored molecule-contiguously: copy
/// `m` occupies indices `m * atoms_per_molecule ..` and atom `k` of every
/// copy maps to local atom `k` of the source molecule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supercell {
    /// Cartesian atom positions, Å.
    pub positions: Vec<Vector3<f64>>,
    /// Element of each atom.
    pub elements: Vec<Element>,
    /// Canonical/image tag per atom.
    pub origins: Vec<AtomOrigin>,
    /// Index of the molecule copy each atom belongs to.
    pub molecule_ids: Vec<usize>,
    /// Atoms in one molecule copy.
    pub atoms_per_molecule: usize,
    /// Symmetry multiplicity: molecule copies per unit cell.
    pub z: usize,
    /// Lattice translations realized in this supercell (the origin cell
    /// included).
    pub n_cells: usize,
    /// Unit-cell volume, Å³.
    pub volume: f64,
    /// Occupied van der Waals volume of one molecule, Å³.
    pub mol_volume: f64,
    /// Canonical atom ordering of the source molecule (distance from
    /// centroid, index tie-break), carried over for atomwise matching.
    pub canonical_order: Vec<usize>,
}

impl Supercell {
    #[inline]
    pub fn atom_count(&self) -> usize {
        self.positions.len()
    }

    /// Total molecule copies realized: operators × lattice translations.
    #[inline]
    pub fn multiplicity(&self) -> usize {
        self.z * self.n_cells
    }

    /// Indices of the canonical (reference asymmetric unit) atoms.
    pub fn canonical_indices(&self) -> Vec<usize> {
        self.origins
            .iter()
            .enumerate()
            .filter(|(_, o)| **o == AtomOrigin::Canonical)
            .map(|(i, _)| i)
            .collect()
    }

    /// Local atom index (within its molecule copy) of a supercell atom.
    #[inline]
    pub fn local_atom_index(&self, atom: usize) -> usize {
        atom % self.atoms_per_molecule
    }
}
