use super::element::{Element, UnknownAtomicNumberError};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// One canonical conformer of a molecule, in its local frame.
///
/// Owned by the caller and read-only to this crate. The canonical atom
/// ordering (used by the atomwise RDF to match atoms across repeated
/// structures of the same molecule) is computed on first use and cached
/// for the lifetime of the value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoleculeGeometry {
    positions: Vec<Vector3<f64>>,
    elements: Vec<Element>,
    #[serde(skip)]
    canonical_order: OnceLock<Vec<usize>>,
}

impl MoleculeGeometry {
    /// # Panics
    ///
    /// Panics if `positions` and `elements` differ in length or are empty.
    pub fn new(positions: Vec<Vector3<f64>>, elements: Vec<Element>) -> Self {
        assert_eq!(
            positions.len(),
            elements.len(),
            "one element per atom position required"
        );
        assert!(!positions.is_empty(), "molecule must contain at least one atom");
        Self {
            positions,
            elements,
            canonical_order: OnceLock::new(),
        }
    }

    /// Builds a molecule from raw coordinate triples and atomic-number
    /// type codes, the form external featurizers hand over.
    pub fn from_raw(
        positions: &[[f64; 3]],
        types: &[i32],
    ) -> Result<Self, UnknownAtomicNumberError> {
        let elements = types
            .iter()
            .map(|&z| Element::from_atomic_number(z))
            .collect::<Result<Vec<_>, _>>()?;
        let positions = positions
            .iter()
            .map(|p| Vector3::new(p[0], p[1], p[2]))
            .collect();
        Ok(Self::new(positions, elements))
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn positions(&self) -> &[Vector3<f64>] {
        &self.positions
    }

    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Geometric centroid in the local frame.
    pub fn centroid(&self) -> Vector3<f64> {
        self.positions.iter().sum::<Vector3<f64>>() / self.positions.len() as f64
    }

    /// Largest atom distance from the centroid, in Å.
    pub fn radius(&self) -> f64 {
        let c = self.centroid();
        self.positions
            .iter()
            .map(|p| (p - c).norm())
            .fold(0.0, f64::max)
    }

    /// Occupied molecular volume as the sum of van der Waals sphere
    /// volumes, in Å³. Ignores sphere overlap; the packing coefficient
    /// inherits that convention.
    pub fn vdw_volume(&self) -> f64 {
        self.elements.iter().map(|e| e.vdw_volume()).sum()
    }

    /// Canonical atom ordering: indices sorted by distance from the
    /// centroid, ties broken by original index.
    ///
    /// Computed once per molecule and cached, so the same physical atom
    /// occupies the same ordinal position across repeated structures.
    pub fn canonical_order(&self) -> &[usize] {
        self.canonical_order.get_or_init(|| {
            let c = self.centroid();
            let mut order: Vec<usize> = (0..self.positions.len()).collect();
            order.sort_by(|&i, &j| {
                let di = (self.positions[i] - c).norm();
                let dj = (self.positions[j] - c).norm();
                di.partial_cmp(&dj)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(i.cmp(&j))
            });
            order
        })
    }
}
