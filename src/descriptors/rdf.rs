//! Radial distribution functions over the intermolecular edge set.
//!
//! Histograms keep raw integer bin counts next to a density view
//! (counts divided by the structure's total edge count). Raw counts sum
//! exactly to the number of binned edges; densities stay comparable
//! across structures with different edge totals.

use super::graph::Edge;
use crate::model::{Element, Supercell};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which RDF variant to compute.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RdfMode {
    /// One histogram per structure.
    #[default]
    Global,
    /// One histogram per unordered pair drawn from a fixed element set.
    Elementwise(Vec<Element>),
    /// One histogram per unordered pair of canonical atom ordinals
    /// (positions in the molecule's canonical ordering).
    Atomwise,
}

/// Identifies one histogram within an [`RdfSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RdfKey {
    Global,
    /// Unordered element pair, stored with the smaller atomic number first.
    ElementPair(Element, Element),
    /// Unordered canonical-ordinal pair, smaller ordinal first.
    AtomPair(usize, usize),
}

/// One distance histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdfHistogram {
    pub key: RdfKey,
    /// Raw bin counts; their sum is the number of edges binned here.
    pub counts: Vec<u64>,
    /// `counts` divided by the structure's total edge count.
    pub density: Vec<f64>,
}

/// All histograms of one structure, over `bins` bins spanning `[0, r_max]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdfSet {
    pub bins: usize,
    pub r_max: f64,
    pub histograms: Vec<RdfHistogram>,
}

impl RdfSet {
    /// Sum of raw counts across all histograms.
    pub fn total_count(&self) -> u64 {
        self.histograms
            .iter()
            .map(|h| h.counts.iter().sum::<u64>())
            .sum()
    }
}

/// Bins the given edges of `cell` into RDF histograms.
///
/// Edges at exactly `r_max` land in the last bin; edges beyond `r_max`
/// are dropped. For [`RdfMode::Elementwise`] only pairs whose elements
/// both appear in the fixed set are binned; for [`RdfMode::Atomwise`]
/// both endpoints are mapped to their canonical ordinal so the same
/// physical atom pair keys the same histogram across repeated structures.
pub fn compute_rdf(cell: &Supercell, edges: &[Edge], bins: usize, r_max: f64, mode: &RdfMode) -> RdfSet {
    assert!(bins > 0, "RDF needs at least one bin");
    assert!(r_max > 0.0, "RDF range must be positive");

    let total_edges = edges.len().max(1) as f64;
    let bin_of = |d: f64| -> Option<usize> {
        if d > r_max {
            return None;
        }
        Some(((d / r_max * bins as f64) as usize).min(bins - 1))
    };

    // Ordinal of each local atom index in the canonical ordering.
    let ordinal_of = |atom: usize| -> usize {
        let local = cell.local_atom_index(atom);
        cell.canonical_order
            .iter()
            .position(|&i| i == local)
            .unwrap_or(local)
    };

    let mut table: BTreeMap<RdfKey, Vec<u64>> = BTreeMap::new();
    if let RdfMode::Global = mode {
        table.insert(RdfKey::Global, vec![0; bins]);
    }

    for edge in edges {
        let Some(bin) = bin_of(edge.distance) else {
            continue;
        };
        let key = match mode {
            RdfMode::Global => RdfKey::Global,
            RdfMode::Elementwise(set) => {
                let (a, b) = (cell.elements[edge.source], cell.elements[edge.target]);
                if !set.contains(&a) || !set.contains(&b) {
                    continue;
                }
                RdfKey::ElementPair(a.min(b), a.max(b))
            }
            RdfMode::Atomwise => {
                let (a, b) = (ordinal_of(edge.source), ordinal_of(edge.target));
                RdfKey::AtomPair(a.min(b), a.max(b))
            }
        };
        table.entry(key).or_insert_with(|| vec![0; bins])[bin] += 1;
    }

    let histograms = table
        .into_iter()
        .map(|(key, counts)| {
            let density = counts.iter().map(|&c| c as f64 / total_edges).collect();
            RdfHistogram { key, counts, density }
        })
        .collect();

    RdfSet { bins, r_max, histograms }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::build_supercell;
    use crate::model::{CellParameters, MoleculeGeometry};
    use crate::symmetry::fixtures;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use std::f64::consts::FRAC_PI_2;

    fn cubic_cell(mol: MoleculeGeometry, sg_index: usize, cutoff: f64) -> Supercell {
        let params = CellParameters::new(
            Vector3::new(10.0, 10.0, 10.0),
            Vector3::new(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2),
            Vector3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 0.0, 0.01),
        );
        build_supercell(&params, sg_index, &fixtures::registry(), &mol, cutoff).unwrap()
    }

    #[test]
    fn global_counts_sum_to_edge_count() {
        let mol = MoleculeGeometry::new(vec![Vector3::zeros()], vec![Element::C]);
        let cell = cubic_cell(mol, 1, 15.0);
        let graph = super::super::graph::distance_graph(&cell, 15.0, usize::MAX);

        let rdf = compute_rdf(&cell, &graph.inter, 32, 15.0, &RdfMode::Global);
        assert_eq!(rdf.total_count(), graph.inter.len() as u64);
        // Densities sum to one when every edge is binned.
        let density_sum: f64 = rdf.histograms[0].density.iter().sum();
        assert_relative_eq!(density_sum, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn exact_r_max_lands_in_last_bin() {
        let mol = MoleculeGeometry::new(vec![Vector3::zeros()], vec![Element::C]);
        let cell = cubic_cell(mol, 1, 10.0);
        let graph = super::super::graph::distance_graph(&cell, 10.0, usize::MAX);
        assert_eq!(graph.inter.len(), 6); // face neighbors at exactly 10 Å

        let rdf = compute_rdf(&cell, &graph.inter, 10, 10.0, &RdfMode::Global);
        assert_eq!(rdf.histograms[0].counts[9], 6);
    }

    #[test]
    fn elementwise_keys_are_unordered() {
        let mol = MoleculeGeometry::new(
            vec![Vector3::new(-0.7, 0.0, 0.0), Vector3::new(0.7, 0.0, 0.0)],
            vec![Element::C, Element::O],
        );
        let cell = cubic_cell(mol, 1, 12.0);
        let graph = super::super::graph::distance_graph(&cell, 12.0, usize::MAX);

        let mode = RdfMode::Elementwise(vec![Element::C, Element::O]);
        let rdf = compute_rdf(&cell, &graph.inter, 16, 12.0, &mode);
        for h in &rdf.histograms {
            match h.key {
                RdfKey::ElementPair(a, b) => assert!(a <= b),
                other => panic!("unexpected key {other:?}"),
            }
        }
        // C-C, C-O, O-O all occur between molecule copies.
        assert_eq!(rdf.histograms.len(), 3);
    }

    #[test]
    fn atomwise_uses_canonical_ordinals() {
        // Two equidistant atoms: ordinals follow index tie-break.
        let mol = MoleculeGeometry::new(
            vec![Vector3::new(-0.7, 0.0, 0.0), Vector3::new(0.7, 0.0, 0.0)],
            vec![Element::C, Element::C],
        );
        let cell = cubic_cell(mol, 1, 12.0);
        let graph = super::super::graph::distance_graph(&cell, 12.0, usize::MAX);

        let rdf = compute_rdf(&cell, &graph.inter, 16, 12.0, &RdfMode::Atomwise);
        let keys: Vec<_> = rdf.histograms.iter().map(|h| h.key).collect();
        assert!(keys.contains(&RdfKey::AtomPair(0, 0)));
        assert!(keys.contains(&RdfKey::AtomPair(0, 1)));
        assert!(keys.contains(&RdfKey::AtomPair(1, 1)));
    }

    #[test]
    fn edges_beyond_r_max_are_dropped() {
        let mol = MoleculeGeometry::new(vec![Vector3::zeros()], vec![Element::C]);
        let cell = cubic_cell(mol, 1, 15.0);
        let graph = super::super::graph::distance_graph(&cell, 15.0, usize::MAX);

        // r_max below the nearest image distance: nothing binned.
        let rdf = compute_rdf(&cell, &graph.inter, 8, 9.0, &RdfMode::Global);
        assert_eq!(rdf.total_count(), 0);
    }
}
