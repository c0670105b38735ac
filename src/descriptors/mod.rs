//! Distance-based structural descriptors for an assembled supercell.
//!
//! Everything here is a pure function of one [`Supercell`]: the radius
//! graph, the packing coefficient, the RDF variants, and short-range
//! donor/acceptor contact counts. The external scorer consumes the
//! [`Descriptors`] output; nothing is cached or mutated.

pub mod graph;
pub mod rdf;

pub use graph::{DistanceGraph, Edge, TargetFilter};
pub use rdf::{RdfHistogram, RdfKey, RdfMode, RdfSet};

use crate::error::Error;
use crate::model::{Element, Supercell};
use serde::{Deserialize, Serialize};

/// Default donor/acceptor contact threshold, Å.
pub const CONTACT_DISTANCE: f64 = 3.3;

/// Configuration for descriptor computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorConfig {
    /// Radius-graph cutoff, Å.
    pub cutoff: f64,
    /// Per-source-atom neighbor cap.
    pub max_neighbors: usize,
    /// RDF bin count.
    pub rdf_bins: usize,
    /// RDF histogram range upper end, Å.
    pub rdf_r_max: f64,
    /// RDF variant.
    pub rdf_mode: RdfMode,
    /// Donor/acceptor contact threshold, Å (non-directional, no angular
    /// filter).
    pub contact_distance: f64,
    /// Donor elements on the image side; `None` uses the element defaults
    /// (hydrogen).
    pub donors: Option<Vec<Element>>,
    /// Acceptor elements on the canonical side; `None` uses the element
    /// defaults (N, O, F).
    pub acceptors: Option<Vec<Element>>,
}

impl Default for DescriptorConfig {
    fn default() -> Self {
        Self {
            cutoff: 6.0,
            max_neighbors: 100,
            rdf_bins: 100,
            rdf_r_max: 6.0,
            rdf_mode: RdfMode::Global,
            contact_distance: CONTACT_DISTANCE,
            donors: None,
            acceptors: None,
        }
    }
}

/// Scalar and histogram descriptors of one structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Descriptors {
    /// `Z · mol_volume / cell_volume`; values above one flag
    /// self-overlapping, unphysical packings.
    pub packing_coefficient: f64,
    /// RDF histograms over the intermolecular edge set.
    pub rdf: RdfSet,
    /// Short-range donor/acceptor contact count.
    pub contact_count: usize,
    /// Intramolecular edges within the cutoff.
    pub intra_edge_count: usize,
    /// Intermolecular edges within the cutoff.
    pub inter_edge_count: usize,
}

/// Occupied fraction of the unit cell: `Z · mol_volume / V`.
///
/// Not clamped; realistic organic crystals land in (0, 1) and anything
/// larger is a signal the structure overlaps itself.
pub fn packing_coefficient(cell: &Supercell) -> f64 {
    cell.z as f64 * cell.mol_volume / cell.volume
}

/// Counts intermolecular canonical-acceptor / image-donor pairs closer
/// than `max_distance`.
pub fn contact_count(
    cell: &Supercell,
    inter: &[Edge],
    donors: Option<&[Element]>,
    acceptors: Option<&[Element]>,
    max_distance: f64,
) -> usize {
    let is_donor = |e: Element| match donors {
        Some(set) => set.contains(&e),
        None => e.is_default_donor(),
    };
    let is_acceptor = |e: Element| match acceptors {
        Some(set) => set.contains(&e),
        None => e.is_default_acceptor(),
    };
    inter
        .iter()
        .filter(|edge| {
            edge.distance < max_distance
                && is_acceptor(cell.elements[edge.source])
                && is_donor(cell.elements[edge.target])
        })
        .count()
}

/// Computes every descriptor for one supercell.
pub fn compute_descriptors(cell: &Supercell, config: &DescriptorConfig) -> Result<Descriptors, Error> {
    if !(cell.volume > 0.0 && cell.volume.is_finite()) {
        return Err(Error::DegenerateCell { volume: cell.volume });
    }

    let graph = graph::distance_graph(cell, config.cutoff, config.max_neighbors);
    let rdf = rdf::compute_rdf(
        cell,
        &graph.inter,
        config.rdf_bins,
        config.rdf_r_max,
        &config.rdf_mode,
    );
    let contacts = contact_count(
        cell,
        &graph.inter,
        config.donors.as_deref(),
        config.acceptors.as_deref(),
        config.contact_distance,
    );

    Ok(Descriptors {
        packing_coefficient: packing_coefficient(cell),
        rdf,
        contact_count: contacts,
        intra_edge_count: graph.intra.len(),
        inter_edge_count: graph.inter.len(),
    })
}
