//! Asymmetric radius graph over supercell atoms.
//!
//! Edges run from a source set (by default the canonical atoms) to a
//! target set within a cutoff radius, capped per source atom. A uniform
//! grid keeps the search linear in atom count; candidate lists are sorted
//! by distance then index, so the cap is deterministic.

use crate::model::{AtomOrigin, Supercell};
use nalgebra::Vector3;
use std::collections::HashMap;

/// One directed edge of the radius graph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Source atom index (always in the caller's source set).
    pub source: usize,
    /// Target atom index.
    pub target: usize,
    /// Euclidean distance in Å.
    pub distance: f64,
}

/// Which atoms qualify as edge targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetFilter {
    /// Canonical atoms only (intramolecular edges).
    Canonical,
    /// Image atoms only (intermolecular edges).
    Image,
    /// Every atom.
    #[default]
    All,
}

impl TargetFilter {
    #[inline]
    fn admits(self, origin: AtomOrigin) -> bool {
        match self {
            TargetFilter::Canonical => origin == AtomOrigin::Canonical,
            TargetFilter::Image => origin == AtomOrigin::Image,
            TargetFilter::All => true,
        }
    }
}

/// Edge list split by molecular relationship.
#[derive(Debug, Clone, Default)]
pub struct DistanceGraph {
    /// Both endpoints canonical.
    pub intra: Vec<Edge>,
    /// Target is an image atom.
    pub inter: Vec<Edge>,
}

impl DistanceGraph {
    pub fn edge_count(&self) -> usize {
        self.intra.len() + self.inter.len()
    }
}

/// Uniform grid over atom positions for radius queries.
///
/// Cell edge equals the query cutoff, so any in-range neighbor lives in
/// one of the 27 cells around the query point.
#[derive(Debug)]
struct SpatialGrid {
    inv_cell: f64,
    cells: HashMap<(i64, i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    fn new(positions: &[Vector3<f64>], cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "grid cell size must be positive");
        let inv_cell = 1.0 / cell_size;
        let mut cells: HashMap<(i64, i64, i64), Vec<usize>> = HashMap::new();
        for (idx, p) in positions.iter().enumerate() {
            cells
                .entry(Self::key(p, inv_cell))
                .or_default()
                .push(idx);
        }
        Self { inv_cell, cells }
    }

    #[inline]
    fn key(p: &Vector3<f64>, inv_cell: f64) -> (i64, i64, i64) {
        (
            (p[0] * inv_cell).floor() as i64,
            (p[1] * inv_cell).floor() as i64,
            (p[2] * inv_cell).floor() as i64,
        )
    }

    /// Visits every stored index in the 27 cells around `p`.
    fn for_each_nearby(&self, p: &Vector3<f64>, mut f: impl FnMut(usize)) {
        let (cx, cy, cz) = Self::key(p, self.inv_cell);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(indices) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) {
                        for &idx in indices {
                            f(idx);
                        }
                    }
                }
            }
        }
    }
}

/// Builds directed edges from `sources` to atoms admitted by `targets`,
/// within `cutoff`, keeping at most `max_neighbors` per source.
///
/// Ties at equal distance break by ascending target index, so repeated
/// calls over the same supercell produce identical edge lists.
pub fn radius_graph(
    cell: &Supercell,
    sources: &[usize],
    targets: TargetFilter,
    cutoff: f64,
    max_neighbors: usize,
) -> Vec<Edge> {
    let grid = SpatialGrid::new(&cell.positions, cutoff);
    let mut edges = Vec::new();
    let mut candidates: Vec<(f64, usize)> = Vec::new();

    for &src in sources {
        candidates.clear();
        let origin = &cell.positions[src];
        grid.for_each_nearby(origin, |tgt| {
            if tgt == src || !targets.admits(cell.origins[tgt]) {
                return;
            }
            let d = (cell.positions[tgt] - origin).norm();
            if d <= cutoff {
                candidates.push((d, tgt));
            }
        });
        candidates.sort_by(|a, b| {
            a.0.partial_cmp(&b.0)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1))
        });
        candidates.truncate(max_neighbors);
        edges.extend(candidates.iter().map(|&(distance, target)| Edge {
            source: src,
            target,
            distance,
        }));
    }
    edges
}

/// The default descriptor graph: canonical sources against all atoms,
/// split into intra- and intermolecular edge sets.
pub fn distance_graph(cell: &Supercell, cutoff: f64, max_neighbors: usize) -> DistanceGraph {
    let sources = cell.canonical_indices();
    let mut graph = DistanceGraph::default();
    for edge in radius_graph(cell, &sources, TargetFilter::All, cutoff, max_neighbors) {
        match cell.origins[edge.target] {
            AtomOrigin::Canonical => graph.intra.push(edge),
            AtomOrigin::Image => graph.inter.push(edge),
        }
    }
    graph
}
