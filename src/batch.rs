//! Batch processing across independent structures.
//!
//! Structures in a batch share nothing mutable, so the whole pipeline is
//! a parallel map: one slot in, one `Result` out. A failed structure
//! never aborts its batch and never silently disappears — the output is
//! a parallel array aligned with the inputs.

use crate::assemble::{self, DecodeConfig};
use crate::descriptors::{self, DescriptorConfig, Descriptors};
use crate::error::Error;
use crate::model::{MoleculeGeometry, Supercell};
use crate::symmetry::SpaceGroupRegistry;
use rayon::prelude::*;

/// Decodes and assembles every structure of a batch in parallel.
///
/// # Panics
///
/// Panics if the input slices disagree in length; slot `i` of each slice
/// describes structure `i`.
pub fn assemble_batch(
    raws: &[Vec<f64>],
    sg_indices: &[usize],
    molecules: &[MoleculeGeometry],
    registry: &SpaceGroupRegistry,
    decode: &DecodeConfig,
    cutoff: f64,
) -> Vec<Result<Supercell, Error>> {
    assert_eq!(raws.len(), sg_indices.len(), "one space group per structure");
    assert_eq!(raws.len(), molecules.len(), "one molecule per structure");

    raws.par_iter()
        .zip(sg_indices.par_iter())
        .zip(molecules.par_iter())
        .map(|((raw, &sg_index), molecule)| {
            let sg = registry.get(sg_index)?;
            let params = assemble::decode_parameters(raw, sg, decode)?;
            assemble::build_supercell(&params, sg_index, registry, molecule, cutoff)
        })
        .collect()
}

/// Full pipeline for a batch: decode, assemble, and describe each
/// structure, in parallel.
///
/// Per-structure failures are returned in place (and logged at debug
/// level); the remaining structures proceed.
pub fn process_batch(
    raws: &[Vec<f64>],
    sg_indices: &[usize],
    molecules: &[MoleculeGeometry],
    registry: &SpaceGroupRegistry,
    decode: &DecodeConfig,
    config: &DescriptorConfig,
) -> Vec<Result<Descriptors, Error>> {
    assemble_batch(raws, sg_indices, molecules, registry, decode, config.cutoff)
        .into_par_iter()
        .enumerate()
        .map(|(i, built)| {
            let result = built.and_then(|cell| descriptors::compute_descriptors(&cell, config));
            if let Err(err) = &result {
                log::debug!("structure {i} excluded from batch: {err}");
            }
            result
        })
        .collect()
}
