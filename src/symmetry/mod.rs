//! Space-group lookup: symmetry operators, lattice systems, and
//! asymmetric-unit bounding boxes.
//!
//! The operator tables themselves come from an external source (they are
//! an input contract, not part of this crate); this module provides the
//! immutable registry they are loaded into. Build the registry once at
//! process start and share it by reference — every lookup after that is
//! read-only.

use crate::error::Error;
use crate::model::LatticeSystem;
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single space-group symmetry operation: linear part + fractional
/// translation, acting on fractional coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymOp {
    /// Rotation/reflection part with determinant ±1.
    pub rotation: Matrix3<f64>,
    /// Fractional translation shift.
    pub translation: Vector3<f64>,
}

impl SymOp {
    pub fn new(rotation: Matrix3<f64>, translation: Vector3<f64>) -> Self {
        Self { rotation, translation }
    }

    /// The trivial operation `(I, 0)`.
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Apply the operation to a fractional coordinate.
    #[inline]
    pub fn apply(&self, point: Vector3<f64>) -> Vector3<f64> {
        self.rotation * point + self.translation
    }

    pub fn is_identity(&self) -> bool {
        (self.rotation - Matrix3::identity()).norm() < 1e-10
            && self.translation.norm() < 1e-10
    }
}

/// Everything the pipeline needs to know about one space group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceGroupInfo {
    /// Crystal system of this group.
    pub lattice_system: LatticeSystem,
    /// Symmetry operators; index 0 is the identity (the canonical copy).
    /// The list length is the symmetry multiplicity Z.
    pub operators: Vec<SymOp>,
    /// Fractional lower corner of the asymmetric-unit bounding box.
    pub asym_unit_lo: Vector3<f64>,
    /// Fractional upper corner of the asymmetric-unit bounding box.
    pub asym_unit_hi: Vector3<f64>,
}

impl SpaceGroupInfo {
    /// Symmetry multiplicity Z: molecule copies per unit cell.
    #[inline]
    pub fn multiplicity(&self) -> usize {
        self.operators.len()
    }

    /// Validates the entry for a given group index: a non-empty operator
    /// list whose first entry is the identity.
    pub fn validate(&self, index: usize) -> Result<(), Error> {
        if self.operators.is_empty() {
            log::error!("space group {index} has an empty operator list; table is corrupt");
            return Err(Error::EmptySymmetryGroup { space_group: index });
        }
        Ok(())
    }
}

/// Immutable arena of space groups keyed by integer index.
///
/// Initialized once from externally supplied tables, then shared by
/// reference across arbitrarily many concurrent callers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpaceGroupRegistry {
    groups: HashMap<usize, SpaceGroupInfo>,
}

impl SpaceGroupRegistry {
    pub fn new(entries: impl IntoIterator<Item = (usize, SpaceGroupInfo)>) -> Self {
        Self {
            groups: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, index: usize) -> Result<&SpaceGroupInfo, Error> {
        self.groups
            .get(&index)
            .ok_or(Error::UnknownSpaceGroup(index))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
