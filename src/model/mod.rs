//! Core data structures for crystal assembly.
//!
//! - [`element`] – Elements of the organic-crystal set with van der Waals data.
//! - [`cell`] – Unit-cell parameters, lattice systems, and the
//!   fractional↔Cartesian transform.
//! - [`molecule`] – Caller-owned molecule geometries with cached canonical
//!   atom ordering.
//! - [`supercell`] – The assembled periodic environment, tagged
//!   canonical/image per atom.
//!
//! The data model separates caller-owned inputs ([`MoleculeGeometry`]) from
//! per-call derived outputs ([`Supercell`]); derived values are rebuilt
//! whenever parameters change, never mutated in place.
//!
//! [`MoleculeGeometry`]: molecule::MoleculeGeometry
//! [`Supercell`]: supercell::Supercell

pub mod cell;
pub mod element;
pub mod molecule;
pub mod supercell;

pub use cell::{CellMatrix, CellParameters, LatticeSystem};
pub use element::{Element, ParseElementError, UnknownAtomicNumberError};
pub use molecule::MoleculeGeometry;
pub use supercell::{AtomOrigin, Supercell};
