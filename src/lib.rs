//! A pure Rust library for assembling molecular-crystal structures from
//! learned parameter vectors and scoring-ready structural descriptors.
//! It decodes flat generator outputs into physically valid cell
//! parameters, expands one asymmetric-unit molecule through its space
//! group into a periodic supercell, and computes distance-based
//! descriptors for an external scorer.
//!
//! # Features
//!
//! - **Parameter decoding** — Standardization codec, smooth/hard bound
//!   enforcement, and spherical-rotation-vector orientation decoding
//! - **Crystallographic constraints** — Projection onto the constraint
//!   manifold of any of the seven crystal systems, and asymmetric-unit
//!   rescaling per space group
//! - **Symmetry expansion** — Space-group operators plus lattice tiling
//!   build a finite supercell covering an interaction cutoff, every atom
//!   tagged canonical or image
//! - **Descriptors** — Packing coefficient, radial distribution functions
//!   (global, elementwise, atomwise), and donor/acceptor contact counts
//!   over a deterministic radius graph
//!
//! # Quick Start
//!
//! ```
//! use nalgebra::Vector3;
//! use xtal_forge::{
//!     build_supercell, compute_descriptors, decode_parameters, DecodeConfig,
//!     DescriptorConfig, Element, LatticeSystem, MoleculeGeometry,
//!     SpaceGroupInfo, SpaceGroupRegistry, SymOp,
//! };
//!
//! // Space group P1: identity operator, full cell as asymmetric unit.
//! let registry = SpaceGroupRegistry::new([(
//!     1,
//!     SpaceGroupInfo {
//!         lattice_system: LatticeSystem::Triclinic,
//!         operators: vec![SymOp::identity()],
//!         asym_unit_lo: Vector3::zeros(),
//!         asym_unit_hi: Vector3::new(1.0, 1.0, 1.0),
//!     },
//! )]);
//!
//! // One carbon monoxide molecule, local frame.
//! let molecule = MoleculeGeometry::new(
//!     vec![Vector3::new(-0.56, 0.0, 0.0), Vector3::new(0.56, 0.0, 0.0)],
//!     vec![Element::C, Element::O],
//! );
//!
//! // A raw 12-component generator output: lengths, angles, centroid,
//! // orientation.
//! let raw = vec![4.0, 4.0, 4.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.3, 0.3, 1.0];
//!
//! let sg = registry.get(1)?;
//! let params = decode_parameters(&raw, sg, &DecodeConfig::default())?;
//! assert!(params.lengths.iter().all(|&l| l > 0.0));
//!
//! let cell = build_supercell(&params, 1, &registry, &molecule, 6.0)?;
//! assert_eq!(cell.z, 1);
//! assert_eq!(cell.canonical_indices().len(), 2);
//!
//! let descriptors = compute_descriptors(&cell, &DescriptorConfig::default())?;
//! assert!(descriptors.packing_coefficient > 0.0);
//! # Ok::<(), xtal_forge::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`model`] — Cell parameters, molecules, elements, and supercells
//! - [`symmetry`] — Space-group operator registry (loaded once, shared
//!   immutably)
//! - [`assemble`] — The decode-and-assemble pipeline
//! - [`descriptors`] — Radius graph, RDF, packing, and contact descriptors
//! - [`batch`] — Rayon-parallel batch entry points with partial-failure
//!   semantics
//!
//! Batch calls return one `Result` per input slot: a structure with a
//! degenerate cell or malformed vector is reported and excluded while the
//! rest of the batch proceeds.

pub mod assemble;
pub mod batch;
pub mod descriptors;
pub mod error;
pub mod model;
pub mod symmetry;

pub use assemble::{
    build_supercell, decode_parameters, BoundMode, DecodeConfig, OrientationBlock,
};
pub use batch::{assemble_batch, process_batch};
pub use descriptors::{
    compute_descriptors, DescriptorConfig, Descriptors, DistanceGraph, Edge, RdfMode, RdfSet,
    TargetFilter,
};
pub use error::Error;
pub use model::{
    AtomOrigin, CellMatrix, CellParameters, Element, LatticeSystem, MoleculeGeometry, Supercell,
};
pub use symmetry::{SpaceGroupInfo, SpaceGroupRegistry, SymOp};
