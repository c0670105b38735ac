//! Error types for crystal assembly and descriptor computation.
//!
//! One enum covers both halves of the pipeline. Batch entry points return
//! a `Vec<Result<_, Error>>` so a bad structure never aborts its batch;
//! the caller decides what to do with each failed slot.

use thiserror::Error;

/// Errors that can occur while decoding parameters, assembling a
/// supercell, or computing descriptors.
///
/// Variants split into two classes. Caller-contract violations
/// ([`Shape`](Error::Shape), [`EmptySymmetryGroup`](Error::EmptySymmetryGroup),
/// [`UnknownSpaceGroup`](Error::UnknownSpaceGroup)) indicate malformed
/// input data and are also surfaced by debug assertions at the point of
/// detection. Per-structure geometric failures
/// ([`DegenerateCell`](Error::DegenerateCell),
/// [`NumericOverflow`](Error::NumericOverflow)) exclude one structure from
/// a batch while the rest proceed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input parameter vector has the wrong width.
    ///
    /// Decoded vectors are 12 wide; vectors carrying the 6-component
    /// orientation encoding are 15 wide. Anything else is a caller bug.
    #[error("parameter vector has width {got}, expected {expected}")]
    Shape {
        /// Accepted width(s), e.g. `"12 or 15"`.
        expected: &'static str,
        /// Width actually received.
        got: usize,
    },

    /// No entry for the requested space-group index in the registry.
    #[error("space group {0} is not present in the registry")]
    UnknownSpaceGroup(usize),

    /// Lattice-system label does not name one of the seven crystal systems.
    #[error("unknown lattice system '{0}'")]
    InvalidLatticeSystem(String),

    /// Unit-cell volume is non-positive or non-finite.
    ///
    /// Produced by pathological angle combinations that violate the
    /// triclinic validity condition. The structure is excluded from
    /// downstream scoring; it never propagates as NaN.
    #[error("degenerate unit cell: volume {volume} is not positive")]
    DegenerateCell {
        /// The offending volume value (may be NaN).
        volume: f64,
    },

    /// A space group's operator list is empty.
    ///
    /// Every group carries at least the identity, so an empty list means
    /// the lookup table is corrupt.
    #[error("space group {space_group} has an empty symmetry operator list")]
    EmptySymmetryGroup {
        /// Index of the offending space group.
        space_group: usize,
    },

    /// A non-finite value survived decoding.
    ///
    /// Near-zero rotation magnitudes are clamped locally (with a warning)
    /// before this can trigger; reaching it means the raw input itself
    /// carried NaN or infinity.
    #[error("non-finite value encountered in {context}")]
    NumericOverflow {
        /// Pipeline stage that observed the value.
        context: &'static str,
    },
}
