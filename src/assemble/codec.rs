//! Standardization codec for the flat cell-parameter vector.
//!
//! Learned generators emit vectors standardized against dataset
//! statistics. This module undoes (or reapplies) that standardization
//! and splits the flat vector into its lengths / angles / centroid /
//! orientation blocks. Pure functions, no side effects.

use crate::error::Error;

/// Width of a vector whose orientation is already a 3-angle triple.
pub const DECODED_WIDTH: usize = 12;

/// Width of a vector carrying the 6-component orientation encoding.
pub const ENCODED_WIDTH: usize = 15;

/// Number of leading components covered by dataset mean/std statistics:
/// lengths, angles, centroid, and the decoded 3-angle orientation.
const STANDARDIZED_PREFIX: usize = 9;

/// Accepted vector widths, for error messages.
const ACCEPTED_WIDTHS: &str = "12 or 15";

/// Orientation block of a raw parameter vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrientationBlock {
    /// Already a spherical rotation vector `(θ, φ, r)`.
    Angles([f64; 3]),
    /// Still in the 6-component pairwise encoding.
    Encoded([f64; 6]),
}

/// A destandardized parameter vector split into its blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCellVector {
    pub lengths: [f64; 3],
    pub angles: [f64; 3],
    pub centroid: [f64; 3],
    pub orientation: OrientationBlock,
}

/// Splits a flat vector of width 12 or 15 into its blocks.
///
/// Any other width is a caller contract violation ([`Error::Shape`]).
pub fn split(raw: &[f64]) -> Result<RawCellVector, Error> {
    let orientation = match raw.len() {
        DECODED_WIDTH => OrientationBlock::Angles([raw[9], raw[10], raw[11]]),
        ENCODED_WIDTH => {
            OrientationBlock::Encoded([raw[9], raw[10], raw[11], raw[12], raw[13], raw[14]])
        }
        got => {
            log::error!(
                "parameter vector width {got} (expected {DECODED_WIDTH} or {ENCODED_WIDTH})"
            );
            return Err(Error::Shape {
                expected: ACCEPTED_WIDTHS,
                got,
            });
        }
    };
    Ok(RawCellVector {
        lengths: [raw[0], raw[1], raw[2]],
        angles: [raw[3], raw[4], raw[5]],
        centroid: [raw[6], raw[7], raw[8]],
        orientation,
    })
}

/// Applies `raw * std + mean` elementwise.
///
/// For a 12-wide vector all components are destandardized; for a 15-wide
/// vector only the first nine are — the 6-component orientation encoding
/// is never standardized, so it passes through untouched. `mean` and
/// `std` always describe the 12 decoded components.
pub fn destandardize(raw: &[f64], mean: &[f64], std: &[f64]) -> Result<Vec<f64>, Error> {
    check_stats(mean, std)?;
    let covered = match raw.len() {
        DECODED_WIDTH => DECODED_WIDTH,
        ENCODED_WIDTH => STANDARDIZED_PREFIX,
        got => {
            return Err(Error::Shape {
                expected: ACCEPTED_WIDTHS,
                got,
            })
        }
    };
    Ok(raw
        .iter()
        .enumerate()
        .map(|(i, &v)| if i < covered { v * std[i] + mean[i] } else { v })
        .collect())
}

/// Inverse of [`destandardize`]: `(value - mean) / std`.
pub fn standardize(values: &[f64], mean: &[f64], std: &[f64]) -> Result<Vec<f64>, Error> {
    check_stats(mean, std)?;
    let covered = match values.len() {
        DECODED_WIDTH => DECODED_WIDTH,
        ENCODED_WIDTH => STANDARDIZED_PREFIX,
        got => {
            return Err(Error::Shape {
                expected: ACCEPTED_WIDTHS,
                got,
            })
        }
    };
    Ok(values
        .iter()
        .enumerate()
        .map(|(i, &v)| if i < covered { (v - mean[i]) / std[i] } else { v })
        .collect())
}

fn check_stats(mean: &[f64], std: &[f64]) -> Result<(), Error> {
    if mean.len() != DECODED_WIDTH {
        return Err(Error::Shape {
            expected: "12",
            got: mean.len(),
        });
    }
    if std.len() != DECODED_WIDTH {
        return Err(Error::Shape {
            expected: "12",
            got: std.len(),
        });
    }
    Ok(())
}
