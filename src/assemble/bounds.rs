//! Maps unconstrained reals into physically valid intervals.
//!
//! Generators emit raw unbounded values; everything here squeezes them
//! into the open or closed intervals the crystallographic transforms
//! require. Soft mode stays differentiable everywhere and never touches
//! the boundary; hard mode clamps exactly.

use crate::error::Error;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};

/// Bound-enforcement mode, resolved once at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundMode {
    /// `tanh`-based: smooth, asymptotically bounded, never reaches the
    /// boundary exactly.
    #[default]
    Soft,
    /// Clamp-based: reaches the boundary exactly, zero gradient outside.
    Hard,
}

/// Positivity floor for cell lengths, Å.
pub const LENGTH_FLOOR: f64 = 0.01;

/// Center of the cell-angle interval.
pub const ANGLE_CENTER: f64 = FRAC_PI_2;

/// Half-width of the cell-angle interval.
///
/// 0.8·π/2 keeps cells away from the degenerate near-0/near-π corners.
/// Empirically chosen; treat as a tunable, not a law.
pub const ANGLE_SPAN: f64 = 0.8 * FRAC_PI_2;

/// Center/span mapping the fractional centroid to exactly [0, 1].
pub const CENTROID_CENTER: f64 = 0.5;
pub const CENTROID_SPAN: f64 = 0.5;

/// Smallest allowed rotation magnitude. A zero-length rotation vector
/// leaves the axis undefined, so magnitudes below this are clamped up.
pub const MIN_ROTATION_MAGNITUDE: f64 = 0.01;

/// Maps `x` into `[center - span, center + span]`.
pub fn enforce_1d_bound(x: f64, span: f64, center: f64, mode: BoundMode) -> f64 {
    match mode {
        BoundMode::Soft => ((x - center) / span).tanh() * span + center,
        BoundMode::Hard => ((x - center) / span).clamp(-1.0, 1.0) * span + center,
    }
}

/// Inverts [`enforce_1d_bound`] for soft mode.
///
/// There is deliberately no hard-mode inverse: clamping collapses every
/// out-of-range input onto the boundary, so the original value is lost.
pub fn undo_soft_bound(bounded: f64, span: f64, center: f64) -> f64 {
    ((bounded - center) / span).atanh() * span + center
}

/// Softplus with a positivity floor: `ln(1 + exp(x - eps)) + eps`. Always
/// at least `eps` (exactly `eps` once the softplus term falls below its
/// ulp for very negative inputs).
///
/// Mode-independent; used for cell lengths in both soft and hard mode.
pub fn softplus_floor(x: f64, eps: f64) -> f64 {
    // ln(1 + e^t) computed stably for large |t|.
    let t = x - eps;
    let sp = if t > 30.0 { t } else { t.exp().ln_1p() };
    sp + eps
}

#[inline]
fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Decodes the 6-component orientation encoding into a spherical
/// rotation vector `(θ, φ, r)`.
///
/// Each consecutive pair is collapsed to an angle through `atan2`. The
/// polar pair is passed through a sigmoid first, which restricts θ to
/// the first quadrant [0, π/2]; the magnitude angle is shifted by +π so
/// r ∈ [0, 2π], then floored at [`MIN_ROTATION_MAGNITUDE`] (logged as a
/// warning when the floor fires).
pub fn decode_to_sph_rotvec(encoded: &[f64; 6]) -> Result<Vector3<f64>, Error> {
    if encoded.iter().any(|v| !v.is_finite()) {
        return Err(Error::NumericOverflow {
            context: "orientation decode",
        });
    }

    let theta = sigmoid(encoded[1]).atan2(sigmoid(encoded[0]));
    let phi = encoded[3].atan2(encoded[2]);
    let mut r = encoded[5].atan2(encoded[4]) + PI;

    if !(r >= MIN_ROTATION_MAGNITUDE) {
        log::warn!(
            "rotation magnitude {r} below floor; clamping to {MIN_ROTATION_MAGNITUDE}"
        );
        r = MIN_ROTATION_MAGNITUDE;
    }

    Ok(Vector3::new(theta, phi, r))
}
