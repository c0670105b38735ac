//! Unit-cell parameters and the fractional/Cartesian transform.

use crate::error::Error;
use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The seven crystal systems.
///
/// Resolved once at the API boundary from the caller's label; all
/// downstream dispatch is on this closed enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LatticeSystem {
    Triclinic,
    Monoclinic,
    Orthorhombic,
    Tetragonal,
    Hexagonal,
    Rhombohedral,
    Cubic,
}

impl LatticeSystem {
    pub fn as_str(self) -> &'static str {
        match self {
            LatticeSystem::Triclinic => "triclinic",
            LatticeSystem::Monoclinic => "monoclinic",
            LatticeSystem::Orthorhombic => "orthorhombic",
            LatticeSystem::Tetragonal => "tetragonal",
            LatticeSystem::Hexagonal => "hexagonal",
            LatticeSystem::Rhombohedral => "rhombohedral",
            LatticeSystem::Cubic => "cubic",
        }
    }
}

impl fmt::Display for LatticeSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LatticeSystem {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "triclinic" => Ok(LatticeSystem::Triclinic),
            "monoclinic" => Ok(LatticeSystem::Monoclinic),
            "orthorhombic" => Ok(LatticeSystem::Orthorhombic),
            "tetragonal" => Ok(LatticeSystem::Tetragonal),
            "hexagonal" => Ok(LatticeSystem::Hexagonal),
            "rhombohedral" | "trigonal" => Ok(LatticeSystem::Rhombohedral),
            "cubic" => Ok(LatticeSystem::Cubic),
            other => Err(Error::InvalidLatticeSystem(other.to_string())),
        }
    }
}

/// Decoded cell parameters for one structure.
///
/// Lengths are in Ångströms (> 0), angles in radians inside (0, π), the
/// asymmetric-unit centroid in unit-cell fractional coordinates, and the
/// orientation as a spherical rotation vector (polar θ ∈ [0, π/2],
/// azimuth φ ∈ [-π, π], magnitude r ∈ [0, 2π]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellParameters {
    pub lengths: Vector3<f64>,
    pub angles: Vector3<f64>,
    pub centroid: Vector3<f64>,
    pub orientation: Vector3<f64>,
}

impl CellParameters {
    pub fn new(
        lengths: Vector3<f64>,
        angles: Vector3<f64>,
        centroid: Vector3<f64>,
        orientation: Vector3<f64>,
    ) -> Self {
        Self { lengths, angles, centroid, orientation }
    }

    /// Builds the fractional→Cartesian transform for these parameters.
    ///
    /// Uses the standard crystallographic cell-vector construction:
    /// `a` along x, `b` in the xy plane, `c` general. Returns
    /// [`Error::DegenerateCell`] when the angle combination yields a
    /// non-positive or non-finite volume.
    pub fn cell_matrix(&self) -> Result<CellMatrix, Error> {
        let (a, b, c) = (self.lengths[0], self.lengths[1], self.lengths[2]);
        let (cos_al, cos_be, cos_ga) =
            (self.angles[0].cos(), self.angles[1].cos(), self.angles[2].cos());
        let sin_ga = self.angles[2].sin();

        // Triclinic validity term; squared volume per unit abc.
        // NaN when the angles violate validity, which the check below catches.
        let v_sq = 1.0 - cos_al * cos_al - cos_be * cos_be - cos_ga * cos_ga
            + 2.0 * cos_al * cos_be * cos_ga;
        let volume = a * b * c * v_sq.sqrt();
        if !(volume > 0.0 && volume.is_finite()) || sin_ga.abs() < f64::EPSILON {
            return Err(Error::DegenerateCell { volume });
        }

        let frac_to_cart = Matrix3::new(
            a,
            b * cos_ga,
            c * cos_be,
            0.0,
            b * sin_ga,
            c * (cos_al - cos_be * cos_ga) / sin_ga,
            0.0,
            0.0,
            c * v_sq.sqrt() / sin_ga,
        );
        let cart_to_frac = frac_to_cart
            .try_inverse()
            .ok_or(Error::DegenerateCell { volume })?;

        Ok(CellMatrix { frac_to_cart, cart_to_frac, volume })
    }

    /// Unit-cell volume via the triclinic formula, without building the
    /// full transform.
    pub fn volume(&self) -> Result<f64, Error> {
        self.cell_matrix().map(|m| m.volume)
    }

    /// Rotation encoded by the spherical rotation vector.
    ///
    /// The axis is the unit vector at polar angle θ and azimuth φ; the
    /// rotation magnitude is r.
    pub fn rotation(&self) -> Rotation3<f64> {
        let (theta, phi, r) = (
            self.orientation[0],
            self.orientation[1],
            self.orientation[2],
        );
        let axis = Vector3::new(
            theta.sin() * phi.cos(),
            theta.sin() * phi.sin(),
            theta.cos(),
        );
        Rotation3::from_axis_angle(&Unit::new_normalize(axis), r)
    }
}

/// Fractional↔Cartesian transform pair plus the cell volume.
#[derive(Debug, Clone, PartialEq)]
pub struct CellMatrix {
    /// Column-vector cell basis: Cartesian = `frac_to_cart · fractional`.
    pub frac_to_cart: Matrix3<f64>,
    pub cart_to_frac: Matrix3<f64>,
    /// Unit-cell volume in Å³ (always > 0 by construction).
    pub volume: f64,
}

impl CellMatrix {
    #[inline]
    pub fn frac_to_cart(&self, v: Vector3<f64>) -> Vector3<f64> {
        self.frac_to_cart * v
    }

    #[inline]
    pub fn cart_to_frac(&self, v: Vector3<f64>) -> Vector3<f64> {
        self.cart_to_frac * v
    }

    /// Perpendicular widths of the cell along the three basis directions.
    ///
    /// `w_i = V / area(face_i)` — the spacing that controls how many
    /// lattice translations are needed to cover a given radius.
    pub fn perpendicular_widths(&self) -> Vector3<f64> {
        let a = self.frac_to_cart.column(0);
        let b = self.frac_to_cart.column(1);
        let c = self.frac_to_cart.column(2);
        Vector3::new(
            self.volume / b.cross(&c).norm(),
            self.volume / c.cross(&a).norm(),
            self.volume / a.cross(&b).norm(),
        )
    }

    /// Half the body diagonal, the radius of the cell's bounding sphere.
    pub fn bounding_radius(&self) -> f64 {
        let d = self.frac_to_cart * Vector3::new(1.0, 1.0, 1.0);
        d.norm() / 2.0
    }
}
