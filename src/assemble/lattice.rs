//! Projects cell lengths and angles onto a crystal system's constraint
//! manifold.
//!
//! Equalities are enforced by averaging the affected components, so the
//! projection is idempotent and stays close to the generator's output.

use crate::model::LatticeSystem;
use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI};

/// Applies the constraints of `system` to `(lengths, angles)`.
///
/// | system | lengths | angles |
/// |---|---|---|
/// | triclinic | free | free |
/// | monoclinic | free | α = γ = π/2 |
/// | orthorhombic | free | all π/2 |
/// | tetragonal | a = b | all π/2 |
/// | hexagonal | a = b | α = β = π/2, γ = 2π/3 |
/// | rhombohedral | a = b = c | α = β = γ |
/// | cubic | a = b = c | all π/2 |
pub fn enforce_crystal_system(
    lengths: Vector3<f64>,
    angles: Vector3<f64>,
    system: LatticeSystem,
) -> (Vector3<f64>, Vector3<f64>) {
    let right = Vector3::new(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2);
    let ab = (lengths[0] + lengths[1]) / 2.0;
    let abc = (lengths[0] + lengths[1] + lengths[2]) / 3.0;

    match system {
        LatticeSystem::Triclinic => (lengths, angles),
        LatticeSystem::Monoclinic => (
            lengths,
            Vector3::new(FRAC_PI_2, angles[1], FRAC_PI_2),
        ),
        LatticeSystem::Orthorhombic => (lengths, right),
        LatticeSystem::Tetragonal => (Vector3::new(ab, ab, lengths[2]), right),
        LatticeSystem::Hexagonal => (
            Vector3::new(ab, ab, lengths[2]),
            Vector3::new(FRAC_PI_2, FRAC_PI_2, 2.0 * PI / 3.0),
        ),
        LatticeSystem::Rhombohedral => {
            let mean_angle = (angles[0] + angles[1] + angles[2]) / 3.0;
            (
                Vector3::new(abc, abc, abc),
                Vector3::new(mean_angle, mean_angle, mean_angle),
            )
        }
        LatticeSystem::Cubic => (Vector3::new(abc, abc, abc), right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ALL_SYSTEMS: [LatticeSystem; 7] = [
        LatticeSystem::Triclinic,
        LatticeSystem::Monoclinic,
        LatticeSystem::Orthorhombic,
        LatticeSystem::Tetragonal,
        LatticeSystem::Hexagonal,
        LatticeSystem::Rhombohedral,
        LatticeSystem::Cubic,
    ];

    #[test]
    fn orthorhombic_forces_right_angles_only() {
        let (l, a) = enforce_crystal_system(
            Vector3::new(6.0, 7.0, 8.0),
            Vector3::new(1.2, 1.9, 1.4),
            LatticeSystem::Orthorhombic,
        );
        assert_eq!(l, Vector3::new(6.0, 7.0, 8.0));
        assert_eq!(a, Vector3::new(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2));
    }

    #[test]
    fn monoclinic_keeps_beta_free() {
        let (_, a) = enforce_crystal_system(
            Vector3::new(6.0, 7.0, 8.0),
            Vector3::new(1.2, 1.9, 1.4),
            LatticeSystem::Monoclinic,
        );
        assert_eq!(a, Vector3::new(FRAC_PI_2, 1.9, FRAC_PI_2));
    }

    #[test]
    fn tetragonal_averages_ab() {
        let (l, a) = enforce_crystal_system(
            Vector3::new(6.0, 8.0, 11.0),
            Vector3::new(1.2, 1.9, 1.4),
            LatticeSystem::Tetragonal,
        );
        assert_eq!(l, Vector3::new(7.0, 7.0, 11.0));
        assert_eq!(a, Vector3::new(FRAC_PI_2, FRAC_PI_2, FRAC_PI_2));
    }

    #[test]
    fn hexagonal_gamma_is_120_degrees() {
        let (l, a) = enforce_crystal_system(
            Vector3::new(4.0, 6.0, 9.0),
            Vector3::new(1.0, 1.0, 1.0),
            LatticeSystem::Hexagonal,
        );
        assert_eq!(l, Vector3::new(5.0, 5.0, 9.0));
        assert_relative_eq!(a[2], 2.0 * PI / 3.0);
    }

    #[test]
    fn rhombohedral_averages_everything() {
        let (l, a) = enforce_crystal_system(
            Vector3::new(3.0, 4.0, 5.0),
            Vector3::new(1.2, 1.3, 1.4),
            LatticeSystem::Rhombohedral,
        );
        assert_relative_eq!(l, Vector3::new(4.0, 4.0, 4.0), epsilon = 1e-12);
        assert_relative_eq!(a, Vector3::new(1.3, 1.3, 1.3), epsilon = 1e-12);
    }

    #[test]
    fn enforcement_is_idempotent_for_every_system() {
        let lengths = Vector3::new(5.3, 7.9, 12.1);
        let angles = Vector3::new(1.1, 1.8, 2.0);
        for system in ALL_SYSTEMS {
            let (l1, a1) = enforce_crystal_system(lengths, angles, system);
            let (l2, a2) = enforce_crystal_system(l1, a1, system);
            assert_relative_eq!(l1, l2, epsilon = 1e-12);
            assert_relative_eq!(a1, a2, epsilon = 1e-12);
        }
    }
}
