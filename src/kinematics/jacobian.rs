// Jacobian construction for the omni base
//
// Row i maps body velocity [vx, vy, w] to wheel i's angular velocity:
// [cos(t_i)/r, sin(t_i)/r, L/r] where r is the wheel radius and L the
// center-to-wheel distance. Pure function of the geometry.

use super::geometry::Geometry;
use super::{KinematicsError, Result};

/// Dense wheel-count x 3 map from body velocity to wheel angular velocities
#[derive(Debug, Clone, PartialEq)]
pub struct Jacobian {
    rows: Vec<[f32; 3]>,
}

impl Jacobian {
    pub fn from_geometry(geometry: &Geometry) -> Self {
        let r = geometry.wheel_radius();
        let l = geometry.center_distance();
        let rows = geometry
            .wheel_angles()
            .iter()
            .map(|&angle| [angle.cos() / r, angle.sin() / r, l / r])
            .collect();
        Self { rows }
    }

    pub fn wheel_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[[f32; 3]] {
        &self.rows
    }

    /// Checked matrix-vector product for raw slices. A length other than 3
    /// is a wiring bug between components, surfaced as DimensionMismatch.
    pub fn apply(&self, velocity: &[f32]) -> Result<Vec<f32>> {
        if velocity.len() != 3 {
            return Err(KinematicsError::DimensionMismatch {
                expected: 3,
                got: velocity.len(),
            });
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row[0] * velocity[0] + row[1] * velocity[1] + row[2] * velocity[2])
            .collect())
    }
}
