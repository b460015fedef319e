// Forward kinematics: project body velocity through the Jacobian
//
// Also holds the polar drive conversion: a speed plus a drive direction in
// degrees becomes a body-frame velocity through a +90 degree frame rotation,
// matching the reference platform's steering convention.

use serde::{Deserialize, Serialize};

use super::jacobian::Jacobian;

/// Commanded body-frame velocity
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyVelocity {
    /// Forward velocity (m/s)
    pub vx: f32,
    /// Lateral velocity (m/s)
    pub vy: f32,
    /// Angular velocity (rad/s, positive counter-clockwise)
    pub omega: f32,
}

impl BodyVelocity {
    pub fn new(vx: f32, vy: f32, omega: f32) -> Self {
        Self { vx, vy, omega }
    }

    /// Convert a polar drive command into body-frame velocities.
    ///
    /// `angle_deg` is the drive direction and `orientation_deg` the robot's
    /// current orientation, both in degrees (0 = +X, counter-clockwise).
    /// The direction is taken relative to the orientation, then rotated +90
    /// degrees into the wheel frame.
    pub fn from_polar(speed: f32, angle_deg: f32, orientation_deg: f32, omega: f32) -> Self {
        let relative = (angle_deg - orientation_deg).to_radians();
        let forward = speed * relative.cos();
        let lateral = speed * relative.sin();
        Self {
            vx: -lateral,
            vy: forward,
            omega,
        }
    }

    /// Translational speed magnitude (m/s).
    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }

    /// Recover the drive direction in degrees, inverting `from_polar` for a
    /// robot at `orientation_deg`. Zero when not translating.
    pub fn drive_direction_deg(&self, orientation_deg: f32) -> f32 {
        if self.speed() < f32::EPSILON {
            return 0.0;
        }
        orientation_deg + (-self.vx).atan2(self.vy).to_degrees()
    }
}

/// Wheel angular velocities (rad/s), ordered as the geometry's wheel angles
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelVelocities(pub Vec<f32>);

impl WheelVelocities {
    pub fn zero(wheel_count: usize) -> Self {
        Self(vec![0.0; wheel_count])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

/// Compute wheel angular velocities for a body velocity command.
///
/// Infallible for the typed three-component input; recomputed every tick
/// rather than cached since the command may change between ticks.
pub fn solve(jacobian: &Jacobian, velocity: BodyVelocity) -> WheelVelocities {
    let values = jacobian
        .rows()
        .iter()
        .map(|row| row[0] * velocity.vx + row[1] * velocity.vy + row[2] * velocity.omega)
        .collect();
    WheelVelocities(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::geometry::{Geometry, WheelLayout};

    #[test]
    fn test_zero_velocity_zero_wheels() {
        for layout in [WheelLayout::Three, WheelLayout::Four] {
            let geometry = Geometry::new(layout, 0.148, 0.195).unwrap();
            let jacobian = Jacobian::from_geometry(&geometry);
            let wheels = solve(&jacobian, BodyVelocity::default());
            assert_eq!(wheels, WheelVelocities::zero(layout.wheel_count()));
        }
    }

    #[test]
    fn test_forward_velocity_projects_cosine() {
        let geometry = Geometry::new(WheelLayout::Four, 0.148, 0.195).unwrap();
        let jacobian = Jacobian::from_geometry(&geometry);
        let wheels = solve(&jacobian, BodyVelocity::new(0.7, 0.0, 0.0));

        for (value, &angle) in wheels.as_slice().iter().zip(geometry.wheel_angles()) {
            assert!((value - 0.7 * angle.cos() / 0.148).abs() < 1e-5);
        }
    }

    #[test]
    fn test_standard_three_wheel_scenario() {
        // r = 0.05, L = 0.2, wheels at 90/210/330 degrees, driving +X at 1 m/s:
        // wheel speeds are cos(angle)/r = [0, -17.3205, 17.3205] rad/s.
        let geometry = Geometry::with_phase(WheelLayout::Three, 0.05, 0.2, 90.0).unwrap();
        let jacobian = Jacobian::from_geometry(&geometry);
        let wheels = solve(&jacobian, BodyVelocity::new(1.0, 0.0, 0.0));

        let expected = [0.0, -17.320509, 17.320509];
        for (value, target) in wheels.as_slice().iter().zip(expected) {
            assert!(
                (value - target).abs() < 1e-3,
                "wheel speed {value}, expected {target}"
            );
        }
    }

    #[test]
    fn test_pure_rotation_spins_all_wheels_equally() {
        let geometry = Geometry::new(WheelLayout::Three, 0.148, 0.195).unwrap();
        let jacobian = Jacobian::from_geometry(&geometry);
        let wheels = solve(&jacobian, BodyVelocity::new(0.0, 0.0, 2.0));

        let expected = 2.0 * 0.195 / 0.148;
        for value in wheels.as_slice() {
            assert!((value - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_solve_is_reproducible() {
        let geometry = Geometry::new(WheelLayout::Four, 0.148, 0.195).unwrap();
        let jacobian = Jacobian::from_geometry(&geometry);
        let velocity = BodyVelocity::new(0.3, -0.2, 1.1);
        assert_eq!(solve(&jacobian, velocity), solve(&jacobian, velocity));
    }

    #[test]
    fn test_polar_conversion_rotates_frame() {
        // Speed 1 toward +X with zero orientation lands on +Y after the
        // 90 degree wheel-frame rotation.
        let v = BodyVelocity::from_polar(1.0, 0.0, 0.0, 0.0);
        assert!(v.vx.abs() < 1e-6);
        assert!((v.vy - 1.0).abs() < 1e-6);

        // Orientation subtracts from the drive direction.
        let v = BodyVelocity::from_polar(1.0, 90.0, 90.0, 0.0);
        assert!(v.vx.abs() < 1e-6);
        assert!((v.vy - 1.0).abs() < 1e-6);

        let v = BodyVelocity::from_polar(1.0, 90.0, 0.0, 0.0);
        assert!((v.vx + 1.0).abs() < 1e-6);
        assert!(v.vy.abs() < 1e-6);
    }

    #[test]
    fn test_polar_round_trip() {
        let v = BodyVelocity::from_polar(0.8, 130.0, 40.0, 0.5);
        assert!((v.speed() - 0.8).abs() < 1e-5);
        assert!((v.drive_direction_deg(40.0) - 130.0).abs() < 1e-3);
    }
}
