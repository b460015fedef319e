// Simulation state: forward-Euler pose integration and pause/resume

use serde::{Deserialize, Serialize};

use crate::kinematics::BodyVelocity;

/// Robot pose in the world frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RobotPose {
    pub x: f32,
    pub y: f32,
    /// Radians, counter-clockwise from +X
    pub heading: f32,
}

/// Whether ticks advance the pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

/// Owns the robot pose and the commanded body velocity.
///
/// The pose is only ever mutated by `advance`; observers receive copies.
/// Velocity updates are accepted in both run states without transitioning.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pose: RobotPose,
    velocity: BodyVelocity,
    run_state: RunState,
}

impl SimulationState {
    /// Start at the origin, stationary, running.
    pub fn new() -> Self {
        Self::with_velocity(BodyVelocity::default())
    }

    pub fn with_velocity(velocity: BodyVelocity) -> Self {
        Self {
            pose: RobotPose::default(),
            velocity,
            run_state: RunState::Running,
        }
    }

    pub fn pose(&self) -> RobotPose {
        self.pose
    }

    pub fn velocity(&self) -> BodyVelocity {
        self.velocity
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_paused(&self) -> bool {
        self.run_state == RunState::Paused
    }

    pub fn set_velocity(&mut self, velocity: BodyVelocity) {
        self.velocity = velocity;
    }

    pub fn pause(&mut self) {
        self.run_state = RunState::Paused;
    }

    pub fn resume(&mut self) {
        self.run_state = RunState::Running;
    }

    pub fn toggle_pause(&mut self) {
        self.run_state = match self.run_state {
            RunState::Running => RunState::Paused,
            RunState::Paused => RunState::Running,
        };
    }

    /// Integrate the commanded velocity over `dt` seconds.
    ///
    /// Forward Euler in the world frame: the commanded translation applies
    /// directly, without rotation by the current heading. While paused this
    /// is an exact no-op.
    pub fn advance(&mut self, dt: f32) {
        if self.run_state == RunState::Paused {
            return;
        }
        self.pose.x += self.velocity.vx * dt;
        self.pose.y += self.velocity.vy * dt;
        self.pose.heading += self.velocity.omega * dt;
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euler_integration() {
        let mut state = SimulationState::with_velocity(BodyVelocity::new(1.0, 0.0, 0.0));
        for _ in 0..10 {
            state.advance(0.1);
        }
        let pose = state.pose();
        assert!((pose.x - 1.0).abs() < 1e-5);
        assert!(pose.y.abs() < 1e-6);
        assert!(pose.heading.abs() < 1e-6);
    }

    #[test]
    fn test_heading_integrates_omega() {
        let mut state = SimulationState::with_velocity(BodyVelocity::new(0.0, 0.0, 0.5));
        for _ in 0..4 {
            state.advance(0.05);
        }
        assert!((state.pose().heading - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_paused_advance_is_exact_noop() {
        let mut state = SimulationState::with_velocity(BodyVelocity::new(0.3, -0.7, 2.0));
        state.advance(0.1);
        let before = state.pose();

        state.pause();
        for _ in 0..100 {
            state.advance(0.1);
        }
        let after = state.pose();
        assert_eq!(before.x.to_bits(), after.x.to_bits());
        assert_eq!(before.y.to_bits(), after.y.to_bits());
        assert_eq!(before.heading.to_bits(), after.heading.to_bits());
    }

    #[test]
    fn test_pause_resume_transitions() {
        let mut state = SimulationState::new();
        assert_eq!(state.run_state(), RunState::Running);

        state.pause();
        assert_eq!(state.run_state(), RunState::Paused);
        state.pause();
        assert_eq!(state.run_state(), RunState::Paused);

        state.resume();
        assert_eq!(state.run_state(), RunState::Running);

        state.toggle_pause();
        assert!(state.is_paused());
        state.toggle_pause();
        assert!(!state.is_paused());
    }

    #[test]
    fn test_velocity_update_accepted_while_paused() {
        let mut state = SimulationState::new();
        state.pause();
        state.set_velocity(BodyVelocity::new(1.0, 0.0, 0.0));

        // Still paused, still at the origin.
        assert!(state.is_paused());
        state.advance(1.0);
        assert_eq!(state.pose(), RobotPose::default());

        // The stored command takes effect once resumed.
        state.resume();
        state.advance(1.0);
        assert!((state.pose().x - 1.0).abs() < 1e-6);
    }
}
