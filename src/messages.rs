// Message types exchanged between the simulation core and its consumers

use serde::{Deserialize, Serialize};

use crate::kinematics::{BodyVelocity, WheelVelocities};
use crate::sim::RobotPose;

/// Per-tick snapshot handed to the renderer, and the JSON-lines payload in
/// headless mode. Wheel positions are world-frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub pose: RobotPose,
    pub velocity: BodyVelocity,
    pub wheel_positions: Vec<(f32, f32)>,
    pub wheel_velocities: WheelVelocities,
    pub paused: bool,
}

/// Control input from the keyboard -> runtime
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Space: pause or resume every rig
    TogglePause,
    /// Arrow keys: add to the commanded angular velocity (rad/s)
    AdjustOmega(f32),
    /// q / Esc: leave the loop
    Quit,
}
