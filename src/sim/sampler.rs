// Per-tick snapshot assembly
//
// Wheel offsets are rotated by the current heading and translated by the
// pose, so renderers see world-frame positions and never touch the geometry.

use crate::kinematics::{Geometry, Jacobian, solve};
use crate::messages::FrameSnapshot;

use super::state::SimulationState;

/// Sample one frame: pose, world-frame wheel positions, wheel velocities.
pub fn sample(geometry: &Geometry, jacobian: &Jacobian, state: &SimulationState) -> FrameSnapshot {
    let pose = state.pose();
    let velocity = state.velocity();
    let (sin_h, cos_h) = pose.heading.sin_cos();

    let wheel_positions = geometry
        .wheel_positions()
        .iter()
        .map(|&(x, y)| {
            (
                pose.x + x * cos_h - y * sin_h,
                pose.y + x * sin_h + y * cos_h,
            )
        })
        .collect();

    FrameSnapshot {
        pose,
        velocity,
        wheel_positions,
        wheel_velocities: solve(jacobian, velocity),
        paused: state.is_paused(),
    }
}
