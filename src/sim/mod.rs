// Simulation layer for the omniwheel base
//
// Provides:
// - Pose integration and the pause state machine
// - Scripted demo drive (oscillating speed, sweeping drive direction)
// - Per-tick snapshot sampling for renderers

mod drive;
mod sampler;
mod state;

pub use drive::ScriptedDrive;
pub use sampler::sample;
pub use state::{RobotPose, RunState, SimulationState};
