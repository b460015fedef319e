// Kinematic core for the omniwheel simulator
//
// Provides:
// - Wheel layout geometry (3- and 4-wheel omni configurations)
// - Jacobian construction (body velocity -> wheel angular velocity map)
// - Forward kinematics solver and polar drive conversion

pub mod geometry;
pub mod jacobian;
pub mod solver;

pub use geometry::{Geometry, WheelLayout};
pub use jacobian::Jacobian;
pub use solver::{BodyVelocity, WheelVelocities, solve};

/// Error types for kinematic configuration and solving
#[derive(Debug, thiserror::Error)]
pub enum KinematicsError {
    #[error("unsupported wheel count {count}, expected 3 or 4")]
    UnsupportedWheelCount { count: usize },

    #[error("wheel radius must be positive, got {value}")]
    NonPositiveWheelRadius { value: f32 },

    #[error("center distance must be positive, got {value}")]
    NonPositiveCenterDistance { value: f32 },

    #[error("dimension mismatch: expected {expected} velocity components, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, KinematicsError>;
