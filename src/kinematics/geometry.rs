// Wheel layout geometry for 3- and 4-wheel omni bases
//
// Wheels sit on a circle of radius `center_distance`, mounted tangentially
// at evenly spaced angles (360 / wheel count) from a configurable phase.

use super::{KinematicsError, Result};

/// Default physical constants for the reference platform (meters)
pub const DEFAULT_WHEEL_RADIUS: f32 = 0.148;
pub const DEFAULT_CENTER_DISTANCE: f32 = 0.195;
pub const DEFAULT_WHEEL_WIDTH: f32 = 0.044;

/// Supported wheel layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelLayout {
    Three,
    Four,
}

impl WheelLayout {
    pub fn from_wheel_count(count: usize) -> Result<Self> {
        match count {
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            _ => Err(KinematicsError::UnsupportedWheelCount { count }),
        }
    }

    pub fn wheel_count(self) -> usize {
        match self {
            Self::Three => 3,
            Self::Four => 4,
        }
    }

    /// Default mount phase in degrees: 60/180/300 for three wheels,
    /// 45/135/225/315 for four.
    pub fn default_phase_deg(self) -> f32 {
        match self {
            Self::Three => 60.0,
            Self::Four => 45.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Three => "3 Wheels",
            Self::Four => "4 Wheels",
        }
    }
}

/// Physical geometry of an omni base, immutable after construction
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    wheel_radius: f32,
    center_distance: f32,
    wheel_width: f32,
    wheel_angles: Vec<f32>, // radians, one per wheel
}

impl Geometry {
    /// Build a layout with its default mount phase.
    pub fn new(layout: WheelLayout, wheel_radius: f32, center_distance: f32) -> Result<Self> {
        Self::with_phase(
            layout,
            wheel_radius,
            center_distance,
            layout.default_phase_deg(),
        )
    }

    /// Build a layout with an explicit mount phase (degrees).
    pub fn with_phase(
        layout: WheelLayout,
        wheel_radius: f32,
        center_distance: f32,
        phase_deg: f32,
    ) -> Result<Self> {
        if wheel_radius <= 0.0 {
            return Err(KinematicsError::NonPositiveWheelRadius {
                value: wheel_radius,
            });
        }
        if center_distance <= 0.0 {
            return Err(KinematicsError::NonPositiveCenterDistance {
                value: center_distance,
            });
        }

        let count = layout.wheel_count();
        let spacing = 360.0 / count as f32;
        let wheel_angles = (0..count)
            .map(|i| (phase_deg + spacing * i as f32).to_radians())
            .collect();

        Ok(Self {
            wheel_radius,
            center_distance,
            wheel_width: DEFAULT_WHEEL_WIDTH,
            wheel_angles,
        })
    }

    pub fn wheel_radius(&self) -> f32 {
        self.wheel_radius
    }

    pub fn center_distance(&self) -> f32 {
        self.center_distance
    }

    /// Wheel body width, used only for drawing.
    pub fn wheel_width(&self) -> f32 {
        self.wheel_width
    }

    pub fn wheel_count(&self) -> usize {
        self.wheel_angles.len()
    }

    /// Mount angles in radians, ordered counter-clockwise from the phase.
    pub fn wheel_angles(&self) -> &[f32] {
        &self.wheel_angles
    }

    /// Wheel offsets from the robot center in the body frame.
    pub fn wheel_positions(&self) -> Vec<(f32, f32)> {
        self.wheel_angles
            .iter()
            .map(|&angle| {
                (
                    self.center_distance * angle.cos(),
                    self.center_distance * angle.sin(),
                )
            })
            .collect()
    }
}
