// Scripted demo drive
//
// Reproduces the reference animation: speed breathes between 0 and 1 as
// 0.5 * (1 + sin(t deg)), the drive direction sweeps one degree per frame,
// omega stays at the configured value until adjusted live.

use crate::kinematics::BodyVelocity;

pub struct ScriptedDrive {
    omega: f32,
    frame: u32,
}

impl ScriptedDrive {
    pub fn new(omega: f32) -> Self {
        Self { omega, frame: 0 }
    }

    pub fn omega(&self) -> f32 {
        self.omega
    }

    pub fn set_omega(&mut self, omega: f32) {
        self.omega = omega;
    }

    /// Produce the next frame's command. `heading` is the robot's current
    /// world heading in radians; the sweep pattern itself is periodic over
    /// 360 frames.
    pub fn next_command(&mut self, heading: f32) -> BodyVelocity {
        let t = self.frame as f32;
        self.frame = (self.frame + 1) % 360;

        let speed = 0.5 * (1.0 + t.to_radians().sin());
        BodyVelocity::from_polar(speed, t, heading.to_degrees(), self.omega)
    }
}
