// Tick rate, run-length defaults, and command-line options

use clap::Parser;

use crate::kinematics::geometry::{DEFAULT_CENTER_DISTANCE, DEFAULT_WHEEL_RADIUS};

/// Simulation loop frequency (Hz); dt is 1 / rate
pub const DEFAULT_RATE_HZ: u64 = 20;

/// Headless runs stop after this many ticks unless --ticks says otherwise
pub const DEFAULT_HEADLESS_TICKS: u64 = 200;

/// Command-line options. The physical configuration is validated by the
/// kinematics layer before any loop starts.
#[derive(Debug, Parser)]
#[command(
    name = "omniwheel-sim",
    about = "Omnidirectional wheel kinematics simulator"
)]
pub struct Options {
    /// Wheel count (3 or 4)
    #[arg(long, default_value_t = 3)]
    pub wheels: usize,

    /// Initial angular velocity (rad/s)
    #[arg(long, default_value_t = 0.0)]
    pub omega: f32,

    /// Run the 3- and 4-wheel configurations side by side
    #[arg(long)]
    pub both: bool,

    /// Wheel radius (m)
    #[arg(long, default_value_t = DEFAULT_WHEEL_RADIUS)]
    pub wheel_radius: f32,

    /// Center-to-wheel distance (m)
    #[arg(long, default_value_t = DEFAULT_CENTER_DISTANCE)]
    pub center_distance: f32,

    /// Wheel mount phase offset (degrees); layout default when omitted
    #[arg(long)]
    pub phase_deg: Option<f32>,

    /// Tick rate (Hz)
    #[arg(long, default_value_t = DEFAULT_RATE_HZ)]
    pub rate_hz: u64,

    /// Emit JSON snapshots on stdout instead of rendering
    #[arg(long)]
    pub headless: bool,

    /// Stop after this many ticks (0 = run until quit)
    #[arg(long)]
    pub ticks: Option<u64>,
}

impl Options {
    /// Tick limit for this run; 0 means unbounded.
    pub fn tick_limit(&self) -> u64 {
        match self.ticks {
            Some(n) => n,
            None if self.headless => DEFAULT_HEADLESS_TICKS,
            None => 0,
        }
    }
}
