// Fixed-rate simulation loop
//
// Each tick: drain pending keyboard events, apply them to every rig, advance
// each rig by dt, then hand the snapshots to the terminal renderer (or print
// them as JSON lines in headless mode).

use std::time::Duration;

use tokio::time::interval;
use tracing::{debug, info};

use crate::config::Options;
use crate::input;
use crate::kinematics::{BodyVelocity, Geometry, Jacobian, KinematicsError, WheelLayout};
use crate::messages::{ControlEvent, FrameSnapshot};
use crate::render::{PanelConfig, Screen};
use crate::sim::{ScriptedDrive, SimulationState, sample};

/// One complete simulation core: geometry, its Jacobian, and mutable state.
///
/// Dual-configuration mode runs two of these side by side with nothing
/// shared between them.
pub struct Rig {
    layout: WheelLayout,
    geometry: Geometry,
    jacobian: Jacobian,
    state: SimulationState,
    drive: Option<ScriptedDrive>,
}

impl Rig {
    /// Rig animated by the scripted demo drive.
    pub fn scripted(
        layout: WheelLayout,
        wheel_radius: f32,
        center_distance: f32,
        phase_deg: Option<f32>,
        omega: f32,
    ) -> Result<Self, KinematicsError> {
        let mut rig = Self::manual(layout, wheel_radius, center_distance, phase_deg)?;
        rig.drive = Some(ScriptedDrive::new(omega));
        Ok(rig)
    }

    /// Rig driven only through `set_velocity`.
    pub fn manual(
        layout: WheelLayout,
        wheel_radius: f32,
        center_distance: f32,
        phase_deg: Option<f32>,
    ) -> Result<Self, KinematicsError> {
        let phase = phase_deg.unwrap_or_else(|| layout.default_phase_deg());
        let geometry = Geometry::with_phase(layout, wheel_radius, center_distance, phase)?;
        let jacobian = Jacobian::from_geometry(&geometry);
        Ok(Self {
            layout,
            geometry,
            jacobian,
            state: SimulationState::new(),
            drive: None,
        })
    }

    pub fn layout(&self) -> WheelLayout {
        self.layout
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn set_velocity(&mut self, velocity: BodyVelocity) {
        self.state.set_velocity(velocity);
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Apply a control event. Quit is handled by the loop, not the rig.
    pub fn apply(&mut self, event: ControlEvent) {
        match event {
            ControlEvent::TogglePause => self.state.toggle_pause(),
            ControlEvent::AdjustOmega(delta) => {
                let mut velocity = self.state.velocity();
                velocity.omega += delta;
                self.state.set_velocity(velocity);
                if let Some(drive) = &mut self.drive {
                    let omega = drive.omega() + delta;
                    drive.set_omega(omega);
                }
            }
            ControlEvent::Quit => {}
        }
    }

    /// Advance one tick and sample the frame for rendering.
    ///
    /// The scripted drive freezes with the pose while paused, so resuming
    /// continues the animation where it stopped.
    pub fn tick(&mut self, dt: f32) -> FrameSnapshot {
        if !self.state.is_paused() {
            if let Some(drive) = &mut self.drive {
                let command = drive.next_command(self.state.pose().heading);
                self.state.set_velocity(command);
            }
        }
        self.state.advance(dt);
        sample(&self.geometry, &self.jacobian, &self.state)
    }
}

fn build_rigs(opts: &Options) -> Result<Vec<Rig>, KinematicsError> {
    let scripted = |layout| {
        Rig::scripted(
            layout,
            opts.wheel_radius,
            opts.center_distance,
            opts.phase_deg,
            opts.omega,
        )
    };

    if opts.both {
        Ok(vec![
            scripted(WheelLayout::Three)?,
            scripted(WheelLayout::Four)?,
        ])
    } else {
        let layout = WheelLayout::from_wheel_count(opts.wheels)?;
        Ok(vec![scripted(layout)?])
    }
}

pub async fn run(opts: Options) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    if opts.rate_hz == 0 || opts.rate_hz > 1000 {
        return Err("tick rate must be between 1 and 1000 Hz".into());
    }

    let rigs = build_rigs(&opts)?;
    let dt = 1.0 / opts.rate_hz as f32;
    let limit = opts.tick_limit();

    info!(
        "Simulation started: {} rig(s), {}Hz loop, dt={:.3}s",
        rigs.len(),
        opts.rate_hz,
        dt
    );

    if opts.headless {
        run_headless(rigs, opts.rate_hz, dt, limit).await
    } else {
        run_interactive(rigs, opts.rate_hz, dt, limit).await
    }
}

/// JSON lines on stdout, one snapshot per rig per tick.
async fn run_headless(
    mut rigs: Vec<Rig>,
    rate_hz: u64,
    dt: f32,
    limit: u64,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut tick = interval(Duration::from_millis(1000 / rate_hz));
    let mut count = 0u64;

    loop {
        tick.tick().await;

        for rig in &mut rigs {
            let snapshot = rig.tick(dt);
            println!("{}", serde_json::to_string(&snapshot)?);
        }

        count += 1;
        if limit > 0 && count >= limit {
            break;
        }
    }

    info!("Headless run complete after {} ticks", count);
    Ok(())
}

/// Terminal rendering with live keyboard control.
async fn run_interactive(
    mut rigs: Vec<Rig>,
    rate_hz: u64,
    dt: f32,
    limit: u64,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let panels = rigs
        .iter()
        .map(|rig| PanelConfig::new(rig.layout(), rig.geometry()))
        .collect();
    let mut screen = Screen::new(panels)?;
    let mut tick = interval(Duration::from_millis(1000 / rate_hz));
    let mut count = 0u64;

    'sim: loop {
        tick.tick().await;

        // Drain all pending key presses before advancing.
        for event in input::poll_events()? {
            debug!("Control event: {:?}", event);
            if event == ControlEvent::Quit {
                break 'sim;
            }
            for rig in &mut rigs {
                rig.apply(event);
            }
        }

        let frames: Vec<FrameSnapshot> = rigs.iter_mut().map(|rig| rig.tick(dt)).collect();
        screen.draw(&frames)?;

        count += 1;
        if limit > 0 && count >= limit {
            break;
        }
    }

    drop(screen);
    info!("Simulation stopped after {} ticks", count);
    Ok(())
}
