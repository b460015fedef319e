// Terminal renderer: ASCII canvas of the robot body, wheels, and velocity
// arrows, one panel per rig
//
// Consumes FrameSnapshots plus the read-only geometry captured at startup;
// the viewport tracks the robot center, so the pose shows up numerically in
// the info box and as rotation of the wheel ring.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::kinematics::{Geometry, WheelLayout};
use crate::messages::FrameSnapshot;

/// Canvas cells per panel
pub const PANEL_WIDTH: usize = 58;
pub const PANEL_HEIGHT: usize = 26;
const PANEL_GAP: usize = 4;

/// World window mapped onto a panel (meters), robot-centered
const X_MIN: f32 = -0.4;
const X_MAX: f32 = 0.4;
const Y_MIN: f32 = -0.3;
const Y_MAX: f32 = 0.4;

/// Wheel speed that maps to a full-length velocity arrow (rad/s)
const MAX_WHEEL_OMEGA: f32 = 6.0;
/// Arrows below these magnitudes are not drawn
const MIN_ARROW_OMEGA: f32 = 0.1;
const MIN_ARROW_SPEED: f32 = 0.01;

/// Static per-panel render parameters, captured from the read-only geometry
/// before the loop starts.
pub struct PanelConfig {
    title: String,
    body_radius: f32,
    wheel_radius: f32,
}

impl PanelConfig {
    pub fn new(layout: WheelLayout, geometry: &Geometry) -> Self {
        Self {
            title: format!("Jacobian Omnidirectional - {}", layout.label()),
            body_radius: geometry.center_distance(),
            wheel_radius: geometry.wheel_radius(),
        }
    }
}

/// Raw-mode alternate-screen terminal session. Dropping it restores the
/// terminal even when the loop exits early.
pub struct Screen {
    out: Stdout,
    panels: Vec<PanelConfig>,
}

impl Screen {
    pub fn new(panels: Vec<PanelConfig>) -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { out, panels })
    }

    /// Redraw every panel from this tick's snapshots (ordered as the panels).
    pub fn draw(&mut self, frames: &[FrameSnapshot]) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;

        for (i, (panel, snapshot)) in self.panels.iter().zip(frames).enumerate() {
            let x0 = (i * (PANEL_WIDTH + PANEL_GAP)) as u16;
            let title_col = x0 + ((PANEL_WIDTH.saturating_sub(panel.title.len())) / 2) as u16;
            queue!(self.out, cursor::MoveTo(title_col, 0), Print(&panel.title))?;

            for (row, line) in render_grid(panel, snapshot).iter().enumerate() {
                queue!(self.out, cursor::MoveTo(x0, (row + 1) as u16), Print(line))?;
            }
        }

        queue!(
            self.out,
            cursor::MoveTo(0, (PANEL_HEIGHT + 2) as u16),
            Print("space: pause/resume   up/down: omega   q: quit")
        )?;
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

struct Canvas {
    cells: Vec<Vec<char>>,
}

impl Canvas {
    fn new() -> Self {
        Self {
            cells: vec![vec![' '; PANEL_WIDTH]; PANEL_HEIGHT],
        }
    }

    /// Plot a robot-centered world coordinate; off-window points are dropped.
    fn plot(&mut self, x: f32, y: f32, glyph: char) {
        if !(X_MIN..=X_MAX).contains(&x) || !(Y_MIN..=Y_MAX).contains(&y) {
            return;
        }
        let col = ((x - X_MIN) / (X_MAX - X_MIN) * (PANEL_WIDTH - 1) as f32).round() as usize;
        let row = ((Y_MAX - y) / (Y_MAX - Y_MIN) * (PANEL_HEIGHT - 1) as f32).round() as usize;
        self.cells[row.min(PANEL_HEIGHT - 1)][col.min(PANEL_WIDTH - 1)] = glyph;
    }

    /// Short arrow: shaft of '*' with a head picked from the dominant axis.
    fn arrow(&mut self, x: f32, y: f32, dir_x: f32, dir_y: f32, length: f32) {
        let steps = 4;
        for step in 1..=steps {
            let frac = step as f32 / steps as f32;
            let glyph = if step == steps {
                if dir_x.abs() >= dir_y.abs() {
                    if dir_x >= 0.0 { '>' } else { '<' }
                } else if dir_y >= 0.0 {
                    '^'
                } else {
                    'v'
                }
            } else {
                '*'
            };
            self.plot(x + dir_x * length * frac, y + dir_y * length * frac, glyph);
        }
    }

    fn overlay_text(&mut self, row: usize, text: &str) {
        if row >= PANEL_HEIGHT {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            if i + 1 >= PANEL_WIDTH {
                break;
            }
            self.cells[row][i + 1] = ch;
        }
    }

    fn into_lines(self) -> Vec<String> {
        self.cells.into_iter().map(String::from_iter).collect()
    }
}

/// Build one panel's character grid. Pure, so it is testable without a
/// terminal.
pub fn render_grid(panel: &PanelConfig, snapshot: &FrameSnapshot) -> Vec<String> {
    let mut canvas = Canvas::new();
    let pose = snapshot.pose;

    // Body outline and center marker.
    for i in 0..128 {
        let angle = i as f32 / 128.0 * std::f32::consts::TAU;
        canvas.plot(
            panel.body_radius * angle.cos(),
            panel.body_radius * angle.sin(),
            '.',
        );
    }
    canvas.plot(0.0, 0.0, '+');

    // Forward marker on the rim.
    canvas.plot(
        panel.body_radius * pose.heading.cos(),
        panel.body_radius * pose.heading.sin(),
        'o',
    );

    // Drive direction arrow from the center, scaled by speed.
    let speed = snapshot.velocity.speed();
    if speed > MIN_ARROW_SPEED {
        let dir = snapshot
            .velocity
            .drive_direction_deg(pose.heading.to_degrees())
            .to_radians();
        canvas.arrow(
            0.0,
            0.0,
            dir.cos(),
            dir.sin(),
            panel.body_radius * 0.9 * speed.min(1.0),
        );
    }

    // Wheels: tangential segment, index digit, velocity arrow.
    for (i, &(wx, wy)) in snapshot.wheel_positions.iter().enumerate() {
        let x = wx - pose.x;
        let y = wy - pose.y;
        let radial = y.atan2(x);
        let (tan_x, tan_y) = (-radial.sin(), radial.cos());

        for frac in [-0.5f32, -0.25, 0.25, 0.5] {
            canvas.plot(
                x + tan_x * panel.wheel_radius * frac,
                y + tan_y * panel.wheel_radius * frac,
                '#',
            );
        }
        canvas.plot(x, y, char::from_digit(i as u32, 10).unwrap_or('?'));

        let omega = snapshot.wheel_velocities.as_slice()[i];
        if omega.abs() >= MIN_ARROW_OMEGA {
            // Positive wheel speed points against the tangent, as on the
            // reference platform.
            let sign = if omega < 0.0 { 1.0 } else { -1.0 };
            let length = (omega.abs() / MAX_WHEEL_OMEGA).min(1.0) * panel.body_radius * 0.35;
            let base = 1.0 + 0.04 / panel.body_radius;
            canvas.arrow(x * base, y * base, sign * tan_x, sign * tan_y, length);
        }
    }

    // Info box, top-left like the reference display.
    let heading_deg = pose.heading.to_degrees().rem_euclid(360.0);
    let drive_deg = snapshot
        .velocity
        .drive_direction_deg(heading_deg)
        .rem_euclid(360.0);
    let wheel_list = snapshot
        .wheel_velocities
        .as_slice()
        .iter()
        .map(|w| format!("{w:.1}"))
        .collect::<Vec<_>>()
        .join(", ");

    canvas.overlay_text(1, &format!("orient = {heading_deg:6.1} deg"));
    canvas.overlay_text(2, &format!("drive  = {drive_deg:6.1} deg"));
    canvas.overlay_text(3, &format!("speed  = {speed:5.2} m/s"));
    canvas.overlay_text(4, &format!("w = [{wheel_list}] rad/s"));
    canvas.overlay_text(5, &format!("pose = ({:+.2}, {:+.2})", pose.x, pose.y));
    if snapshot.paused {
        canvas.overlay_text(6, "PAUSED");
    }

    canvas.into_lines()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::{BodyVelocity, Jacobian};
    use crate::sim::{SimulationState, sample};

    fn snapshot(layout: WheelLayout, velocity: BodyVelocity, paused: bool) -> FrameSnapshot {
        let geometry = Geometry::new(layout, 0.148, 0.195).unwrap();
        let jacobian = Jacobian::from_geometry(&geometry);
        let mut state = SimulationState::with_velocity(velocity);
        if paused {
            state.pause();
        }
        sample(&geometry, &jacobian, &state)
    }

    #[test]
    fn test_grid_dimensions() {
        let geometry = Geometry::new(WheelLayout::Three, 0.148, 0.195).unwrap();
        let panel = PanelConfig::new(WheelLayout::Three, &geometry);
        let grid = render_grid(&panel, &snapshot(WheelLayout::Three, BodyVelocity::default(), false));

        assert_eq!(grid.len(), PANEL_HEIGHT);
        for line in &grid {
            assert_eq!(line.chars().count(), PANEL_WIDTH);
        }
    }

    #[test]
    fn test_grid_labels_every_wheel() {
        let geometry = Geometry::new(WheelLayout::Four, 0.148, 0.195).unwrap();
        let panel = PanelConfig::new(WheelLayout::Four, &geometry);
        let grid = render_grid(&panel, &snapshot(WheelLayout::Four, BodyVelocity::default(), false));
        let joined = grid.join("\n");

        for digit in ["0", "1", "2", "3"] {
            assert!(joined.contains(digit), "missing wheel label {digit}");
        }
    }

    #[test]
    fn test_grid_shows_pause_marker() {
        let geometry = Geometry::new(WheelLayout::Three, 0.148, 0.195).unwrap();
        let panel = PanelConfig::new(WheelLayout::Three, &geometry);

        let running = render_grid(
            &panel,
            &snapshot(WheelLayout::Three, BodyVelocity::default(), false),
        )
        .join("\n");
        let paused = render_grid(
            &panel,
            &snapshot(WheelLayout::Three, BodyVelocity::default(), true),
        )
        .join("\n");

        assert!(!running.contains("PAUSED"));
        assert!(paused.contains("PAUSED"));
    }
}
