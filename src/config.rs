//! Editor configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::grid::{DEFAULT_CELL_SCALE, thing_scale};
use crate::plan::Limits;

/// Largest canvas side in pixels.
pub const MAX_CANVAS_SIDE: i32 = 16384;

#[derive(Debug, Clone)]
pub struct Config {
    /// Side of a room cell in canvas pixels.
    pub cell_scale: i32,
    /// Grid size in cells; the canvas gets one extra pixel for the last line.
    pub columns: i32,
    pub rows: i32,
    pub limits: Limits,
    /// Path pre-filled in the export tool.
    pub export_path: PathBuf,
    pub frame_delay: FrameDelays,
}

/// Sleep between frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameDelays {
    pub default: Duration,
    pub absent: Duration,
    pub motion: Duration,
}

impl FrameDelays {
    pub fn pick(&self, has_focus: bool, pointer_moved: bool) -> Duration {
        match (has_focus, pointer_moved) {
            (false, _) => self.absent,
            (true, true) => self.motion,
            (true, false) => self.default,
        }
    }
}

impl Default for FrameDelays {
    fn default() -> Self {
        Self {
            default: Duration::from_millis(30),
            absent: Duration::from_millis(70),
            motion: Duration::from_millis(15),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_scale: DEFAULT_CELL_SCALE,
            columns: 32,
            rows: 22,
            limits: Limits::default(),
            export_path: PathBuf::from("./plans/t"),
            frame_delay: FrameDelays::default(),
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_ms(key: &str, default: Duration) -> Duration {
    Duration::from_millis(env_or(key, default.as_millis() as u64))
}

/// Clamp the grid to sane minimums and reject grids whose canvas would not
/// fit in `MAX_CANVAS_SIDE`.
fn checked_grid(cell_scale: i32, columns: i32, rows: i32) -> Option<(i32, i32, i32)> {
    let (cell_scale, columns, rows) = (cell_scale.max(4), columns.max(1), rows.max(1));
    let side = |cells: i32| cell_scale.checked_mul(cells)?.checked_add(1);
    match (side(columns), side(rows)) {
        (Some(w), Some(h)) if w <= MAX_CANVAS_SIDE && h <= MAX_CANVAS_SIDE => {
            Some((cell_scale, columns, rows))
        }
        _ => None,
    }
}

impl Config {
    pub fn from_env() -> Self {
        let d = Self::default();
        let (cell_scale, columns, rows) = checked_grid(
            env_or("BASILISK_CELL_SCALE", d.cell_scale),
            env_or("BASILISK_GRID_COLUMNS", d.columns),
            env_or("BASILISK_GRID_ROWS", d.rows),
        )
        .unwrap_or_else(|| {
            warn!(
                max_side = MAX_CANVAS_SIDE,
                "grid settings give an unusable canvas, using the defaults"
            );
            (d.cell_scale, d.columns, d.rows)
        });
        Self {
            cell_scale,
            columns,
            rows,
            limits: Limits {
                rooms: env_or("BASILISK_MAX_ROOMS", d.limits.rooms),
                walls: env_or("BASILISK_MAX_WALLS", d.limits.walls),
                things: env_or("BASILISK_MAX_THINGS", d.limits.things),
            },
            export_path: std::env::var_os("BASILISK_EXPORT_PATH")
                .map(PathBuf::from)
                .unwrap_or(d.export_path),
            frame_delay: FrameDelays {
                default: env_ms("BASILISK_DELAY_DEFAULT", d.frame_delay.default),
                absent: env_ms("BASILISK_DELAY_ABSENT", d.frame_delay.absent),
                motion: env_ms("BASILISK_DELAY_MOTION", d.frame_delay.motion),
            },
        }
    }

    #[inline]
    pub fn thing_scale(&self) -> i32 {
        thing_scale(self.cell_scale)
    }

    pub fn canvas_size(&self) -> (usize, usize) {
        (
            (self.cell_scale * self.columns + 1) as usize,
            (self.cell_scale * self.rows + 1) as usize,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_canvas_matches_grid() {
        let config = Config::default();
        assert_eq!(config.canvas_size(), (1025, 705));
        assert_eq!(config.thing_scale(), 8);
    }

    #[test]
    fn oversized_grids_are_rejected() {
        assert_eq!(checked_grid(32, 32, 22), Some((32, 32, 22)));
        assert_eq!(checked_grid(0, -3, 0), Some((4, 1, 1)));
        assert_eq!(checked_grid(i32::MAX, 32, 22), None);
        assert_eq!(checked_grid(65536, 65536, 1), None);
        assert_eq!(checked_grid(32, 600, 22), None);
        assert_eq!(checked_grid(16, 1023, 1023), Some((16, 1023, 1023)));
    }

    #[test]
    fn frame_delay_tiers() {
        let d = FrameDelays::default();
        assert_eq!(d.pick(true, true), Duration::from_millis(15));
        assert_eq!(d.pick(true, false), Duration::from_millis(30));
        assert_eq!(d.pick(false, true), Duration::from_millis(70));
    }
}
