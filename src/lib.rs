//! Coffin Guard - defend nine coffins against falling crosses
//!
//! Core modules:
//! - `sim`: Round simulation (selection, attacks, collisions, scoring)
//! - `scene`: Binding between simulation state and an external transform graph
//! - `hud`: Text overlay snapshot for the presentation layer
//! - `settings`: Data-driven round tuning

pub mod hud;
pub mod scene;
pub mod settings;
pub mod sim;

pub use hud::HudText;
pub use scene::{Scene, SceneBinding, SceneError, SceneGraph};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Coffins per grid side
    pub const GRID_SIDE: usize = 3;
    /// Total grid cells
    pub const CELL_COUNT: usize = GRID_SIDE * GRID_SIDE;
    /// Life slots per coffin
    pub const LIVES_PER_COFFIN: usize = 3;
    /// Centre cell, selected at round start
    pub const START_CELL: usize = 4;

    /// Round length in seconds
    pub const ROUND_DURATION: f32 = 90.0;
    /// Remaining time below which attacks speed up
    pub const RAMP_THRESHOLD: f32 = 60.0;
    /// Seconds between attacks before the ramp
    pub const ATTACK_INTERVAL: f32 = 3.0;
    /// Shortest interval the ramp can reach
    pub const ATTACK_INTERVAL_FLOOR: f32 = 1.5;
    /// Intro (covers opening) duration in seconds
    pub const INTRO_DURATION: f32 = 3.0;

    /// Distance a cross travels from rest to its strike depth
    pub const CROSS_TRAVEL: f32 = 6.2;
    /// Cross speed (units/sec)
    pub const CROSS_SPEED: f32 = 1.5;

    /// Cover angle (degrees from base) when a coffin is covered
    pub const COVER_SHUT_ANGLE: f32 = 55.0;
    /// Cover opening speed during the intro (degrees/sec)
    pub const COVER_OPEN_RATE: f32 = 30.0;
    /// Box sway half-range (degrees)
    pub const BOX_SWAY_RANGE: f32 = 15.0;
    /// Box sway base speed (degrees/sec)
    pub const BOX_SWAY_SPEED: f32 = 180.0;

    /// Scale a life slot drops to when hit
    pub const HIT_SHRINK: f32 = 0.9;
    /// Life slot shrink rate after a hit (scale/sec)
    pub const LIFE_DECAY_RATE: f32 = 0.6;
    /// Life slot spin while dying (degrees/sec)
    pub const LIFE_SPIN_RATE: f32 = 600.0;

    /// Points per remaining life
    pub const SCORE_PER_LIFE: u32 = 100;
    /// Points per coffin with at least one life left
    pub const SCORE_PER_COFFIN: u32 = 300;
}

/// Split a cell index into (row, col)
#[inline]
pub fn cell_to_row_col(cell: usize) -> (usize, usize) {
    (cell / consts::GRID_SIDE, cell % consts::GRID_SIDE)
}

/// Join (row, col) into a cell index
#[inline]
pub fn row_col_to_cell(row: usize, col: usize) -> usize {
    row * consts::GRID_SIDE + col
}
