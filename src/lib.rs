//! Ball Dash - A single-lane endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball physics, obstacle field, collisions, session)
//! - `render`: Pure projection of simulation state for display
//! - `autopilot`: Demo driver that plays the game through commands
//! - `tuning`: Data-driven game balance

pub mod autopilot;
pub mod render;
pub mod sim;
pub mod tuning;

pub use autopilot::Autopilot;
pub use render::{Scene, project};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (~60 Hz)
    pub const SIM_DT: f32 = 0.01667;
    /// Maximum ticks run per clock advance to prevent spiral of death
    pub const MAX_CATCHUP_TICKS: u32 = 8;

    /// Score awarded every tick while running (tick-rate coupled)
    pub const SCORE_PER_TICK: u64 = 5;
    /// Score that ends the run as a win
    pub const WIN_SCORE: u64 = 10_000;

    /// Ball defaults - the ball never moves horizontally
    pub const BALL_X: f32 = 50.0;
    pub const BALL_WIDTH: f32 = 50.0;
    pub const BALL_HEIGHT: f32 = 50.0;
    /// Speed at ground level; speed drops as the ball climbs
    pub const BALL_BASE_SPEED: f32 = 20.0;
    /// Height divisor in the speed law (speed = base - offset / damping)
    pub const BALL_DAMPING: f32 = 22.5;
    /// Height at which the rise turns into a fall
    pub const BALL_APEX: f32 = 300.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 50.0;
    pub const OBSTACLE_HEIGHT_MIN: f32 = 50.0;
    pub const OBSTACLE_HEIGHT_MAX: f32 = 150.0;
    /// Leftward scroll per tick, shared by every obstacle
    pub const SCROLL_SPEED: f32 = 7.5;
    /// Minimum gap between consecutive obstacle spawns
    pub const MIN_SPACING: f32 = 400.0;
    /// Extra random gap added on top of MIN_SPACING
    pub const SPACING_JITTER: f32 = 300.0;
    /// Upper bound on field capacity, whatever width the display reports
    pub const MAX_OBSTACLES: usize = 64;

    /// Viewport used when no display has reported a size yet
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
}
