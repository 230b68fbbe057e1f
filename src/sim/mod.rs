//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Geometry computed from stored state, never from a display
//! - No rendering or platform dependencies

pub mod ball;
pub mod clock;
pub mod geometry;
pub mod obstacle;
pub mod session;
pub mod tick;

pub use ball::{Ball, BallPhase};
pub use clock::FixedClock;
pub use geometry::{Rect, overlaps};
pub use obstacle::{Obstacle, ObstacleField, ObstacleView, capacity_for};
pub use session::{Command, EndReason, GameEvent, GameSession, SessionStatus};
pub use tick::{TickInput, step};
