//! The player's ball
//!
//! The ball never moves horizontally. A jump climbs fast off the ground, slows
//! toward the apex, then accelerates back down: each tick moves it by
//! `base_speed - offset / damping`, recomputed from the current height.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::Tuning;

/// Vertical motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallPhase {
    /// Resting on the ground, ready to jump
    #[default]
    Grounded,
    /// Climbing toward the apex
    Rising,
    /// Dropping back to the ground
    Falling,
}

/// The ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Height of the ball's bottom edge above the ground
    pub offset: f32,
    pub phase: BallPhase,
    /// Motion frozen by [`Ball::stop`]
    pub halted: bool,
    pub x: f32,
    pub width: f32,
    pub height: f32,
    base_speed: f32,
    damping: f32,
    apex: f32,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            offset: 0.0,
            phase: BallPhase::Grounded,
            halted: false,
            x: tuning.ball_x,
            width: tuning.ball_width,
            height: tuning.ball_height,
            base_speed: tuning.ball_base_speed,
            damping: tuning.ball_damping,
            apex: tuning.ball_apex,
        }
    }

    /// Start a jump. Ignored unless the ball is on the ground.
    pub fn jump(&mut self) -> bool {
        if self.halted || self.phase != BallPhase::Grounded {
            return false;
        }
        self.phase = BallPhase::Rising;
        true
    }

    /// Distance moved this tick at the current height
    #[inline]
    pub fn step_size(&self) -> f32 {
        self.base_speed - self.offset / self.damping
    }

    /// Advance vertical motion by one tick
    pub fn tick(&mut self) {
        if self.halted {
            return;
        }
        match self.phase {
            BallPhase::Grounded => {}
            BallPhase::Rising => {
                self.offset += self.step_size();
                if self.offset >= self.apex {
                    self.phase = BallPhase::Falling;
                }
            }
            BallPhase::Falling => {
                self.offset -= self.step_size();
                if self.offset <= 0.0 {
                    self.offset = 0.0;
                    self.phase = BallPhase::Grounded;
                }
            }
        }
    }

    /// Freeze motion at the current height
    pub fn stop(&mut self) {
        self.halted = true;
    }

    pub fn is_airborne(&self) -> bool {
        self.phase != BallPhase::Grounded
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::new(self.x, self.offset, self.width, self.height)
    }
}
