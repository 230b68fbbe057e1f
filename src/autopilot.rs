//! Demo driver
//!
//! Plays the game the same way a player would: by deciding, before each
//! tick, whether to send a jump command. It never touches session state.

use serde::{Deserialize, Serialize};

use crate::sim::{GameSession, TickInput};

/// Default gap (scene units) between the ball's front edge and the next
/// obstacle at which the autopilot jumps
pub const DEFAULT_LEAD_DISTANCE: f32 = 120.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Autopilot {
    pub lead_distance: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            lead_distance: DEFAULT_LEAD_DISTANCE,
        }
    }
}

impl Autopilot {
    pub fn new(lead_distance: f32) -> Self {
        Self { lead_distance }
    }

    /// Gap to the nearest obstacle that has not yet passed the ball
    pub fn gap_ahead(session: &GameSession) -> Option<f32> {
        let ball = &session.ball;
        let front = ball.x + ball.width;
        session
            .field
            .iter()
            .filter(|o| o.offset + o.width > ball.x)
            .map(|o| o.offset - front)
            .next()
    }

    /// Whether to jump before the next tick
    pub fn should_jump(&self, session: &GameSession) -> bool {
        if !session.is_running() || session.ball.is_airborne() {
            return false;
        }
        matches!(Self::gap_ahead(session), Some(gap) if gap <= self.lead_distance)
    }

    /// Fill in the input for the next step
    pub fn drive(&self, session: &GameSession, input: &mut TickInput) {
        if self.should_jump(session) {
            input.jump = true;
        }
    }
}
