//! Display projection
//!
//! Turns session state into screen-space rectangles. The simulation never
//! reads anything back from the display; a [`Scene`] is rebuilt from scratch
//! whenever the shell wants to draw. Score and end-of-run text are pushed
//! instead: a [`Hud`] folds the session's queued events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameEvent, GameSession, Rect, SessionStatus};

/// Prompt shown under the end-screen headline
pub const RESTART_PROMPT: &str = "Press Space to play again";

/// End-of-run overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndScreen {
    pub title: String,
    pub prompt: String,
}

/// Score readout and end overlay, driven by session events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub end_screen: Option<EndScreen>,
}

impl Hud {
    /// Fold one event; returns true if anything visible changed
    pub fn apply(&mut self, event: &GameEvent) -> bool {
        match event {
            GameEvent::ScoreChanged(score) => {
                // Score only moves during a run, so a stale overlay goes away
                let cleared = self.end_screen.take().is_some();
                let changed = self.score != *score;
                self.score = *score;
                changed || cleared
            }
            GameEvent::SessionEnded(reason) => {
                self.end_screen = Some(EndScreen {
                    title: reason.banner().to_string(),
                    prompt: RESTART_PROMPT.to_string(),
                });
                true
            }
            GameEvent::BallPositionChanged(_) | GameEvent::ObstacleSetChanged(_) => false,
        }
    }

    /// Fold a drained batch in order
    pub fn apply_all(&mut self, events: &[GameEvent]) -> bool {
        events.iter().fold(false, |changed, e| self.apply(e) || changed)
    }
}

/// Everything a renderer needs for one frame, in screen space
/// (origin top-left, y down, ground along the bottom edge)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub viewport: Vec2,
    pub score: u64,
    pub ball: Rect,
    /// (id, rect) pairs, left to right
    pub obstacles: Vec<(u32, Rect)>,
    pub end_screen: Option<EndScreen>,
}

/// Flip a scene-space rect (y up from ground) into screen space
pub fn to_screen(rect: &Rect, viewport_height: f32) -> Rect {
    Rect::new(
        rect.x,
        viewport_height - (rect.y + rect.height),
        rect.width,
        rect.height,
    )
}

/// Project the session into a drawable scene
pub fn project(session: &GameSession, viewport: Vec2) -> Scene {
    let ball = to_screen(&session.ball.bounding_rect(), viewport.y);
    let obstacles = session
        .field
        .iter()
        .map(|o| (o.id, to_screen(&o.bounding_rect(), viewport.y)))
        .collect();
    let end_screen = match session.status {
        SessionStatus::Ended(reason) => Some(EndScreen {
            title: reason.banner().to_string(),
            prompt: RESTART_PROMPT.to_string(),
        }),
        _ => None,
    };

    Scene {
        viewport,
        score: session.score,
        ball,
        obstacles,
        end_screen,
    }
}
