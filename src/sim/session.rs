//! One play-through of the game
//!
//! The session owns the ball, the obstacle field and the fixed-tick clock.
//! Shells feed it [`Command`]s and elapsed time, then drain [`GameEvent`]s to
//! update whatever display they drive.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::clock::FixedClock;
use super::obstacle::{ObstacleField, ObstacleView};
use crate::Tuning;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The ball hit an obstacle
    Collision,
    /// The score reached the win threshold
    Victory,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Collision => "collision",
            EndReason::Victory => "victory",
        }
    }

    /// End-screen headline
    pub fn banner(&self) -> &'static str {
        match self {
            EndReason::Collision => "Game Over.",
            EndReason::Victory => "You Won!",
        }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    /// Waiting for a start command
    #[default]
    Idle,
    /// Ticking
    Running,
    /// Run finished; only a restart is accepted
    Ended(EndReason),
}

/// Input delivered by the shell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Jump,
    Restart,
    Resize(f32),
}

/// State changes for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ScoreChanged(u64),
    BallPositionChanged(f32),
    ObstacleSetChanged(Vec<ObstacleView>),
    SessionEnded(EndReason),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Session seed; each run derives its own obstacle seed from it
    pub seed: u64,
    pub tuning: Tuning,
    pub ball: Ball,
    pub field: ObstacleField,
    pub score: u64,
    pub status: SessionStatus,
    /// Ticks run in the current play-through
    pub ticks: u64,
    /// Play-throughs started so far
    pub runs: u32,
    viewport_width: f32,
    clock: FixedClock,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(seed: u64, viewport_width: f32, tuning: Tuning) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            ball: Ball::new(&tuning),
            field: ObstacleField::new(seed, viewport_width, &tuning),
            clock: FixedClock::new(tuning.tick_duration()),
            tuning,
            score: 0,
            status: SessionStatus::Idle,
            ticks: 0,
            runs: 0,
            viewport_width,
            events: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Whether the fixed-tick clock is live
    pub fn clock_running(&self) -> bool {
        self.clock.is_running()
    }

    /// Obstacle seed for the current run
    fn run_seed(&self) -> u64 {
        (self.runs as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed)
    }

    /// Begin a fresh play-through, discarding whatever state came before
    pub fn start(&mut self) {
        self.clock.stop();
        self.events.clear();

        self.runs += 1;
        self.score = 0;
        self.ticks = 0;
        self.ball = Ball::new(&self.tuning);
        self.field = ObstacleField::new(self.run_seed(), self.viewport_width, &self.tuning);
        self.field.replenish();
        self.status = SessionStatus::Running;
        self.clock.start();

        log::info!(
            "Run {} started (viewport {}, {} obstacles)",
            self.runs,
            self.viewport_width,
            self.field.len()
        );
        self.emit_frame();
    }

    /// Return to Idle, stopping the clock and freezing the ball
    pub fn reset(&mut self) {
        self.clock.stop();
        self.ball.stop();
        self.status = SessionStatus::Idle;
    }

    /// Start again after a run has ended. Ignored otherwise.
    pub fn restart(&mut self) -> bool {
        if !matches!(self.status, SessionStatus::Ended(_)) {
            log::debug!("Restart ignored while {:?}", self.status);
            return false;
        }
        self.reset();
        self.start();
        true
    }

    /// Ask the ball to jump. Ignored unless running.
    pub fn jump(&mut self) -> bool {
        if !self.is_running() {
            log::debug!("Jump ignored while {:?}", self.status);
            return false;
        }
        self.ball.jump()
    }

    /// Viewport width changed; affects how many obstacles future spawns allow
    pub fn on_resize(&mut self, width: f32) {
        if width == self.viewport_width {
            return;
        }
        self.viewport_width = width;
        self.field.set_capacity(width);
        log::info!("Viewport resized to {} (capacity {})", width, self.field.capacity);
    }

    /// Dispatch a shell command
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Start => {
                if self.status == SessionStatus::Idle {
                    self.start();
                } else {
                    log::debug!("Start ignored while {:?}", self.status);
                }
            }
            Command::Jump => {
                self.jump();
            }
            Command::Restart => {
                self.restart();
            }
            Command::Resize(width) => self.on_resize(width),
        }
    }

    /// Advance one fixed tick. Returns the end reason if this tick ended the run.
    pub fn tick(&mut self) -> Option<EndReason> {
        if !self.is_running() {
            return None;
        }

        self.ball.tick();
        self.field.replenish();
        self.field.tick();
        self.ticks += 1;
        self.score += self.tuning.score_per_tick;
        self.emit_frame();

        // Victory takes precedence over a collision on the same tick
        if self.score >= self.tuning.win_score {
            self.end(EndReason::Victory);
            return Some(EndReason::Victory);
        }
        let ball_rect = self.ball.bounding_rect();
        let hit = self.field.first_overlapping(&ball_rect).map(|o| o.id);
        if let Some(id) = hit {
            log::debug!("Ball hit obstacle {} at tick {}", id, self.ticks);
            self.end(EndReason::Collision);
            return Some(EndReason::Collision);
        }
        None
    }

    /// Run every tick that `elapsed` makes due. Returns the number of ticks run.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let due = self.clock.advance(elapsed);
        let mut ran = 0;
        for _ in 0..due {
            ran += 1;
            if self.tick().is_some() {
                break;
            }
        }
        ran
    }

    /// Finish the run
    pub fn end(&mut self, reason: EndReason) {
        self.clock.stop();
        self.ball.stop();
        self.status = SessionStatus::Ended(reason);
        self.events.push(GameEvent::SessionEnded(reason));
        log::info!(
            "Run {} ended: {} (score {}, {} ticks)",
            self.runs,
            reason.as_str(),
            self.score,
            self.ticks
        );
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit_frame(&mut self) {
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.events.push(GameEvent::BallPositionChanged(self.ball.offset));
        self.events.push(GameEvent::ObstacleSetChanged(self.field.views()));
    }
}
