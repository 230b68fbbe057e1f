//! Per-tick input batching
//!
//! Shells collect key presses and resize notifications between ticks into a
//! [`TickInput`], then hand it to [`step`] together with the elapsed time.

use std::time::Duration;

use super::session::{Command, EndReason, GameSession, SessionStatus};

/// Input gathered since the last step
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space while running)
    pub jump: bool,
    /// New game (space after a run ended)
    pub restart: bool,
    /// Latest viewport width reported by the display
    pub resize: Option<f32>,
}

impl TickInput {
    /// Commands in the order they are applied: resize first so a restart
    /// spawns for the new width
    pub fn commands(&self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(3);
        if let Some(width) = self.resize {
            commands.push(Command::Resize(width));
        }
        if self.restart {
            commands.push(Command::Restart);
        }
        if self.jump {
            commands.push(Command::Jump);
        }
        commands
    }

    /// Clear one-shot inputs after processing
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Apply queued input, then run whatever ticks `elapsed` makes due.
///
/// Returns the end reason when this step finished the run.
pub fn step(session: &mut GameSession, input: &TickInput, elapsed: Duration) -> Option<EndReason> {
    for command in input.commands() {
        session.handle(command);
    }
    let was_running = session.is_running();
    session.advance(elapsed);

    match session.status {
        SessionStatus::Ended(reason) if was_running => Some(reason),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::BallPhase;

    #[test]
    fn test_commands_order() {
        let input = TickInput {
            jump: true,
            restart: true,
            resize: Some(800.0),
        };
        assert_eq!(
            input.commands(),
            vec![Command::Resize(800.0), Command::Restart, Command::Jump]
        );
        assert!(TickInput::default().commands().is_empty());
    }

    #[test]
    fn test_step_applies_jump_then_ticks() {
        let mut session = GameSession::new(1, 1280.0, Tuning::default());
        session.start();
        let interval = session.tuning.tick_duration();

        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        assert_eq!(step(&mut session, &input, interval), None);
        assert_eq!(session.ball.phase, BallPhase::Rising);
        assert_eq!(session.score, 5);
    }

    #[test]
    fn test_step_restart_after_end() {
        let mut session = GameSession::new(1, 1280.0, Tuning::default());
        session.start();
        session.end(EndReason::Collision);

        let input = TickInput {
            restart: true,
            resize: Some(400.0),
            ..Default::default()
        };
        step(&mut session, &input, std::time::Duration::ZERO);
        assert_eq!(session.status, SessionStatus::Running);
        assert_eq!(session.field.len(), 1);
        assert_eq!(session.field.obstacles[0].offset, 400.0);
    }

    #[test]
    fn test_clear_resets_one_shots() {
        let mut input = TickInput {
            jump: true,
            restart: true,
            resize: Some(1.0),
        };
        input.clear();
        assert!(!input.jump && !input.restart && input.resize.is_none());
    }
}
