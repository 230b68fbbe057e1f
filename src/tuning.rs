//! Data-driven game balance
//!
//! Every number the simulation uses lives in [`Tuning`]. Defaults come from
//! [`crate::consts`]; a JSON document may override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seconds between simulation ticks
    pub tick_interval: f32,
    /// Score added per tick
    pub score_per_tick: u64,
    /// Score at which the run is won
    pub win_score: u64,

    // === Ball ===
    pub ball_x: f32,
    pub ball_width: f32,
    pub ball_height: f32,
    pub ball_base_speed: f32,
    pub ball_damping: f32,
    pub ball_apex: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height_min: f32,
    pub obstacle_height_max: f32,
    pub scroll_speed: f32,
    pub min_spacing: f32,
    pub spacing_jitter: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_interval: SIM_DT,
            score_per_tick: SCORE_PER_TICK,
            win_score: WIN_SCORE,

            ball_x: BALL_X,
            ball_width: BALL_WIDTH,
            ball_height: BALL_HEIGHT,
            ball_base_speed: BALL_BASE_SPEED,
            ball_damping: BALL_DAMPING,
            ball_apex: BALL_APEX,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_height_min: OBSTACLE_HEIGHT_MIN,
            obstacle_height_max: OBSTACLE_HEIGHT_MAX,
            scroll_speed: SCROLL_SPEED,
            min_spacing: MIN_SPACING,
            spacing_jitter: SPACING_JITTER,
        }
    }
}

/// Replace a non-finite or non-positive value with `fallback`
fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

/// Replace a non-finite or negative value with `fallback`
fn non_negative_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Clamp malformed values into a playable configuration.
    ///
    /// Bad numbers fall back to their defaults rather than erroring so a
    /// broken config file never stops the loop.
    pub fn sanitized(mut self) -> Self {
        let d = Tuning::default();

        self.tick_interval = positive_or(self.tick_interval, d.tick_interval);
        self.win_score = self.win_score.max(1);

        self.ball_width = non_negative_or(self.ball_width, d.ball_width);
        self.ball_height = non_negative_or(self.ball_height, d.ball_height);
        self.ball_base_speed = positive_or(self.ball_base_speed, d.ball_base_speed);
        // Damping below one makes the fall push the ball upward
        self.ball_damping = positive_or(self.ball_damping, d.ball_damping).max(1.0);
        self.ball_apex = positive_or(self.ball_apex, d.ball_apex);
        // Height converges to base_speed * damping; an apex at or past that is never reached
        let ceiling = self.ball_base_speed * self.ball_damping;
        if self.ball_apex >= ceiling {
            self.ball_apex = d.ball_apex.min(ceiling * (2.0 / 3.0));
        }
        if !self.ball_x.is_finite() {
            self.ball_x = d.ball_x;
        }

        self.obstacle_width = non_negative_or(self.obstacle_width, d.obstacle_width);
        self.obstacle_height_min = non_negative_or(self.obstacle_height_min, d.obstacle_height_min);
        self.obstacle_height_max = non_negative_or(self.obstacle_height_max, d.obstacle_height_max);
        if self.obstacle_height_min > self.obstacle_height_max {
            std::mem::swap(&mut self.obstacle_height_min, &mut self.obstacle_height_max);
        }
        self.scroll_speed = positive_or(self.scroll_speed, d.scroll_speed);
        // Obstacles closer than their own width would overlap
        self.min_spacing = positive_or(self.min_spacing, d.min_spacing).max(self.obstacle_width.max(1.0));
        self.spacing_jitter = non_negative_or(self.spacing_jitter, 0.0);

        self
    }

    /// Tick interval as a `Duration`
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f32(self.tick_interval)
    }

    /// Load tuning from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "ball_dash_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
