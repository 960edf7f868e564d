//! Data-driven game balance
//!
//! Every physics and layout constant the simulation reads. Defaults come from
//! `consts`; a JSON file can override any subset of fields.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tuning load/validation errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning: {0}")]
    Invalid(String),
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Physics ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Vertical velocity a jump sets (must be negative)
    pub jump_velocity: f32,
    /// Elapsed-time cap per tick; `None` integrates stalls uncapped
    pub max_tick_delta: Option<f64>,

    // === Obstacles ===
    pub obstacle_speed: f32,
    pub obstacle_width: f32,
    pub gap_spacing: f32,
    /// Make the bottom segment solid down to the viewport bottom instead of
    /// mirroring the top segment's height
    pub bottom_to_viewport_edge: bool,
    pub min_gap_height: f32,
    pub max_gap_height: f32,

    // === Layout ===
    pub ground_height: f32,
    pub player_start: Vec2,
    pub hitbox_size: f32,
    pub sprite_size: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            max_tick_delta: Some(MAX_TICK_DELTA),

            obstacle_speed: OBSTACLE_SPEED,
            obstacle_width: OBSTACLE_WIDTH,
            gap_spacing: GAP_SPACING,
            bottom_to_viewport_edge: false,
            min_gap_height: MIN_GAP_HEIGHT,
            max_gap_height: MAX_GAP_HEIGHT,

            ground_height: GROUND_HEIGHT,
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            hitbox_size: PLAYER_HITBOX,
            sprite_size: PLAYER_SPRITE,
        }
    }
}

impl SimConfig {
    /// Parse and validate tuning from JSON (missing fields take defaults)
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate tuning from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reject values the loop cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.gravity,
            self.jump_velocity,
            self.obstacle_speed,
            self.obstacle_width,
            self.gap_spacing,
            self.min_gap_height,
            self.max_gap_height,
            self.ground_height,
            self.hitbox_size,
            self.sprite_size,
        ];
        if finite.iter().any(|v| !v.is_finite()) || !self.player_start.is_finite() {
            return Err(ConfigError::Invalid("values must be finite".into()));
        }
        if self.jump_velocity >= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "jump_velocity must be negative (upward), got {}",
                self.jump_velocity
            )));
        }
        if self.obstacle_width <= 0.0 || self.obstacle_speed <= 0.0 {
            return Err(ConfigError::Invalid(
                "obstacle width and speed must be positive".into(),
            ));
        }
        if self.min_gap_height < 0.0 || self.min_gap_height > self.max_gap_height {
            return Err(ConfigError::Invalid(format!(
                "gap range [{}, {}] is empty",
                self.min_gap_height, self.max_gap_height
            )));
        }
        if self.hitbox_size <= 0.0 || self.hitbox_size >= self.sprite_size {
            return Err(ConfigError::Invalid(
                "hitbox must be positive and smaller than the sprite".into(),
            ));
        }
        if let Some(cap) = self.max_tick_delta {
            if !(cap > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "max_tick_delta must be positive, got {cap}"
                )));
            }
        }
        Ok(())
    }

    /// Clamp the elapsed time of one tick
    pub fn clamp_delta(&self, dt: f64) -> f64 {
        let dt = dt.max(0.0);
        match self.max_tick_delta {
            Some(cap) => dt.min(cap),
            None => dt,
        }
    }
}
