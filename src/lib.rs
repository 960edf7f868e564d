//! Flappy - a one-button gravity arcade game
//!
//! Core modules:
//! - `sim`: Simulation loop (gravity, obstacle recycling, collisions, scoring)
//! - `tuning`: Data-driven physics and layout constants
//! - `best_score`: Best score tracking on top of a persistence store
//! - `persistence`: Key → integer stores (memory, JSON file, LocalStorage)
//! - `platform`: Browser/native clock and seeding

pub mod best_score;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use best_score::BestScore;
pub use persistence::{PersistError, ScoreStore};
pub use sim::{Phase, SimEvent, SimulationLoop, Snapshot, StopCause};
pub use tuning::{ConfigError, SimConfig};

/// Game configuration constants
///
/// Per-second units throughout; screen space has y growing downward.
pub mod consts {
    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 1000.0;
    /// Vertical velocity set by a jump (negative = upward)
    pub const JUMP_VELOCITY: f32 = -400.0;

    /// Horizontal obstacle speed (pixels/s)
    pub const OBSTACLE_SPEED: f32 = 300.0;
    pub const OBSTACLE_WIDTH: f32 = 100.0;
    /// Vertical opening between the top and bottom segment
    pub const GAP_SPACING: f32 = 100.0;
    /// Range the top segment height is drawn from
    pub const MIN_GAP_HEIGHT: f32 = 100.0;
    pub const MAX_GAP_HEIGHT: f32 = 500.0;

    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Player hit box edge length (much smaller than the sprite)
    pub const PLAYER_HITBOX: f32 = 13.0;
    /// Rendered sprite edge length
    pub const PLAYER_SPRITE: f32 = 80.0;
    pub const PLAYER_START_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 300.0;

    /// Longest elapsed time a single tick integrates (seconds)
    pub const MAX_TICK_DELTA: f64 = 0.125;

    /// Frame rate of the stepped native demo clock
    pub const DEMO_FPS: f64 = 60.0;
}
