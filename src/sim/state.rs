//! Session state and core simulation types
//!
//! Everything the loop mutates lives in `SessionState`; hosts only ever see it
//! through `&SessionState` or a `Snapshot`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gaps::GapSource;
use super::geometry::Rect;
use crate::tuning::SimConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the start input
    Ready,
    /// Active gameplay
    Active,
    /// Session ended (collision or out of bounds)
    Stopped,
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopCause {
    /// Flew into the top of the screen
    Ceiling,
    /// Fell onto the ground
    Ground,
    /// Hit the top or bottom obstacle segment
    Obstacle,
}

/// Notable things that happened during an operation, for sound cues and
/// overlays. Never read back by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    Started,
    Jumped,
    ObstacleRecycled { gap_height: f32 },
    Scored { score: u64 },
    NewBest { best: u64 },
    Stopped { cause: StopCause },
}

/// The player entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Center of the player; x stays fixed for the session
    pub position: Vec2,
    /// x is always 0
    pub velocity: Vec2,
}

impl Player {
    pub fn new(start: Vec2) -> Self {
        Self {
            position: start,
            velocity: Vec2::ZERO,
        }
    }

    /// Collision box, centered on the position
    pub fn hitbox(&self, size: f32) -> Rect {
        Rect::centered(self.position, size)
    }

    /// Integrate gravity into velocity, then velocity into position
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.velocity.y += gravity * dt;
        self.position.y += self.velocity.y * dt;
    }
}

/// The single top/bottom obstacle pair in flight
///
/// `offset` is measured from the right edge of the viewport: at 0 the pair sits
/// just off screen, at `-(viewport_width + width)` it has fully left on the
/// left side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub offset: f32,
    /// Height of the top segment (the gap starts below it)
    pub gap_height: f32,
    /// Scoring latch for the current pass
    pub passed: bool,
}

impl Obstacle {
    pub fn new(gap_height: f32) -> Self {
        Self {
            offset: 0.0,
            gap_height,
            passed: false,
        }
    }

    /// Move left by `speed * dt`
    #[inline]
    pub fn advance(&mut self, speed: f32, dt: f32) {
        self.offset -= speed * dt;
    }

    /// Offset at which the pair has fully left the viewport
    #[inline]
    pub fn recycle_floor(viewport_width: f32, width: f32) -> f32 {
        -(viewport_width + width)
    }

    /// Snap back to the right edge with a fresh gap once fully off screen.
    /// Returns the new gap height if a recycle happened.
    pub fn recycle_if_needed<G: GapSource + ?Sized>(
        &mut self,
        viewport_width: f32,
        config: &SimConfig,
        gaps: &mut G,
    ) -> Option<f32> {
        if self.offset > Self::recycle_floor(viewport_width, config.obstacle_width) {
            return None;
        }
        self.offset = 0.0;
        self.gap_height = gaps.next_gap(config.min_gap_height, config.max_gap_height);
        Some(self.gap_height)
    }

    /// Screen x of the leading (left) edge
    #[inline]
    pub fn left_edge(&self, viewport_width: f32) -> f32 {
        viewport_width + self.offset
    }

    /// Top segment: from the top of the screen down to the gap
    pub fn top_rect(&self, viewport_width: f32, width: f32) -> Rect {
        Rect::from_origin_size(
            Vec2::new(self.left_edge(viewport_width), 0.0),
            Vec2::new(width, self.gap_height),
        )
    }

    /// Bottom segment: starts below the gap and is as tall as the top segment,
    /// or runs down to the viewport bottom with `bottom_to_viewport_edge`
    pub fn bottom_rect(
        &self,
        viewport_width: f32,
        viewport_height: f32,
        config: &SimConfig,
    ) -> Rect {
        let top = self.gap_height + config.gap_spacing;
        let height = if config.bottom_to_viewport_edge {
            (viewport_height - top).max(0.0)
        } else {
            self.gap_height
        };
        Rect::from_origin_size(
            Vec2::new(self.left_edge(viewport_width), top),
            Vec2::new(config.obstacle_width, height),
        )
    }

    /// Trailing edge has moved past `x`
    #[inline]
    pub fn has_cleared(&self, x: f32, viewport_width: f32, width: f32) -> bool {
        self.offset + width + viewport_width < x
    }

    /// Leading edge has not reached `x` yet
    #[inline]
    pub fn is_ahead_of(&self, x: f32, viewport_width: f32) -> bool {
        self.offset + viewport_width > x
    }
}

/// Complete session state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    pub player: Player,
    pub obstacle: Obstacle,
    pub score: u64,
    /// Highest score ever reached, including loaded history
    pub best_score: u64,
    /// Timestamp of the last processed tick (seconds, host clock)
    pub last_tick: f64,
}

impl SessionState {
    pub fn new(config: &SimConfig, best_score: u64) -> Self {
        Self {
            phase: Phase::Ready,
            player: Player::new(config.player_start),
            obstacle: Obstacle::new(Self::resting_gap(config)),
            score: 0,
            best_score,
            last_tick: 0.0,
        }
    }

    /// Restore everything except the best score
    pub fn reset(&mut self, config: &SimConfig) {
        *self = Self::new(config, self.best_score);
    }

    /// Gap height shown before the first draw of a session. The pair sits off
    /// screen while Ready, so this is never visible; `start` draws the real one.
    fn resting_gap(config: &SimConfig) -> f32 {
        (config.min_gap_height + config.max_gap_height) / 2.0
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            player_position: self.player.position,
            player_velocity: self.player.velocity,
            obstacle_offset: self.obstacle.offset,
            obstacle_gap_height: self.obstacle.gap_height,
            score: self.score,
            best_score: self.best_score,
        }
    }
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub player_position: Vec2,
    pub player_velocity: Vec2,
    pub obstacle_offset: f32,
    pub obstacle_gap_height: f32,
    pub score: u64,
    pub best_score: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::gaps::SequenceGaps;

    #[test]
    fn test_new_state() {
        let config = SimConfig::default();
        let state = SessionState::new(&config, 7);
        assert_eq!(state.phase, Phase::Ready);
        assert_eq!(state.player.position, Vec2::new(100.0, 300.0));
        assert_eq!(state.player.velocity, Vec2::ZERO);
        assert_eq!(state.obstacle.offset, 0.0);
        assert!(!state.obstacle.passed);
        assert_eq!(state.score, 0);
        assert_eq!(state.best_score, 7);
    }

    #[test]
    fn test_reset_keeps_best() {
        let config = SimConfig::default();
        let mut state = SessionState::new(&config, 3);
        state.score = 12;
        state.best_score = 12;
        state.phase = Phase::Stopped;
        state.player.position.y = 650.0;
        state.obstacle.offset = -321.0;
        state.obstacle.passed = true;

        state.reset(&config);
        assert_eq!(state, SessionState::new(&config, 12));
    }

    #[test]
    fn test_obstacle_rects() {
        let config = SimConfig::default();
        let obstacle = Obstacle {
            offset: -150.0,
            gap_height: 200.0,
            passed: false,
        };
        let top = obstacle.top_rect(400.0, 100.0);
        assert_eq!(top.min, Vec2::new(250.0, 0.0));
        assert_eq!(top.max, Vec2::new(350.0, 200.0));

        // Bottom segment mirrors the top segment's height
        let bottom = obstacle.bottom_rect(400.0, 800.0, &config);
        assert_eq!(bottom.min, Vec2::new(250.0, 300.0));
        assert_eq!(bottom.max, Vec2::new(350.0, 500.0));
    }

    #[test]
    fn test_bottom_rect_to_viewport_edge() {
        let config = SimConfig {
            bottom_to_viewport_edge: true,
            ..SimConfig::default()
        };
        let obstacle = Obstacle {
            offset: -150.0,
            gap_height: 200.0,
            passed: false,
        };
        let bottom = obstacle.bottom_rect(400.0, 800.0, &config);
        assert_eq!(bottom.min, Vec2::new(250.0, 300.0));
        assert_eq!(bottom.max, Vec2::new(350.0, 800.0));
    }

    #[test]
    fn test_bottom_rect_never_inverts() {
        let config = SimConfig {
            bottom_to_viewport_edge: true,
            ..SimConfig::default()
        };
        let obstacle = Obstacle::new(500.0);
        let bottom = obstacle.bottom_rect(400.0, 300.0, &config);
        assert!(bottom.is_empty());
        assert_eq!(bottom.min.y, 600.0);
    }

    #[test]
    fn test_recycle_at_floor() {
        let config = SimConfig::default();
        let mut gaps = SequenceGaps::constant(123.0);
        let mut obstacle = Obstacle::new(300.0);

        obstacle.offset = -499.0;
        assert_eq!(obstacle.recycle_if_needed(400.0, &config, &mut gaps), None);
        assert_eq!(obstacle.offset, -499.0);

        obstacle.offset = -500.0;
        assert_eq!(obstacle.recycle_if_needed(400.0, &config, &mut gaps), Some(123.0));
        assert_eq!(obstacle.offset, 0.0);
        assert_eq!(obstacle.gap_height, 123.0);
    }

    #[test]
    fn test_pass_edges() {
        let mut obstacle = Obstacle::new(300.0);
        // Player at x=100, viewport 400, width 100
        assert!(obstacle.is_ahead_of(100.0, 400.0));
        assert!(!obstacle.has_cleared(100.0, 400.0, 100.0));

        obstacle.offset = -350.0;
        assert!(!obstacle.is_ahead_of(100.0, 400.0));
        assert!(!obstacle.has_cleared(100.0, 400.0, 100.0));

        obstacle.offset = -401.0;
        assert!(obstacle.has_cleared(100.0, 400.0, 100.0));
    }

    #[test]
    fn test_integrate() {
        let mut player = Player::new(Vec2::new(100.0, 300.0));
        player.integrate(1000.0, 0.1);
        assert!((player.velocity.y - 100.0).abs() < 1e-4);
        assert!((player.position.y - 310.0).abs() < 1e-3);
        assert_eq!(player.velocity.x, 0.0);
    }
}
