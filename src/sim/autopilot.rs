//! Idle/demo mode - a bot that plays the game
//!
//! Works only from the public snapshot, the same data a renderer gets.

use super::state::{Phase, Snapshot};
use crate::tuning::SimConfig;

/// Clearance kept between the hit box and the bottom segment at the jump line
const JUMP_MARGIN: f32 = 5.5;

/// Height (screen y) at which the bot jumps: low in the current gap, so that
/// with the default tuning the rise of one jump peaks just under the top
/// segment.
pub fn jump_line(snapshot: &Snapshot, config: &SimConfig) -> f32 {
    snapshot.obstacle_gap_height + config.gap_spacing - config.hitbox_size / 2.0 - JUMP_MARGIN
}

/// Whether the bot should jump this frame
pub fn should_jump(snapshot: &Snapshot, config: &SimConfig) -> bool {
    if snapshot.phase != Phase::Active {
        return false;
    }
    // Screen y grows downward: "below the line" means larger y
    let falling = snapshot.player_velocity.y >= 0.0;
    falling && snapshot.player_position.y > jump_line(snapshot, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::gaps::SequenceGaps;
    use crate::sim::tick::SimulationLoop;
    use glam::Vec2;

    fn snapshot(y: f32, vy: f32) -> Snapshot {
        Snapshot {
            phase: Phase::Active,
            player_position: Vec2::new(100.0, y),
            player_velocity: Vec2::new(0.0, vy),
            obstacle_offset: 0.0,
            obstacle_gap_height: 200.0,
            score: 0,
            best_score: 0,
        }
    }

    #[test]
    fn test_jump_line_inside_gap() {
        let config = SimConfig::default();
        // Gap spans 200..300
        assert_eq!(jump_line(&snapshot(0.0, 0.0), &config), 288.0);
    }

    #[test]
    fn test_jumps_only_when_falling_below_line() {
        let config = SimConfig::default();
        assert!(should_jump(&snapshot(290.0, 50.0), &config));
        assert!(!should_jump(&snapshot(290.0, -50.0), &config));
        assert!(!should_jump(&snapshot(250.0, 50.0), &config));
    }

    #[test]
    fn test_idle_outside_active() {
        let config = SimConfig::default();
        let mut snap = snapshot(600.0, 50.0);
        snap.phase = Phase::Ready;
        assert!(!should_jump(&snap, &config));
    }

    #[test]
    fn test_bot_survives_a_long_run() {
        let config = SimConfig::default();
        let store = MemoryStore::new();
        let mut sim = SimulationLoop::with_gaps(
            config.clone(),
            Box::new(store.clone()),
            SequenceGaps::new(vec![300.0, 260.0, 340.0, 300.0]),
        );
        let (w, h) = (400.0, 800.0);
        sim.start(0.0);

        // 20 seconds at 60 Hz
        for frame in 1..=1200 {
            if should_jump(&sim.snapshot(), &config) {
                sim.jump();
            }
            sim.tick(frame as f64 / 60.0, w, h);
        }

        let state = sim.state();
        assert_eq!(state.phase, Phase::Active);
        // One obstacle every 500px at 300px/s
        assert!(state.score >= 10, "score {}", state.score);
        assert_eq!(state.best_score, state.score);
        assert_eq!(store.value(), Some(state.score));
    }
}
