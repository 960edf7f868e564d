//! Boundary and obstacle collision checks
//!
//! The boundary checks clamp the player back into the playfield as a side
//! effect; the obstacle check is a pure overlap test.

use super::state::{Obstacle, Player};
use crate::tuning::SimConfig;

/// Clamp to the top of the screen. Returns true if the ceiling was touched.
pub fn clamp_to_ceiling(player: &mut Player) -> bool {
    if player.position.y <= 0.0 {
        player.position.y = 0.0;
        true
    } else {
        false
    }
}

/// Clamp onto the ground and kill vertical velocity. Returns true if the
/// player sank below `floor_y`.
pub fn clamp_to_ground(player: &mut Player, floor_y: f32) -> bool {
    if player.position.y > floor_y {
        player.position.y = floor_y;
        player.velocity.y = 0.0;
        true
    } else {
        false
    }
}

/// Check the player's hit box against both obstacle segments
pub fn hits_obstacle(
    player: &Player,
    obstacle: &Obstacle,
    config: &SimConfig,
    viewport_width: f32,
    viewport_height: f32,
) -> bool {
    let hitbox = player.hitbox(config.hitbox_size);
    let top = obstacle.top_rect(viewport_width, config.obstacle_width);
    let bottom = obstacle.bottom_rect(viewport_width, viewport_height, config);
    hitbox.intersects(&top) || hitbox.intersects(&bottom)
}
