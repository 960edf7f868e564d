//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform code:
//! - Time only arrives through `tick(now, ..)`
//! - Randomness only through an injected `GapSource`
//! - Persistence only through the `BestScore` wrapper

pub mod autopilot;
pub mod collision;
pub mod gaps;
pub mod geometry;
pub mod state;
pub mod tick;

pub use collision::{clamp_to_ceiling, clamp_to_ground, hits_obstacle};
pub use gaps::{GapSource, SeededGaps, SequenceGaps};
pub use geometry::Rect;
pub use state::{Obstacle, Phase, Player, SessionState, SimEvent, Snapshot, StopCause};
pub use tick::{SimulationLoop, MAX_PENDING_EVENTS};
