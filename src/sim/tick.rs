//! Simulation loop
//!
//! One tick is a fixed sequence: gravity, position, ceiling, obstacle advance,
//! obstacle recycle, ground and obstacle collisions, scoring. Calls that do not
//! apply to the current phase are silently ignored.

use std::collections::VecDeque;

use super::collision;
use super::gaps::{GapSource, SeededGaps};
use super::state::{Phase, SessionState, SimEvent, Snapshot, StopCause};
use crate::best_score::BestScore;
use crate::persistence::ScoreStore;
use crate::platform;
use crate::tuning::SimConfig;

/// Events kept for a host that never drains; the oldest are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// Owns the session state and advances it one tick at a time
#[derive(Debug)]
pub struct SimulationLoop<G = SeededGaps> {
    config: SimConfig,
    state: SessionState,
    best: BestScore,
    gaps: G,
    events: VecDeque<SimEvent>,
}

impl SimulationLoop<SeededGaps> {
    /// Loop with a freshly seeded gap RNG; the best score is loaded from `store`
    pub fn new(config: SimConfig, store: Box<dyn ScoreStore>) -> Self {
        let seed = platform::default_seed();
        log::info!("Gap RNG seed: {}", seed);
        Self::with_gaps(config, store, SeededGaps::new(seed))
    }
}

impl<G: GapSource> SimulationLoop<G> {
    pub fn with_gaps(config: SimConfig, store: Box<dyn ScoreStore>, gaps: G) -> Self {
        let best = BestScore::load(store);
        let state = SessionState::new(&config, best.persisted());
        Self {
            config,
            state,
            best,
            gaps,
            events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Take every event recorded since the last drain (at most
    /// `MAX_PENDING_EVENTS`, newest last)
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain(..).collect()
    }

    /// Ready → Active. Returns false (and changes nothing) in any other phase.
    pub fn start(&mut self, now: f64) -> bool {
        if self.state.phase != Phase::Ready {
            return false;
        }
        self.state.phase = Phase::Active;
        self.state.last_tick = now;
        // The pair is still off screen, so the session's first gap is drawn here
        self.state.obstacle.gap_height = self
            .gaps
            .next_gap(self.config.min_gap_height, self.config.max_gap_height);
        push_event(&mut self.events, SimEvent::Started);
        log::info!("Session started (best {})", self.state.best_score);
        true
    }

    /// Set the vertical velocity to the jump velocity, whatever it was
    pub fn jump(&mut self) {
        self.state.player.velocity.y = self.config.jump_velocity;
        push_event(&mut self.events, SimEvent::Jumped);
    }

    /// Advance an Active session to `now`. Returns the phase after the tick.
    pub fn tick(&mut self, now: f64, viewport_width: f32, viewport_height: f32) -> Phase {
        if self.state.phase != Phase::Active {
            return self.state.phase;
        }

        let Self {
            config,
            state,
            best,
            gaps,
            events,
        } = self;

        let dt = config.clamp_delta(now - state.last_tick) as f32;
        let mut stop: Option<StopCause> = None;

        state.player.integrate(config.gravity, dt);

        if collision::clamp_to_ceiling(&mut state.player) {
            stop.get_or_insert(StopCause::Ceiling);
        }

        state.obstacle.advance(config.obstacle_speed, dt);
        if let Some(gap_height) = state.obstacle.recycle_if_needed(viewport_width, config, gaps) {
            log::debug!("Obstacle recycled, gap height {:.1}", gap_height);
            push_event(events, SimEvent::ObstacleRecycled { gap_height });
        }

        let floor_y = viewport_height - config.ground_height;
        if collision::clamp_to_ground(&mut state.player, floor_y) {
            stop.get_or_insert(StopCause::Ground);
        }
        if collision::hits_obstacle(
            &state.player,
            &state.obstacle,
            config,
            viewport_width,
            viewport_height,
        ) {
            stop.get_or_insert(StopCause::Obstacle);
        }

        update_score(state, best, events, config, viewport_width);

        state.last_tick = now;

        if let Some(cause) = stop {
            state.phase = Phase::Stopped;
            push_event(events, SimEvent::Stopped { cause });
            log::info!(
                "Session over ({:?}): score {}, best {}",
                cause,
                state.score,
                state.best_score
            );
        }

        state.phase
    }

    /// Back to Ready with a fresh session; the best score is kept
    pub fn reset(&mut self) {
        self.state.reset(&self.config);
    }
}

/// Count an obstacle once its trailing edge passes the player, re-arming the
/// latch once a new obstacle is back in front of the player
fn update_score(
    state: &mut SessionState,
    best: &mut BestScore,
    events: &mut VecDeque<SimEvent>,
    config: &SimConfig,
    viewport_width: f32,
) {
    let x = state.player.position.x;
    let obstacle = &mut state.obstacle;

    if obstacle.has_cleared(x, viewport_width, config.obstacle_width) && !obstacle.passed {
        obstacle.passed = true;
        state.score += 1;
        push_event(events, SimEvent::Scored { score: state.score });

        if state.score > state.best_score {
            state.best_score = state.score;
            best.record(state.best_score);
            push_event(
                events,
                SimEvent::NewBest {
                    best: state.best_score,
                },
            );
        }
    } else if obstacle.is_ahead_of(x, viewport_width) {
        obstacle.passed = false;
    }
}

fn push_event(events: &mut VecDeque<SimEvent>, event: SimEvent) {
    if events.len() >= MAX_PENDING_EVENTS {
        events.pop_front();
    }
    events.push_back(event);
}
