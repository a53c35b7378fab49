//! Game state and core simulation types
//!
//! All state that must survive a save/resume lives here; render-only
//! fields are serde-skipped.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::course::{self, Obstacle, TunnelState};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Accepting strokes
    Playing,
    /// Ball holed
    Won,
    /// Stroke limit exhausted
    Lost,
}

/// Discrete feedback cues for the host
///
/// The host maps these to sounds or haptics; the core never depends on
/// the mapping existing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    /// Pointer grabbed the ball to aim
    Grab,
    /// Stroke fired with the given power (0..max_power)
    Stroke { power: f32 },
    /// Ball bounced off an obstacle at the given impact speed
    Bounce { speed: f32 },
    /// Ball swallowed by the face mouth
    TunnelEnter,
    /// Ball ejected from the tunnel at the given speed
    TunnelExit { speed: f32 },
    /// Ball crossed the hole too fast to drop
    Overshoot,
    /// Hole made
    Win { under_par: bool },
    /// Out of strokes
    Lose,
}

/// Status codes for the host's text display
///
/// Stable codes only; wording is a presentation concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    Overshoot,
    WonUnderPar,
    WonOverPar,
    Lost,
}

impl StatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusCode::Overshoot => "overshoot",
            StatusCode::WonUnderPar => "won-under-par",
            StatusCode::WonOverPar => "won-over-par",
            StatusCode::Lost => "lost",
        }
    }
}

/// The player's ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Per-tick velocity retention (0..1)
    pub friction: f32,
    /// Restitution on collisions (0..1)
    pub bounce: f32,
}

impl Ball {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            friction: tuning.friction,
            bounce: tuning.bounce,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Strokes are only legal on a ball at full rest
    pub fn is_stopped(&self) -> bool {
        self.vel == Vec2::ZERO
    }
}

/// The hole
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hole {
    pub pos: Vec2,
    pub radius: f32,
}

/// Transient drag state while the pointer is held
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aim {
    pub dragging: bool,
    /// Where the drag started
    pub origin: Vec2,
    /// Shot direction (radians); opposes the drag
    pub angle: f32,
    /// Shot power (0..max_power)
    pub power: f32,
}

impl Aim {
    /// Meter fill for the HUD, 0..1
    pub fn power_fraction(&self, tuning: &Tuning) -> f32 {
        if tuning.max_power > 0.0 {
            self.power / tuning.max_power
        } else {
            0.0
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// A celebration particle (render-only)
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub size: f32,
    pub alpha: f32,
}

/// Actions that may be deferred to a future tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Stroke limit reached; declare the loss if still playing
    DeclareLoss,
    /// Clear the transient status message
    ClearMessage,
    /// Stop the win celebration
    EndCelebration,
    /// Return to a fresh session
    AutoReset,
}

/// A scheduled deferred action
///
/// Entries carry the generation they were scheduled under; the tick drops
/// entries from a previous generation without acting, so nothing stale
/// survives a reset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scheduled {
    pub fire_tick: u64,
    pub generation: u32,
    pub action: DeferredAction,
}

/// Complete game state
///
/// The one world object: constructed once, passed `&mut` to the tick and
/// stroke functions, read-only everywhere else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed (course layout, tunnel exits, celebration spawns)
    pub seed: u64,
    /// Play surface dimensions
    pub width: f32,
    pub height: f32,
    pub phase: GamePhase,
    /// Strokes taken this session
    pub strokes: u32,
    pub ball: Ball,
    pub hole: Hole,
    pub aim: Aim,
    pub obstacles: Vec<Obstacle>,
    /// Active status code for the HUD
    pub status: Option<StatusCode>,
    /// Win celebration in progress
    pub celebrating: bool,
    /// Celebration particles (render-only)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Session generation; bumped on reset to invalidate stale timers
    pub generation: u32,
    /// Pending deferred actions
    pub schedule: Vec<Scheduled>,
    /// Gameplay balance knobs
    pub tuning: Tuning,
    /// Session RNG
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a session on the given surface with default tuning
    pub fn new(width: f32, height: f32, seed: u64) -> Self {
        Self::with_tuning(width, height, seed, Tuning::default())
    }

    pub fn with_tuning(width: f32, height: f32, seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let obstacles = course::build_course(width, height, &mut rng);
        let start = Vec2::new(CORNER_OFFSET, height - CORNER_OFFSET);
        Self {
            seed,
            width,
            height,
            phase: GamePhase::Playing,
            strokes: 0,
            ball: Ball::new(start, &tuning),
            hole: Hole {
                pos: Vec2::new(width - CORNER_OFFSET, CORNER_OFFSET),
                radius: HOLE_RADIUS,
            },
            aim: Aim::default(),
            obstacles,
            status: None,
            celebrating: false,
            particles: Vec::new(),
            time_ticks: 0,
            generation: 0,
            schedule: Vec::new(),
            tuning,
            rng,
        }
    }

    /// Tee position for the current surface
    pub fn start_position(&self) -> Vec2 {
        Vec2::new(CORNER_OFFSET, self.height - CORNER_OFFSET)
    }

    /// Par comparison for the win message
    pub fn under_par(&self) -> bool {
        self.strokes <= self.tuning.par
    }

    /// Queue an action to fire `delay` ticks from now
    pub(crate) fn schedule_action(&mut self, delay: u64, action: DeferredAction) {
        self.schedule.push(Scheduled {
            fire_tick: self.time_ticks + delay,
            generation: self.generation,
            action,
        });
    }

    /// Restore the session to its initial state
    ///
    /// The course layout is kept; outstanding deferred actions become
    /// stale via the generation bump.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.phase = GamePhase::Playing;
        self.strokes = 0;
        self.ball.pos = self.start_position();
        self.ball.vel = Vec2::ZERO;
        self.aim.clear();
        self.status = None;
        self.celebrating = false;
        self.particles.clear();
        for obstacle in &mut self.obstacles {
            if let Obstacle::Face(face) = obstacle {
                face.tunnel = TunnelState::Free;
            }
        }
        log::debug!("session reset, generation {}", self.generation);
    }

    /// Spawn the win celebration: a screenful of spinning confetti
    /// starting above the surface
    pub(crate) fn spawn_celebration(&mut self) {
        self.celebrating = true;
        self.particles.clear();
        for _ in 0..CELEBRATION_PARTICLES {
            let particle = Particle {
                pos: Vec2::new(
                    self.rng.random_range(0.0..self.width),
                    -self.rng.random_range(50.0..550.0),
                ),
                vel: Vec2::new(
                    self.rng.random_range(-2.0..2.0),
                    self.rng.random_range(2.0..5.0),
                ),
                rotation: self.rng.random_range(0.0..std::f32::consts::TAU),
                rotation_speed: self.rng.random_range(-0.15..0.15),
                size: self.rng.random_range(20.0..40.0),
                alpha: self.rng.random_range(0.8..1.0),
            };
            self.particles.push(particle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_fresh() {
        let state = GameState::new(1000.0, 750.0, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.strokes, 0);
        assert_eq!(state.ball.pos, Vec2::new(100.0, 650.0));
        assert!(state.ball.is_stopped());
        assert_eq!(state.hole.pos, Vec2::new(900.0, 100.0));
        assert!(state.particles.is_empty());
        assert!(state.status.is_none());
    }

    #[test]
    fn reset_restores_everything() {
        let mut state = GameState::new(1000.0, 750.0, 1);
        state.phase = GamePhase::Won;
        state.strokes = 7;
        state.ball.pos = Vec2::new(500.0, 500.0);
        state.ball.vel = Vec2::new(3.0, -2.0);
        state.status = Some(StatusCode::WonUnderPar);
        state.spawn_celebration();
        for obstacle in &mut state.obstacles {
            if let Obstacle::Face(face) = obstacle {
                face.tunnel = TunnelState::Captured { progress: 2.5 };
            }
        }
        let generation = state.generation;

        state.reset();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.strokes, 0);
        assert_eq!(state.ball.pos, state.start_position());
        assert!(state.ball.is_stopped());
        assert!(state.status.is_none());
        assert!(!state.celebrating);
        assert!(state.particles.is_empty());
        assert_eq!(state.generation, generation + 1);
        for obstacle in &state.obstacles {
            if let Obstacle::Face(face) = obstacle {
                assert_eq!(face.tunnel, TunnelState::Free);
            }
        }
    }

    #[test]
    fn celebration_spawns_bounded_particles() {
        let mut state = GameState::new(1000.0, 750.0, 9);
        state.spawn_celebration();
        assert_eq!(state.particles.len(), crate::consts::CELEBRATION_PARTICLES);
        for p in &state.particles {
            assert!(p.pos.y < 0.0, "confetti starts above the surface");
            assert!((0.0..state.width).contains(&p.pos.x));
            assert!((2.0..5.0).contains(&p.vel.y));
            assert!((20.0..40.0).contains(&p.size));
            assert!((0.8..1.0).contains(&p.alpha));
        }
    }

    #[test]
    fn status_codes_are_stable() {
        assert_eq!(StatusCode::Overshoot.as_str(), "overshoot");
        assert_eq!(StatusCode::WonUnderPar.as_str(), "won-under-par");
        assert_eq!(StatusCode::WonOverPar.as_str(), "won-over-par");
        assert_eq!(StatusCode::Lost.as_str(), "lost");
    }

    #[test]
    fn state_serde_roundtrip() {
        let state = GameState::new(1000.0, 750.0, 1234);
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, state.seed);
        assert_eq!(back.phase, state.phase);
        assert_eq!(back.ball, state.ball);
        assert_eq!(back.obstacles, state.obstacles);
        // Render-only particles do not persist
        assert!(back.particles.is_empty());
    }

    #[test]
    fn under_par_tracks_strokes() {
        let mut state = GameState::new(1000.0, 750.0, 1);
        state.strokes = 3;
        assert!(state.under_par());
        state.strokes = 4;
        assert!(!state.under_par());
    }
}
