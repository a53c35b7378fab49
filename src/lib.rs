//! Neon Putt - a single-screen mini-golf simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio synthesis, and input plumbing belong to the host
//! application. The host calls [`sim::tick`] once per display refresh and
//! forwards pointer events through [`sim::stroke`]; in return it gets a
//! read-only view of [`sim::GameState`] to draw from and a stream of
//! [`sim::Cue`] values to map to sounds and HUD flourishes.

pub mod sim;
pub mod tuning;

pub use sim::{Cue, GamePhase, GameState};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Nominal tick rate. Velocities are expressed in pixels per tick.
    pub const TICK_HZ: u32 = 60;

    /// Default play surface dimensions
    pub const SURFACE_WIDTH: f32 = 1000.0;
    pub const SURFACE_HEIGHT: f32 = 750.0;

    /// Border wall thickness
    pub const WALL_THICKNESS: f32 = 25.0;
    /// Interior clamp margin: wall thickness plus a buffer so the ball
    /// can never visually sink into a border wall
    pub const WALL_MARGIN: f32 = 35.0;

    /// Ball radius
    pub const BALL_RADIUS: f32 = 12.0;
    /// Hole radius
    pub const HOLE_RADIUS: f32 = 18.0;
    /// Distance of the tee and the hole from their nearest corner
    pub const CORNER_OFFSET: f32 = 100.0;

    /// Delay between the limit-reaching stroke and the loss
    pub const LOSS_DELAY_TICKS: u64 = TICK_HZ as u64;
    /// Delay between a terminal state and the automatic reset
    pub const RESET_DELAY_TICKS: u64 = 3 * TICK_HZ as u64;
    /// Lifetime of the transient overshoot message
    pub const MESSAGE_TICKS: u64 = 3 * TICK_HZ as u64 / 2;
    /// Length of the win celebration
    pub const CELEBRATION_TICKS: u64 = 8 * TICK_HZ as u64;
    /// Celebration particle count
    pub const CELEBRATION_PARTICLES: usize = 50;
}
