//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod course;
pub mod geom;
pub mod state;
pub mod stroke;
pub mod tick;

pub use course::{Face, Obstacle, TunnelState};
pub use geom::{Ellipse, Rect};
pub use state::{
    Aim, Ball, Cue, DeferredAction, GamePhase, GameState, Hole, Particle, StatusCode,
};
pub use stroke::{pointer_down, pointer_move, pointer_up};
pub use tick::tick;
