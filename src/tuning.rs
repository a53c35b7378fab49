//! Data-driven game balance
//!
//! Arcade feel lives in constants that were tuned by play, not derivation.
//! Hosts may load overrides from JSON; the defaults are the shipped game.
//! Every knob is optional in the JSON, so a file can override just one
//! value.

use serde::{Deserialize, Serialize};

/// Gameplay balance knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Per-tick velocity retention (0..1)
    pub friction: f32,
    /// Restitution on collisions (0..1)
    pub bounce: f32,
    /// Drag power ceiling
    pub max_power: f32,
    /// Power-to-velocity conversion for a stroke
    pub power_scale: f32,
    /// Speed cap on a stroke, keeps full-power shots from tunneling
    pub max_shot_speed: f32,
    /// Below this per-axis speed the ball snaps to rest
    pub stop_epsilon: f32,
    /// Pointer-to-ball distance that starts a drag
    pub grab_radius: f32,
    /// Extra per-tick damping inside the hole's magnetic annulus
    pub magnetic_factor: f32,
    /// Fastest speed the hole will swallow
    pub max_capture_speed: f32,
    /// Velocity retained when the hole rejects a fast ball
    pub overshoot_damping: f32,
    /// Ejection impulse away from the hole on an overshoot
    pub overshoot_kick: f32,
    /// Separation applied after a rectangle bounce
    pub separation_nudge: f32,
    /// Gap left between the ball and a surface it was pushed out of
    pub escape_clearance: f32,
    /// Waypoint progress per tick while captured in the tunnel
    pub tunnel_step: f32,
    /// Tunnel exit speed range, min inclusive, max exclusive
    pub tunnel_exit_speed_min: f32,
    pub tunnel_exit_speed_max: f32,
    /// Tunnel exit half-angle around horizontal (radians)
    pub tunnel_exit_spread: f32,
    /// Strokes before the round is lost
    pub stroke_limit: u32,
    /// Informational par for the scoring message
    pub par: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            friction: 0.98,
            bounce: 0.7,
            max_power: 100.0,
            power_scale: 0.25,
            max_shot_speed: 15.0,
            stop_epsilon: 0.1,
            grab_radius: 50.0,
            magnetic_factor: 0.95,
            max_capture_speed: 6.0,
            overshoot_damping: 0.3,
            overshoot_kick: 2.0,
            separation_nudge: 0.5,
            escape_clearance: 2.0,
            tunnel_step: 0.1,
            tunnel_exit_speed_min: 3.0,
            tunnel_exit_speed_max: 6.0,
            tunnel_exit_spread: std::f32::consts::FRAC_PI_4,
            stroke_limit: 20,
            par: 3,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the full knob set
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
