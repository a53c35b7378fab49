//! Pointer drag to stroke conversion
//!
//! Slingshot aim: grab near the ball, drag away, release to fire in the
//! opposite direction. Points arrive already in simulation coordinates;
//! surface-space mapping is the host's job.

use glam::Vec2;

use super::state::{Cue, DeferredAction, GamePhase, GameState};
use crate::consts::LOSS_DELAY_TICKS;

/// Pointer pressed at `point`
///
/// Starts a drag when the press lands near a resting session's ball.
pub fn pointer_down(state: &mut GameState, point: Vec2) -> Option<Cue> {
    if state.phase != GamePhase::Playing {
        return None;
    }
    if point.distance(state.ball.pos) >= state.tuning.grab_radius {
        return None;
    }
    state.aim.dragging = true;
    state.aim.origin = point;
    state.aim.angle = 0.0;
    state.aim.power = 0.0;
    Some(Cue::Grab)
}

/// Pointer moved to `point`
///
/// Only the latest position matters; power grows with the pull distance.
pub fn pointer_move(state: &mut GameState, point: Vec2) {
    if !state.aim.dragging {
        return;
    }
    let pull = state.aim.origin - point;
    state.aim.power = (pull.length() / 2.0).min(state.tuning.max_power);
    state.aim.angle = pull.y.atan2(pull.x);
}

/// Pointer released: fire the stroke if one is armed
///
/// A stroke fires only from a completed drag with actual pull, on a ball
/// at rest, while the session is playing. The drag state clears either
/// way.
pub fn pointer_up(state: &mut GameState) -> Option<Cue> {
    let was_dragging = state.aim.dragging;
    let angle = state.aim.angle;
    let power = state.aim.power;
    state.aim.clear();

    if !was_dragging || state.phase != GamePhase::Playing {
        return None;
    }
    if !state.ball.is_stopped() || power <= 0.0 {
        return None;
    }

    let mut vel = Vec2::from_angle(angle) * power * state.tuning.power_scale;
    // Cap the launch so full-power shots can't tunnel through thin
    // obstacles in a single step
    let speed = vel.length();
    if speed > state.tuning.max_shot_speed {
        vel *= state.tuning.max_shot_speed / speed;
    }
    state.ball.vel = vel;
    state.strokes += 1;
    log::debug!("stroke {}: power {:.1}", state.strokes, power);

    if state.strokes >= state.tuning.stroke_limit {
        state.schedule_action(LOSS_DELAY_TICKS, DeferredAction::DeclareLoss);
    }

    Some(Cue::Stroke { power })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Scheduled;

    fn playing_state() -> GameState {
        GameState::new(1000.0, 750.0, 5)
    }

    #[test]
    fn grab_requires_proximity() {
        let mut state = playing_state();
        let far = state.ball.pos + Vec2::new(200.0, 0.0);
        assert_eq!(pointer_down(&mut state, far), None);
        assert!(!state.aim.dragging);

        let near = state.ball.pos + Vec2::new(10.0, 0.0);
        assert_eq!(pointer_down(&mut state, near), Some(Cue::Grab));
        assert!(state.aim.dragging);
    }

    #[test]
    fn no_grab_outside_playing() {
        let mut state = playing_state();
        state.phase = GamePhase::Won;
        let pos = state.ball.pos;
        assert_eq!(pointer_down(&mut state, pos), None);
    }

    #[test]
    fn drag_sets_power_and_opposing_angle() {
        let mut state = playing_state();
        let start = state.ball.pos;
        pointer_down(&mut state, start);
        // Drag 100 px to the right: the shot points left
        pointer_move(&mut state, start + Vec2::new(100.0, 0.0));

        assert_eq!(state.aim.power, 50.0);
        assert!((state.aim.angle - std::f32::consts::PI).abs() < 1e-5);
        assert!((state.aim.power_fraction(&state.tuning) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn power_caps_at_max() {
        let mut state = playing_state();
        let start = state.ball.pos;
        pointer_down(&mut state, start);
        pointer_move(&mut state, start + Vec2::new(0.0, -400.0));
        assert_eq!(state.aim.power, state.tuning.max_power);
    }

    #[test]
    fn release_fires_one_stroke() {
        let mut state = playing_state();
        let start = state.ball.pos;
        pointer_down(&mut state, start);
        pointer_move(&mut state, start + Vec2::new(-40.0, 0.0));

        let cue = pointer_up(&mut state);

        assert_eq!(cue, Some(Cue::Stroke { power: 20.0 }));
        assert_eq!(state.strokes, 1);
        // Pull left means the ball fires right
        assert!((state.ball.vel.x - 20.0 * 0.25).abs() < 1e-4);
        assert!(state.ball.vel.y.abs() < 1e-4);
        assert!(!state.aim.dragging);
        assert_eq!(state.aim.power, 0.0);
    }

    #[test]
    fn launch_speed_is_capped() {
        let mut state = playing_state();
        let start = state.ball.pos;
        pointer_down(&mut state, start);
        pointer_move(&mut state, start + Vec2::new(-300.0, 0.0));

        pointer_up(&mut state);

        assert!((state.ball.speed() - state.tuning.max_shot_speed).abs() < 1e-4);
    }

    #[test]
    fn no_stroke_while_ball_moving() {
        let mut state = playing_state();
        state.ball.vel = Vec2::new(2.0, 0.0);
        let start = state.ball.pos;
        pointer_down(&mut state, start);
        pointer_move(&mut state, start + Vec2::new(-40.0, 0.0));

        assert_eq!(pointer_up(&mut state), None);
        assert_eq!(state.strokes, 0);
        assert_eq!(state.ball.vel, Vec2::new(2.0, 0.0));
        // The drag still clears
        assert!(!state.aim.dragging);
    }

    #[test]
    fn powerless_release_is_not_a_stroke() {
        let mut state = playing_state();
        let pos = state.ball.pos;
        pointer_down(&mut state, pos);
        assert_eq!(pointer_up(&mut state), None);
        assert_eq!(state.strokes, 0);
    }

    #[test]
    fn release_without_grab_does_nothing() {
        let mut state = playing_state();
        assert_eq!(pointer_up(&mut state), None);
        assert_eq!(state.strokes, 0);
    }

    #[test]
    fn limit_stroke_schedules_the_loss() {
        let mut state = playing_state();
        state.strokes = state.tuning.stroke_limit - 1;
        let start = state.ball.pos;
        pointer_down(&mut state, start);
        pointer_move(&mut state, start + Vec2::new(-20.0, 0.0));
        pointer_up(&mut state);

        assert_eq!(state.strokes, state.tuning.stroke_limit);
        assert!(state.schedule.iter().any(|s| matches!(
            s,
            Scheduled {
                action: DeferredAction::DeclareLoss,
                ..
            }
        )));
    }
}
