//! Per-frame simulation tick
//!
//! Fixed-step advance driven by the host's frame scheduler: one call per
//! display refresh, velocities tuned for 60 Hz. Everything that mutates
//! the world (ball physics, tunnel traversal, hole capture, deferred
//! session transitions, celebration particles) happens inside this one
//! synchronous pass.

use glam::Vec2;
use rand::Rng;

use super::collision;
use super::course::{Obstacle, TunnelState};
use super::state::{Cue, DeferredAction, GamePhase, GameState, Scheduled, StatusCode};
use crate::consts::{CELEBRATION_TICKS, MESSAGE_TICKS, RESET_DELAY_TICKS};

/// Advance the game by one tick
///
/// Returns the feedback cues emitted this tick for the host to surface.
pub fn tick(state: &mut GameState) -> Vec<Cue> {
    let mut cues = Vec::new();

    state.time_ticks += 1;
    fire_due_actions(state, &mut cues);

    debug_assert!(
        captured_face_count(state) <= 1,
        "more than one face claims the ball"
    );

    if ball_in_tunnel(state) {
        if let Some(cue) = advance_tunnel(state) {
            cues.push(cue);
        }
    } else {
        advance_ball(state, &mut cues);
    }

    update_particles(state);

    cues
}

/// One step of free-ball physics: integrate, collide, clamp, damp
fn advance_ball(state: &mut GameState, cues: &mut Vec<Cue>) {
    state.ball.pos += state.ball.vel;

    if let Some(cue) = collision::resolve(&mut state.ball, &mut state.obstacles, &state.tuning) {
        cues.push(cue);
    }

    collision::clamp_to_bounds(&mut state.ball, state.width, state.height);

    state.ball.vel *= state.ball.friction;

    // Snap to rest once the drift is imperceptible
    let eps = state.tuning.stop_epsilon;
    if state.ball.vel.x.abs() < eps && state.ball.vel.y.abs() < eps {
        state.ball.vel = Vec2::ZERO;
    }

    if state.phase == GamePhase::Playing {
        check_hole(state, cues);
    }
}

/// Hole interaction: magnetic assist, then the speed-gated capture
fn check_hole(state: &mut GameState, cues: &mut Vec<Cue>) {
    let to_ball = state.ball.pos - state.hole.pos;
    let dist = to_ball.length();

    // Magnetic assist: extra damping while skirting the hole
    if dist > state.hole.radius && dist < state.hole.radius * 3.0 {
        state.ball.vel *= state.tuning.magnetic_factor;
    }

    if dist < state.hole.radius - state.ball.radius {
        if state.ball.speed() <= state.tuning.max_capture_speed {
            hole_out(state, cues);
        } else {
            overshoot(state, to_ball, dist, cues);
        }
    }
}

fn hole_out(state: &mut GameState, cues: &mut Vec<Cue>) {
    state.ball.vel = Vec2::ZERO;
    state.phase = GamePhase::Won;
    let under_par = state.under_par();
    state.status = Some(if under_par {
        StatusCode::WonUnderPar
    } else {
        StatusCode::WonOverPar
    });
    state.spawn_celebration();
    state.schedule_action(CELEBRATION_TICKS, DeferredAction::EndCelebration);
    state.schedule_action(RESET_DELAY_TICKS, DeferredAction::AutoReset);
    cues.push(Cue::Win { under_par });
    log::info!("holed out in {} strokes", state.strokes);
}

/// Too fast to drop: damp, kick the ball back out, park it just outside
/// the rim
fn overshoot(state: &mut GameState, to_ball: Vec2, dist: f32, cues: &mut Vec<Cue>) {
    if dist > 0.0 {
        let away = to_ball / dist;
        state.ball.vel = state.ball.vel * state.tuning.overshoot_damping
            + away * state.tuning.overshoot_kick;
        state.ball.pos =
            state.hole.pos + away * (state.hole.radius + state.tuning.escape_clearance);
    }
    state.status = Some(StatusCode::Overshoot);
    state.schedule_action(MESSAGE_TICKS, DeferredAction::ClearMessage);
    cues.push(Cue::Overshoot);
}

fn ball_in_tunnel(state: &GameState) -> bool {
    state
        .obstacles
        .iter()
        .any(|o| matches!(o, Obstacle::Face(f) if f.tunnel.is_captured()))
}

fn captured_face_count(state: &GameState) -> usize {
    state
        .obstacles
        .iter()
        .filter(|o| matches!(o, Obstacle::Face(f) if f.tunnel.is_captured()))
        .count()
}

/// Walk a captured ball along the hidden path; on reaching the end, eject
/// it past the exit aperture with a randomized kick
fn advance_tunnel(state: &mut GameState) -> Option<Cue> {
    let tuning = state.tuning;
    let ball = &mut state.ball;
    let rng = &mut state.rng;

    for obstacle in &mut state.obstacles {
        let Obstacle::Face(face) = obstacle else {
            continue;
        };
        let TunnelState::Captured { progress } = face.tunnel else {
            continue;
        };

        let last = face.path.len().saturating_sub(1);
        if progress >= last as f32 {
            ball.pos = face.exit_position(ball.radius);
            let angle = rng.random_range(-tuning.tunnel_exit_spread..tuning.tunnel_exit_spread);
            let speed =
                rng.random_range(tuning.tunnel_exit_speed_min..tuning.tunnel_exit_speed_max);
            ball.vel = Vec2::from_angle(angle) * speed;
            face.tunnel = TunnelState::Free;
            return Some(Cue::TunnelExit { speed });
        }

        let index = progress.floor() as usize;
        let next = (index + 1).min(last);
        let t = progress - index as f32;
        ball.pos = face.path[index].lerp(face.path[next], t);
        face.tunnel = TunnelState::Captured {
            progress: progress + tuning.tunnel_step,
        };
        return None;
    }
    None
}

/// Run due deferred actions; stale generations are dropped without acting
fn fire_due_actions(state: &mut GameState, cues: &mut Vec<Cue>) {
    let now = state.time_ticks;
    let mut due: Vec<Scheduled> = Vec::new();
    state.schedule.retain(|entry| {
        if entry.fire_tick <= now {
            due.push(*entry);
            false
        } else {
            true
        }
    });

    for entry in due {
        if entry.generation != state.generation {
            // Scheduled before a reset; must not touch the fresh session
            continue;
        }
        match entry.action {
            DeferredAction::DeclareLoss => {
                if state.phase == GamePhase::Playing {
                    state.phase = GamePhase::Lost;
                    state.status = Some(StatusCode::Lost);
                    state.schedule_action(RESET_DELAY_TICKS, DeferredAction::AutoReset);
                    cues.push(Cue::Lose);
                    log::info!("out of strokes after {}", state.strokes);
                }
            }
            DeferredAction::ClearMessage => {
                if state.status == Some(StatusCode::Overshoot) {
                    state.status = None;
                }
            }
            DeferredAction::EndCelebration => {
                state.celebrating = false;
                state.particles.clear();
            }
            DeferredAction::AutoReset => state.reset(),
        }
    }
}

/// Confetti physics: drift, spin, a little gravity, prune off-surface
fn update_particles(state: &mut GameState) {
    if state.particles.is_empty() {
        return;
    }
    let floor = state.height + 50.0;
    for p in &mut state.particles {
        p.pos += p.vel;
        p.rotation += p.rotation_speed;
        p.vel.y += 0.1;
    }
    state.particles.retain(|p| p.pos.y <= floor);
}
