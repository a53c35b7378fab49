//! Collision detection and response
//!
//! The ball against axis-aligned rectangles and the elliptical face.
//! At most one obstacle responds per tick; dispatch stops at the first
//! hit so responses never stack within a frame.

use glam::Vec2;

use super::course::{Face, Obstacle, TunnelState};
use super::geom::Rect;
use super::state::{Ball, Cue};
use crate::consts::WALL_MARGIN;
use crate::tuning::Tuning;

/// Reflect velocity off a surface, scaled by restitution
///
/// v' = v - 2(v·n)n·bounce
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2, bounce: f32) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal * bounce
}

/// Resolve obstacle collisions for this tick
///
/// Walks the obstacle list in course order and applies the first hit.
/// Returns the cue to surface, if any.
pub fn resolve(ball: &mut Ball, obstacles: &mut [Obstacle], tuning: &Tuning) -> Option<Cue> {
    for obstacle in obstacles.iter_mut() {
        match obstacle {
            Obstacle::Wall(rect) | Obstacle::Barrier(rect) | Obstacle::Water(rect) => {
                if rect.overlaps_ball(ball.pos, ball.radius) {
                    let speed = ball.speed();
                    resolve_rect(ball, rect, tuning);
                    return Some(Cue::Bounce { speed });
                }
            }
            Obstacle::Face(face) => {
                if let Some(cue) = resolve_face(ball, face, tuning) {
                    return Some(cue);
                }
            }
        }
    }
    None
}

/// Push the ball out of a rectangle along the axis of least penetration
fn resolve_rect(ball: &mut Ball, rect: &Rect, tuning: &Tuning) {
    let overlap_left = (ball.pos.x + ball.radius) - rect.pos.x;
    let overlap_right = rect.max().x - (ball.pos.x - ball.radius);
    let overlap_top = (ball.pos.y + ball.radius) - rect.pos.y;
    let overlap_bottom = rect.max().y - (ball.pos.y - ball.radius);

    let min_overlap_x = overlap_left.min(overlap_right);
    let min_overlap_y = overlap_top.min(overlap_bottom);

    if min_overlap_x < min_overlap_y {
        if overlap_left < overlap_right {
            ball.pos.x = rect.pos.x - ball.radius;
        } else {
            ball.pos.x = rect.max().x + ball.radius;
        }
        ball.vel.x *= -ball.bounce;
    } else {
        if overlap_top < overlap_bottom {
            ball.pos.y = rect.pos.y - ball.radius;
        } else {
            ball.pos.y = rect.max().y + ball.radius;
        }
        ball.vel.y *= -ball.bounce;
    }

    // Separate from the rectangle center so the next tick doesn't
    // immediately re-penetrate
    let away = (ball.pos - rect.center()).normalize_or_zero();
    ball.pos += away * tuning.separation_nudge;
}

/// Staged face resolution: mouth capture first, then the solid outline.
/// Both apertures are exempt from the solid response. Tunnel traversal
/// while captured is handled by the tick, not here.
fn resolve_face(ball: &mut Ball, face: &mut Face, tuning: &Tuning) -> Option<Cue> {
    if face.tunnel.is_captured() {
        return None;
    }

    if face.mouth.contains(ball.pos) {
        ball.vel = Vec2::ZERO;
        face.tunnel = TunnelState::Captured { progress: 0.0 };
        return Some(Cue::TunnelEnter);
    }

    if face.exit.contains(ball.pos) {
        return None;
    }

    let outline = face.outline();
    if outline.contains(ball.pos) {
        let speed = ball.speed();
        let inside = ball.pos;
        let delta = inside - outline.center;
        let angle = delta.y.atan2(delta.x);

        // Project out to the rim plus clearance
        let rim = outline.boundary_point(angle);
        ball.pos = rim + Vec2::from_angle(angle) * (ball.radius + tuning.escape_clearance);

        let normal = outline.outward_normal(inside);
        if normal != Vec2::ZERO {
            ball.vel = reflect_velocity(ball.vel, normal, ball.bounce);
        }
        return Some(Cue::Bounce { speed });
    }

    None
}

/// Clamp the ball inside the playable interior
///
/// The border walls handle most contacts; this is the safety net that
/// guarantees the ball can never leave the surface.
pub fn clamp_to_bounds(ball: &mut Ball, width: f32, height: f32) {
    if ball.pos.x - ball.radius < WALL_MARGIN {
        ball.pos.x = WALL_MARGIN + ball.radius;
        ball.vel.x = ball.vel.x.abs() * ball.bounce;
    }
    if ball.pos.x + ball.radius > width - WALL_MARGIN {
        ball.pos.x = width - WALL_MARGIN - ball.radius;
        ball.vel.x = -ball.vel.x.abs() * ball.bounce;
    }
    if ball.pos.y - ball.radius < WALL_MARGIN {
        ball.pos.y = WALL_MARGIN + ball.radius;
        ball.vel.y = ball.vel.y.abs() * ball.bounce;
    }
    if ball.pos.y + ball.radius > height - WALL_MARGIN {
        ball.pos.y = height - WALL_MARGIN - ball.radius;
        ball.vel.y = -ball.vel.y.abs() * ball.bounce;
    }
}
