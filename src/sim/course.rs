//! Course layout: border walls, the face obstacle, and scattered hazards
//!
//! One fixed hole per session. The scatter obstacles are drawn from the
//! session RNG, so a given seed always produces the same course.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geom::{Ellipse, Rect};
use crate::consts::WALL_THICKNESS;

/// Capture state of the face tunnel
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum TunnelState {
    /// No ball captured
    #[default]
    Free,
    /// Ball captured; progress indexes into the waypoint path
    Captured { progress: f32 },
}

impl TunnelState {
    pub fn is_captured(&self) -> bool {
        matches!(self, TunnelState::Captured { .. })
    }
}

/// The face obstacle: an elliptical solid with a mouth that swallows the
/// ball into a hidden waypoint path and an exit that spits it back out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Bounding box of the solid ellipse
    pub bounds: Rect,
    /// Entry aperture, exempt from solid collision
    pub mouth: Ellipse,
    /// Exit aperture, exempt from solid collision
    pub exit: Ellipse,
    /// Hidden waypoint path from mouth to exit
    pub path: Vec<Vec2>,
    /// Capture state
    pub tunnel: TunnelState,
}

impl Face {
    /// The solid outline as an ellipse
    pub fn outline(&self) -> Ellipse {
        Ellipse::from_rect(self.bounds)
    }

    /// Where the ball reappears on tunnel exit
    pub fn exit_position(&self, ball_radius: f32) -> Vec2 {
        Vec2::new(
            self.exit.center.x + self.exit.radii.x + ball_radius,
            self.exit.center.y,
        )
    }
}

/// A course obstacle
///
/// Water and barriers differ visually but share collision response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Obstacle {
    Wall(Rect),
    Barrier(Rect),
    Water(Rect),
    Face(Face),
}

impl Obstacle {
    /// The rectangle of a rectangular obstacle
    pub fn rect(&self) -> Option<&Rect> {
        match self {
            Obstacle::Wall(r) | Obstacle::Barrier(r) | Obstacle::Water(r) => Some(r),
            Obstacle::Face(_) => None,
        }
    }
}

/// Scatter obstacle count range per course
const SCATTER_MIN: u32 = 4;
const SCATTER_MAX: u32 = 6;
/// Placement attempts per scatter obstacle before giving up
const SCATTER_ATTEMPTS: u32 = 20;

/// Build the course for the given surface
///
/// Fixed iteration order matters to collision resolution: border walls
/// first, then the face, then the scatter.
pub fn build_course(width: f32, height: f32, rng: &mut Pcg32) -> Vec<Obstacle> {
    let mut obstacles = vec![
        Obstacle::Wall(Rect::new(0.0, 0.0, width, WALL_THICKNESS)),
        Obstacle::Wall(Rect::new(0.0, height - WALL_THICKNESS, width, WALL_THICKNESS)),
        Obstacle::Wall(Rect::new(0.0, 0.0, WALL_THICKNESS, height)),
        Obstacle::Wall(Rect::new(width - WALL_THICKNESS, 0.0, WALL_THICKNESS, height)),
        Obstacle::Face(build_face(width, height)),
    ];
    obstacles.extend(scatter_obstacles(width, height, rng));
    log::info!("course built: {} obstacles", obstacles.len());
    obstacles
}

/// The face obstacle with its hidden tunnel path
fn build_face(width: f32, height: f32) -> Face {
    let x = width * 0.35;
    let y = height * 0.25;
    Face {
        bounds: Rect::new(x, y, 170.0, 190.0),
        mouth: Ellipse::from_rect(Rect::new(x, y + 115.0, 42.0, 30.0)),
        exit: Ellipse::from_rect(Rect::new(x + 170.0, y + 95.0, 30.0, 18.0)),
        path: vec![
            Vec2::new(x + 21.0, y + 130.0),
            Vec2::new(x + 50.0, y + 110.0),
            Vec2::new(x + 80.0, y + 90.0),
            Vec2::new(x + 110.0, y + 100.0),
            Vec2::new(x + 140.0, y + 115.0),
            Vec2::new(x + 165.0, y + 105.0),
        ],
        tunnel: TunnelState::Free,
    }
}

/// Regions the scatter must stay clear of: the tee corner, the hole
/// corner, and the face's surroundings
fn avoid_areas(width: f32, height: f32) -> [Rect; 3] {
    [
        Rect::new(0.0, height * 0.8, width * 0.3, height * 0.2),
        Rect::new(width * 0.7, 0.0, width * 0.3, height * 0.3),
        Rect::new(width * 0.25, height * 0.15, width * 0.4, height * 0.6),
    ]
}

/// Randomized barrier/water rectangles, rejection-sampled out of the
/// avoid regions. A placement that fails every attempt is dropped, so a
/// course can come up slightly sparse.
fn scatter_obstacles(width: f32, height: f32, rng: &mut Pcg32) -> Vec<Obstacle> {
    let avoid = avoid_areas(width, height);
    let count = rng.random_range(SCATTER_MIN..=SCATTER_MAX);

    let mut out = Vec::new();
    for _ in 0..count {
        for _attempt in 0..SCATTER_ATTEMPTS {
            let rect = Rect::new(
                rng.random_range(0.0..width * 0.8),
                rng.random_range(0.0..height * 0.8),
                rng.random_range(30.0..90.0),
                rng.random_range(25.0..75.0),
            );
            if avoid.iter().any(|area| area.overlaps_rect(&rect)) {
                continue;
            }
            out.push(if rng.random_range(0.0..1.0) < 0.3 {
                Obstacle::Water(rect)
            } else {
                Obstacle::Barrier(rect)
            });
            break;
        }
    }
    out
}
