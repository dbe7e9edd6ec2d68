//! Collision detection
//!
//! The rocket is a circle; each obstacle carves its gap out of the world and
//! leaves two solid rectangles behind. Circle-vs-rectangle uses closest-point
//! clamping, so corners are rounded exactly.

use glam::Vec2;

use super::state::{Bounds, Obstacle, Player};
use crate::clamp_lenient;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Closest point inside the rectangle to `p`
    #[inline]
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            clamp_lenient(p.x, self.x, self.x + self.w),
            clamp_lenient(p.y, self.y, self.y + self.h),
        )
    }
}

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Flew off the top of the world
    Ceiling,
    /// Fell off the bottom of the world
    Ground,
    /// Hit a pipe (index into the obstacle queue)
    Obstacle(usize),
}

/// Circle overlaps rectangle (touching counts)
#[inline]
pub fn circle_rect_intersect(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let closest = rect.closest_point(center);
    center.distance_squared(closest) <= radius * radius
}

/// The two solid parts of an obstacle: above and below the gap
///
/// Heights never go negative; a world shrunk below the gap leaves an empty
/// (zero-height) part.
pub fn solid_rects(obstacle: &Obstacle, world_height: f32) -> [Rect; 2] {
    let top = obstacle.gap_top();
    let bottom = obstacle.gap_bottom();
    [
        Rect::new(obstacle.x, 0.0, obstacle.width, top.max(0.0)),
        Rect::new(
            obstacle.x,
            bottom,
            obstacle.width,
            (world_height - bottom).max(0.0),
        ),
    ]
}

/// Circle pokes out of the top or bottom of the world
pub fn boundary_collision(center: Vec2, radius: f32, bounds: Bounds) -> Option<Collision> {
    if center.y - radius < 0.0 {
        Some(Collision::Ceiling)
    } else if center.y + radius > bounds.height {
        Some(Collision::Ground)
    } else {
        None
    }
}

/// Circle overlaps either solid part of the obstacle
pub fn hits_obstacle(center: Vec2, radius: f32, obstacle: &Obstacle, world_height: f32) -> bool {
    solid_rects(obstacle, world_height)
        .iter()
        .any(|rect| circle_rect_intersect(center, radius, rect))
}

/// First collision for the player this tick (boundary before obstacles)
pub fn detect<'a, I>(player: &Player, obstacles: I, bounds: Bounds) -> Option<Collision>
where
    I: IntoIterator<Item = &'a Obstacle>,
{
    if let Some(hit) = boundary_collision(player.pos, player.radius, bounds) {
        return Some(hit);
    }
    obstacles
        .into_iter()
        .position(|o| hits_obstacle(player.pos, player.radius, o, bounds.height))
        .map(Collision::Obstacle)
}
