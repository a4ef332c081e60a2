//! Axis-aligned collision detection
//!
//! Character and obstacles are plain boxes. Overlap is strict: boxes that
//! only share an edge do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Character, Obstacle};

/// Axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

impl Character {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Entirely past the left edge of the screen
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}

/// ID of the first obstacle overlapping the character, if any
pub fn first_collision(character: &Character, obstacles: &[Obstacle]) -> Option<u32> {
    let body = character.rect();
    obstacles
        .iter()
        .find(|o| body.overlaps(&o.rect()))
        .map(|o| o.id)
}

/// Drop obstacles that have scrolled off the left edge, returning how many
pub fn remove_offscreen(obstacles: &mut Vec<Obstacle>) -> u32 {
    let before = obstacles.len();
    obstacles.retain(|o| !o.is_offscreen());
    (before - obstacles.len()) as u32
}
