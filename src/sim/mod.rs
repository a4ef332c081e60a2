//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per display frame, no wall-clock time
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod input;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_collision, remove_offscreen};
pub use difficulty::{gravity_for, next_speed, spawn_threshold, speed_after};
pub use input::JumpBuffer;
pub use spawn::{Spawner, draw_tier, wants_pair};
pub use state::{Character, GameEvent, HeightTier, Obstacle, RunState, Viewport, World};
pub use tick::{TickInput, tick};
