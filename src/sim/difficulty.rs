//! Difficulty scaling
//!
//! Scroll speed compounds every frame. Gravity and spawn cadence are pure
//! functions of speed, so the whole curve follows from elapsed frames.

use crate::tuning::Tuning;

/// Speed after one more frame. Saturates instead of overflowing to infinity.
#[inline]
pub fn next_speed(speed: f32, growth: f32) -> f32 {
    (speed * growth).min(f32::MAX)
}

/// Gravity for the current speed; faster runs fall faster
#[inline]
pub fn gravity_for(speed: f32, tuning: &Tuning) -> f32 {
    tuning.base_gravity + speed * tuning.gravity_per_speed
}

/// Frames between spawns at the current speed, never below the floor
#[inline]
pub fn spawn_threshold(speed: f32, tuning: &Tuning) -> f32 {
    (tuning.spawn_base - speed * tuning.spawn_speed_scale).max(tuning.spawn_floor)
}

/// Speed after `frames` frames of growth from the initial speed
pub fn speed_after(frames: u32, tuning: &Tuning) -> f32 {
    (tuning.initial_speed * tuning.speed_growth.powi(frames.min(i32::MAX as u32) as i32)).min(f32::MAX)
}
