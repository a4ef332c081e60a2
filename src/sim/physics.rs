//! Character physics
//!
//! Semi-implicit Euler on the vertical axis only. The character never
//! moves horizontally; the world scrolls past it.

use super::state::Character;
use crate::consts::{LEG_SWING_AMPLITUDE, LEG_SWING_RATE};

impl Character {
    /// Launch upward. Callers only do this while grounded.
    pub fn jump(&mut self, impulse: f32) {
        self.vel_y = impulse;
        self.grounded = false;
    }

    /// Apply one frame of gravity and resolve ground contact.
    ///
    /// Returns true on the frame the character touches down.
    pub fn integrate(&mut self, gravity: f32, ground_y: f32) -> bool {
        self.gravity = gravity;
        self.vel_y += gravity;
        self.pos.y += self.vel_y;

        let floor = ground_y - self.size.y;
        // NaN positions also snap back to the floor
        if self.pos.y >= floor || !self.pos.y.is_finite() {
            let landed = !self.grounded;
            self.pos.y = floor;
            self.vel_y = 0.0;
            self.grounded = true;
            landed
        } else {
            self.grounded = false;
            false
        }
    }

    /// Advance the walk cycle; runs at a fraction of the frame rate
    pub fn animate(&mut self, tick_limit: u32) {
        self.anim_tick += 1;
        if self.anim_tick > tick_limit {
            self.anim_frame = self.anim_frame.wrapping_add(1);
            self.anim_tick = 0;
        }
    }

    /// Leg offset for rendering (pixels, oscillates around zero)
    pub fn leg_swing(&self) -> f32 {
        (self.anim_frame as f32 * LEG_SWING_RATE).sin() * LEG_SWING_AMPLITUDE
    }
}
