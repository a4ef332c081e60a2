//! Jump input buffering
//!
//! A jump pressed slightly before landing still counts: the request stays
//! pending for a short window and fires on the first grounded frame.

use serde::{Deserialize, Serialize};

/// Pending jump request with an expiry countdown
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JumpBuffer {
    pending: bool,
    /// Frames left before the request lapses
    countdown: u32,
    /// Countdown restored on every request
    window: u32,
}

impl JumpBuffer {
    pub fn new(window: u32) -> Self {
        Self {
            pending: false,
            countdown: 0,
            window,
        }
    }

    /// Register a jump trigger. Repeated requests restart the window.
    pub fn request(&mut self) {
        self.pending = true;
        self.countdown = self.window;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Consume the request if the character can jump right now
    pub fn take_if_grounded(&mut self, grounded: bool) -> bool {
        if self.pending && grounded {
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Advance the countdown by one frame, dropping a stale request
    pub fn expire(&mut self) {
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.pending = false;
        }
    }

    pub fn clear(&mut self) {
        self.pending = false;
        self.countdown = 0;
    }
}
