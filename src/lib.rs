//! Dune Dash - An endless side-scrolling desert runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, run state)
//! - `driver`: Frame scheduling around the simulation
//! - `tuning`: Data-driven game balance
//! - `view`: Read-only per-frame snapshot for renderers

pub mod driver;
pub mod sim;
pub mod tuning;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use driver::{FixedFrames, FrameClock, FrameDriver, RealtimeClock};
pub use tuning::{Tuning, TuningError};
pub use view::FrameView;

/// Game configuration constants
pub mod consts {
    /// Display refresh the simulation is tuned for (one tick per frame)
    pub const TARGET_FPS: u32 = 60;

    /// Amplitude of the leg swing animation (pixels)
    pub const LEG_SWING_AMPLITUDE: f32 = 6.0;
    /// Phase step of the leg swing per animation frame (radians)
    pub const LEG_SWING_RATE: f32 = 0.5;

    /// Default viewport used by the headless runner
    pub const DEFAULT_VIEW_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEW_HEIGHT: f32 = 720.0;
}
