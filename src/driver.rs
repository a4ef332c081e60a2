//! Frame driver
//!
//! Owns the [`World`] and steps it once per display frame. The run loop is an
//! explicit scheduler: each iteration checks the run state and the clock, and
//! exits as soon as either says stop. Pausing or crashing halts the loop;
//! nothing keeps ticking in the background.

use std::time::{Duration, Instant};

use crate::consts::TARGET_FPS;
use crate::sim::{GameEvent, RunState, TickInput, World, tick};
use crate::view::FrameView;

/// Source of display frames
pub trait FrameClock {
    /// Block until the next frame is due. False when no more frames will come.
    fn next_frame(&mut self) -> bool;
}

/// A fixed number of frames, delivered immediately (headless runs and tests)
#[derive(Debug, Clone)]
pub struct FixedFrames {
    remaining: u64,
}

impl FixedFrames {
    pub fn new(frames: u64) -> Self {
        Self { remaining: frames }
    }
}

impl FrameClock for FixedFrames {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }
}

/// Wall-clock paced frames at a fixed refresh rate
#[derive(Debug, Clone)]
pub struct RealtimeClock {
    frame_time: Duration,
    next_due: Option<Instant>,
    remaining: Option<u64>,
}

impl RealtimeClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_time: Duration::from_secs_f64(1.0 / fps.max(1) as f64),
            next_due: None,
            remaining: None,
        }
    }

    /// Stop after `frames` frames
    pub fn with_limit(mut self, frames: u64) -> Self {
        self.remaining = Some(frames);
        self
    }
}

impl Default for RealtimeClock {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

impl FrameClock for RealtimeClock {
    fn next_frame(&mut self) -> bool {
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return false;
            }
            *remaining -= 1;
        }

        let now = Instant::now();
        let due = self.next_due.unwrap_or(now);
        if due > now {
            std::thread::sleep(due - now);
        }
        // Drop missed frames instead of bursting to catch up
        let base = if due + self.frame_time < now { now } else { due };
        self.next_due = Some(base + self.frame_time);
        true
    }
}

/// Owns the simulation and schedules its frames
#[derive(Debug, Clone)]
pub struct FrameDriver {
    world: World,
    input: TickInput,
    events: Vec<GameEvent>,
    frames: u64,
}

impl FrameDriver {
    pub fn new(world: World) -> Self {
        Self {
            world,
            input: TickInput::default(),
            events: Vec::new(),
            frames: 0,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn view(&self) -> FrameView {
        FrameView::capture(&self.world)
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    pub fn run_state(&self) -> RunState {
        self.world.run_state
    }

    /// Total frames stepped by this driver, across restarts
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Jump trigger; may arrive at any time between frames
    pub fn request_jump(&mut self) {
        self.world.request_jump();
    }

    pub fn pause(&mut self) -> bool {
        self.world.pause()
    }

    /// Returns true when the host should start requesting frames again
    pub fn resume(&mut self) -> bool {
        self.world.resume()
    }

    pub fn restart(&mut self) {
        self.world.restart();
        self.events.clear();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.world.resize(width, height);
    }

    /// Step one frame if running. Returns whether another frame should be
    /// scheduled.
    pub fn frame(&mut self) -> bool {
        if !self.world.is_running() {
            return false;
        }
        let events = tick(&mut self.world, &self.input);
        self.events.extend(events);
        self.frames += 1;
        self.world.is_running()
    }

    /// Run frames from `clock` until the run stops or the clock runs out.
    /// Returns the number of frames stepped.
    pub fn run<C: FrameClock>(&mut self, clock: &mut C) -> u64 {
        let mut stepped = 0;
        loop {
            if !self.world.is_running() {
                break;
            }
            if !clock.next_frame() {
                break;
            }
            self.frame();
            stepped += 1;
        }
        log::debug!(
            "Frame loop stopped after {} frames ({:?})",
            stepped,
            self.world.run_state
        );
        stepped
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Viewport;
    use crate::tuning::Tuning;

    fn driver() -> FrameDriver {
        FrameDriver::new(World::new(42, Tuning::default(), Viewport::new(1000.0, 500.0)))
    }

    #[test]
    fn test_fixed_frames_exhaust() {
        let mut clock = FixedFrames::new(3);
        assert!(clock.next_frame());
        assert!(clock.next_frame());
        assert!(clock.next_frame());
        assert!(!clock.next_frame());
    }

    #[test]
    fn test_run_stops_when_clock_ends() {
        let mut driver = driver();
        let stepped = driver.run(&mut FixedFrames::new(30));
        assert_eq!(stepped, 30);
        assert_eq!(driver.score(), 30);
        assert_eq!(driver.frames(), 30);
    }

    #[test]
    fn test_run_halts_while_paused() {
        let mut driver = driver();
        driver.run(&mut FixedFrames::new(10));
        assert!(driver.pause());
        let stepped = driver.run(&mut FixedFrames::new(10));
        assert_eq!(stepped, 0);
        assert!(!driver.frame());
        assert_eq!(driver.score(), 10);

        assert!(driver.resume());
        driver.run(&mut FixedFrames::new(5));
        assert_eq!(driver.score(), 15);
    }

    #[test]
    fn test_run_stops_on_collision() {
        let mut driver = driver();
        // Nobody jumps, so the first obstacle ends the run
        let stepped = driver.run(&mut FixedFrames::new(10_000));
        assert!(stepped < 10_000);
        assert_eq!(driver.run_state(), RunState::Ended);
        let events = driver.drain_events();
        assert!(matches!(events.last(), Some(GameEvent::Collided { .. })));
        assert!(driver.drain_events().is_empty());
    }

    #[test]
    fn test_restart_after_collision_runs_again() {
        let mut driver = driver();
        driver.run(&mut FixedFrames::new(10_000));
        assert_eq!(driver.run_state(), RunState::Ended);
        assert!(!driver.resume());

        driver.restart();
        assert_eq!(driver.run_state(), RunState::Running);
        assert_eq!(driver.score(), 0);
        assert_eq!(driver.run(&mut FixedFrames::new(20)), 20);
    }

    #[test]
    fn test_realtime_clock_paces_frames() {
        let mut clock = RealtimeClock::new(200).with_limit(4);
        let start = Instant::now();
        let mut frames = 0;
        while clock.next_frame() {
            frames += 1;
        }
        assert_eq!(frames, 4);
        // First frame is immediate, the next three wait ~5ms each
        assert!(start.elapsed() >= Duration::from_millis(12));
    }
}
