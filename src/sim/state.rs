//! Game state and core simulation types
//!
//! Everything a run needs lives in [`World`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::JumpBuffer;
use super::spawn::Spawner;
use crate::tuning::Tuning;

/// Run state of the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Frames advance
    Running,
    /// Frozen by the player; resume continues where it stopped
    Paused,
    /// Frozen by a collision; only a restart continues
    Ended,
}

/// Things that happened during a tick, for sound and effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped,
    Landed,
    Spawned { count: u32 },
    Despawned { count: u32 },
    Collided { obstacle_id: u32 },
}

/// Display dimensions supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// False before the first layout (zero, negative or NaN dimensions)
    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Ground line, re-derived from the current height on every call
    pub fn ground_y(&self, ground_fraction: f32) -> f32 {
        self.height.max(0.0) * ground_fraction
    }
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    /// Top-left corner; x stays put for the whole run
    pub pos: Vec2,
    pub size: Vec2,
    pub vel_y: f32,
    /// Gravity applied on the last integration step
    pub gravity: f32,
    pub grounded: bool,
    /// Frames since the animation phase last advanced
    pub anim_tick: u32,
    /// Animation phase driving the leg swing
    pub anim_frame: u32,
}

impl Character {
    /// Create a character standing on the ground
    pub fn new(tuning: &Tuning, viewport: &Viewport) -> Self {
        let mut character = Self {
            pos: Vec2::ZERO,
            size: Vec2::new(tuning.character_width, tuning.character_height),
            vel_y: 0.0,
            gravity: tuning.base_gravity,
            grounded: true,
            anim_tick: 0,
            anim_frame: 0,
        };
        character.place(tuning, viewport);
        character
    }

    /// Put the character back at its start position, at rest on the ground
    pub fn place(&mut self, tuning: &Tuning, viewport: &Viewport) {
        self.pos.x = viewport.width.max(0.0) * tuning.character_x_fraction;
        self.pos.y = viewport.ground_y(tuning.ground_fraction) - self.size.y;
        self.vel_y = 0.0;
        self.grounded = true;
        self.anim_tick = 0;
        self.anim_frame = 0;
    }

    /// Pull the character back onto a ground line that moved above it.
    /// Returns true if it had to move.
    pub fn clamp_to_ground(&mut self, ground_y: f32) -> bool {
        let floor = ground_y - self.size.y;
        if self.pos.y > floor || !self.pos.y.is_finite() {
            self.pos.y = floor;
            self.vel_y = 0.0;
            self.grounded = true;
            true
        } else {
            false
        }
    }
}

/// Height tier of an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeightTier {
    Short,
    Medium,
    Tall,
}

/// An obstacle scrolling toward the character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub tier: HeightTier,
    /// Smaller follow-up obstacle spawned behind a lead one
    pub trailing: bool,
    pub pos: Vec2,
    pub size: Vec2,
}

/// Complete simulation state for a run
#[derive(Debug, Clone)]
pub struct World {
    /// Balance parameters for this run
    pub tuning: Tuning,
    /// Base seed; each restart derives a fresh stream from it
    pub seed: u64,
    /// Number of restarts since creation
    pub restarts: u64,
    pub viewport: Viewport,
    pub character: Character,
    /// Active obstacles, oldest first
    pub obstacles: Vec<Obstacle>,
    /// Frames survived in the current run
    pub score: u64,
    /// Scroll speed (pixels per frame)
    pub speed: f32,
    pub run_state: RunState,
    pub spawner: Spawner,
    pub jump_buffer: JumpBuffer,
    pub(crate) rng: Pcg32,
    next_id: u32,
    /// Whether a drawable viewport has ever been applied
    laid_out: bool,
}

impl World {
    /// Create a running world with the given seed
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let character = Character::new(&tuning, &viewport);
        let jump_buffer = JumpBuffer::new(tuning.jump_buffer_frames);
        let speed = tuning.initial_speed;
        let laid_out = viewport.is_drawable();
        Self {
            tuning,
            seed,
            restarts: 0,
            viewport,
            character,
            obstacles: Vec::new(),
            score: 0,
            speed,
            run_state: RunState::Running,
            spawner: Spawner::default(),
            jump_buffer,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
            laid_out,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    pub fn ground_y(&self) -> f32 {
        self.viewport.ground_y(self.tuning.ground_fraction)
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    /// Register a jump trigger (key press, touch). Valid in any run state.
    pub fn request_jump(&mut self) {
        self.jump_buffer.request();
    }

    /// Apply new display dimensions. Only the first real layout moves the
    /// character; later ones just keep it above the ground line.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
        if !self.viewport.is_drawable() {
            log::warn!("Viewport {}x{} is not drawable, frames will be skipped", width, height);
            return;
        }
        if !self.laid_out {
            // The start position was computed without a layout
            self.laid_out = true;
            self.character.place(&self.tuning, &self.viewport);
        } else if self.character.clamp_to_ground(self.ground_y()) {
            log::debug!("Ground moved above the character, clamped");
        }
    }

    /// RUNNING -> PAUSED. Returns false if the world was not running.
    pub fn pause(&mut self) -> bool {
        if self.run_state != RunState::Running {
            log::warn!("Ignoring pause while {:?}", self.run_state);
            return false;
        }
        self.run_state = RunState::Paused;
        log::info!("Paused at score {}", self.score);
        true
    }

    /// PAUSED -> RUNNING. A run that ended in a collision must be restarted.
    pub fn resume(&mut self) -> bool {
        if self.run_state != RunState::Paused {
            log::warn!("Ignoring resume while {:?}", self.run_state);
            return false;
        }
        self.run_state = RunState::Running;
        log::info!("Resumed at score {}", self.score);
        true
    }

    /// Start a fresh run from any state
    pub fn restart(&mut self) {
        self.restarts += 1;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.restarts));
        self.obstacles.clear();
        self.score = 0;
        self.speed = self.tuning.initial_speed;
        self.character.place(&self.tuning, &self.viewport);
        self.laid_out = self.viewport.is_drawable();
        self.character.gravity = self.tuning.base_gravity;
        self.spawner = Spawner::default();
        self.jump_buffer.clear();
        self.run_state = RunState::Running;
        log::info!("Restarted (run {})", self.restarts + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(7, Tuning::default(), Viewport::new(1000.0, 500.0))
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_new_world_starts_running_on_ground() {
        let world = world();
        assert_eq!(world.run_state, RunState::Running);
        assert_eq!(world.score, 0);
        assert!(world.obstacles.is_empty());
        assert!(approx(world.character.pos.x, 200.0));
        assert!(approx(world.character.pos.y, 390.0 - 50.0));
        assert!(world.character.grounded);
    }

    #[test]
    fn test_pause_resume_transitions() {
        let mut world = world();
        assert!(!world.resume());
        assert!(world.pause());
        assert_eq!(world.run_state, RunState::Paused);
        assert!(!world.pause());
        assert!(world.resume());
        assert_eq!(world.run_state, RunState::Running);
    }

    #[test]
    fn test_resume_rejected_after_collision() {
        let mut world = world();
        world.run_state = RunState::Ended;
        assert!(!world.resume());
        assert!(!world.pause());
        assert_eq!(world.run_state, RunState::Ended);
    }

    #[test]
    fn test_ground_tracks_viewport_height() {
        let mut world = world();
        assert!(approx(world.ground_y(), 390.0));
        world.resize(1000.0, 1000.0);
        assert!(approx(world.ground_y(), 780.0));
    }

    #[test]
    fn test_first_layout_places_character() {
        let mut world = World::new(1, Tuning::default(), Viewport::new(0.0, 0.0));
        assert!(!world.viewport.is_drawable());
        world.resize(500.0, 100.0);
        assert!(approx(world.character.pos.x, 100.0));
        assert!(approx(world.character.pos.y, 78.0 - 50.0));

        // Later resizes leave x alone
        world.resize(2000.0, 100.0);
        assert!(approx(world.character.pos.x, 100.0));
    }

    #[test]
    fn test_shrinking_while_paused_keeps_character_above_ground() {
        let mut world = world();
        assert!(world.pause());
        world.resize(1000.0, 250.0);
        let body = world.character.rect();
        assert!(body.bottom() <= world.ground_y() + 1e-3);
        assert!(world.character.grounded);
        assert_eq!(world.character.vel_y, 0.0);
        assert_eq!(world.run_state, RunState::Paused);
    }

    #[test]
    fn test_growing_leaves_airborne_character_alone() {
        let mut world = world();
        world.character.pos.y = 100.0;
        world.character.vel_y = -5.0;
        world.character.grounded = false;
        world.resize(1000.0, 800.0);
        assert_eq!(world.character.pos.y, 100.0);
        assert_eq!(world.character.vel_y, -5.0);
        assert!(!world.character.grounded);
    }

    #[test]
    fn test_transient_empty_layout_keeps_jump_state() {
        let mut world = world();
        world.character.pos.y = 264.8;
        world.character.vel_y = -12.4;
        world.character.grounded = false;

        world.resize(0.0, 0.0);
        world.resize(1000.0, 500.0);
        assert_eq!(world.character.pos.y, 264.8);
        assert_eq!(world.character.vel_y, -12.4);
        assert!(!world.character.grounded);
        assert!(approx(world.character.pos.x, 200.0));
    }

    #[test]
    fn test_restart_without_layout_places_on_next_layout() {
        let mut world = world();
        world.resize(0.0, 0.0);
        world.restart();
        world.resize(500.0, 100.0);
        assert!(approx(world.character.pos.x, 100.0));
        assert!(approx(world.character.pos.y, 78.0 - 50.0));
        assert!(world.character.grounded);
    }

    #[test]
    fn test_viewport_drawable() {
        assert!(Viewport::new(1.0, 1.0).is_drawable());
        assert!(!Viewport::new(0.0, 100.0).is_drawable());
        assert!(!Viewport::new(100.0, -5.0).is_drawable());
        assert!(!Viewport::new(f32::NAN, 100.0).is_drawable());
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut world = world();
        let a = world.next_entity_id();
        let b = world.next_entity_id();
        assert_ne!(a, b);
    }
}
