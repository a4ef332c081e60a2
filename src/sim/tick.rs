//! Per-frame simulation tick
//!
//! One call advances the world by exactly one display frame, in a fixed
//! order: input buffer, physics, difficulty, spawning and scrolling,
//! collision and cleanup, then score.

use super::collision::{first_collision, remove_offscreen};
use super::difficulty::{gravity_for, next_speed, spawn_threshold};
use super::state::{GameEvent, RunState, World};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump trigger arriving with this frame (key/touch)
    pub jump: bool,
    /// Demo mode - the simulation presses jump by itself
    pub autopilot: bool,
}

/// Advance the world by one frame, returning what happened
pub fn tick(world: &mut World, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if input.jump {
        world.request_jump();
    }

    if world.run_state != RunState::Running {
        return events;
    }

    // Nothing to simulate against before the host has laid out a viewport
    if !world.viewport.is_drawable() {
        return events;
    }

    let ground_y = world.ground_y();

    if input.autopilot {
        autopilot(world);
    }

    // Input buffer
    let jumped = world.jump_buffer.take_if_grounded(world.character.grounded);
    world.jump_buffer.expire();

    // Physics
    if jumped {
        world.character.jump(world.tuning.jump_impulse);
        events.push(GameEvent::Jumped);
        log::debug!("Jump at score {}", world.score);
    }
    let gravity = gravity_for(world.speed, &world.tuning);
    if world.character.integrate(gravity, ground_y) {
        events.push(GameEvent::Landed);
    }
    world.character.animate(world.tuning.anim_tick_limit);

    // Difficulty
    world.speed = next_speed(world.speed, world.tuning.speed_growth);

    // Spawning
    let threshold = spawn_threshold(world.speed, &world.tuning);
    if world.spawner.advance(threshold) {
        let count = world.spawn_obstacles(ground_y);
        events.push(GameEvent::Spawned { count });
    }

    // Scroll
    let speed = world.speed;
    for obstacle in &mut world.obstacles {
        obstacle.pos.x -= speed;
    }

    // Collision, then cleanup regardless of the outcome
    let hit = first_collision(&world.character, &world.obstacles);
    let removed = remove_offscreen(&mut world.obstacles);
    if removed > 0 {
        events.push(GameEvent::Despawned { count: removed });
    }

    if let Some(obstacle_id) = hit {
        world.run_state = RunState::Ended;
        events.push(GameEvent::Collided { obstacle_id });
        log::info!(
            "Collision with obstacle #{} at score {} (speed {:.2})",
            obstacle_id,
            world.score,
            world.speed
        );
        return events;
    }

    world.score += 1;
    events
}

/// Request a jump when the nearest obstacle ahead is about to arrive
fn autopilot(world: &mut World) {
    if !world.character.grounded {
        return;
    }

    let front = world.character.pos.x + world.character.size.x;
    let reach = world.speed * world.tuning.autopilot_lead_frames;
    let threat = world
        .obstacles
        .iter()
        .filter(|o| o.pos.x + o.size.x >= world.character.pos.x)
        .map(|o| o.pos.x - front)
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    if let Some(gap) = threat {
        if gap <= reach {
            world.request_jump();
        }
    }
}
