//! Read-only frame snapshot for renderers and HUDs
//!
//! Renderers never touch [`World`] directly; they draw a [`FrameView`].

use serde::Serialize;

use crate::sim::{Rect, RunState, Viewport, World};

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct FrameView {
    /// False before the host has a real layout; draw nothing
    pub drawable: bool,
    pub viewport: Viewport,
    pub ground_y: f32,
    pub character: Rect,
    /// Leg offset for the walk cycle
    pub leg_swing: f32,
    pub obstacles: Vec<Rect>,
    pub score: u64,
    pub speed: f32,
    pub run_state: RunState,
}

impl FrameView {
    pub fn capture(world: &World) -> Self {
        let drawable = world.viewport.is_drawable();
        Self {
            drawable,
            viewport: world.viewport,
            ground_y: world.ground_y(),
            character: world.character.rect(),
            leg_swing: world.character.leg_swing(),
            obstacles: if drawable {
                world.obstacles.iter().map(|o| o.rect()).collect()
            } else {
                Vec::new()
            },
            score: world.score,
            speed: world.speed,
            run_state: world.run_state,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_view_mirrors_world() {
        let mut world = World::new(5, Tuning::default(), Viewport::new(1000.0, 500.0));
        for _ in 0..120 {
            tick(&mut world, &TickInput::default());
        }
        let view = FrameView::capture(&world);
        assert!(view.drawable);
        assert_eq!(view.score, world.score);
        assert_eq!(view.obstacles.len(), world.obstacles.len());
        assert_eq!(view.character, world.character.rect());
        assert_eq!(view.run_state, world.run_state);
    }

    #[test]
    fn test_undrawable_view_is_empty() {
        let mut world = World::new(5, Tuning::default(), Viewport::new(1000.0, 500.0));
        for _ in 0..120 {
            tick(&mut world, &TickInput::default());
        }
        world.resize(0.0, 0.0);
        let view = FrameView::capture(&world);
        assert!(!view.drawable);
        assert!(view.obstacles.is_empty());
    }

    #[test]
    fn test_view_json_fields() {
        let world = World::new(5, Tuning::default(), Viewport::new(1000.0, 500.0));
        let json = FrameView::capture(&world).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 0);
        assert_eq!(value["run_state"], "Running");
        assert!(value["character"]["pos"].is_array());
        assert!(value["obstacles"].as_array().unwrap().is_empty());
    }
}
