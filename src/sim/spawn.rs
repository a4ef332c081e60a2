//! Obstacle generation
//!
//! A cadence timer decides when to spawn; a weighted draw decides how tall.
//! Once the run is fast enough a second, smaller obstacle may trail the first.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{HeightTier, Obstacle, World};
use crate::tuning::{TierCuts, TierHeights, Tuning};

/// Frame counter between spawns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    pub timer: u32,
}

impl Spawner {
    /// Count one frame; true when the threshold is exceeded (timer resets)
    pub fn advance(&mut self, threshold: f32) -> bool {
        self.timer = self.timer.saturating_add(1);
        if self.timer as f32 > threshold {
            self.timer = 0;
            true
        } else {
            false
        }
    }
}

/// Map a uniform roll in `[0, 1)` onto a height tier
pub fn draw_tier(roll: f32, cuts: &TierCuts) -> HeightTier {
    if roll > cuts.tall_cut {
        HeightTier::Tall
    } else if roll > cuts.medium_cut {
        HeightTier::Medium
    } else {
        HeightTier::Short
    }
}

impl HeightTier {
    pub fn height(&self, heights: &TierHeights) -> f32 {
        match self {
            HeightTier::Short => heights.short,
            HeightTier::Medium => heights.medium,
            HeightTier::Tall => heights.tall,
        }
    }
}

/// Whether a trailing obstacle joins this spawn
pub fn wants_pair(roll: f32, speed: f32, tuning: &Tuning) -> bool {
    speed > tuning.pair_min_speed && roll < tuning.pair_chance
}

impl World {
    /// Spawn a lead obstacle (and maybe a trailing one) just past the right
    /// edge. Returns the number of obstacles added.
    pub fn spawn_obstacles(&mut self, ground_y: f32) -> u32 {
        let tier_roll: f32 = self.rng.random();
        let pair_roll: f32 = self.rng.random();

        let tier = draw_tier(tier_roll, &self.tuning.tier_cuts);
        let height = tier.height(&self.tuning.tier_heights);
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            tier,
            trailing: false,
            pos: Vec2::new(self.viewport.width + self.tuning.spawn_offset, ground_y - height),
            size: Vec2::new(self.tuning.obstacle_width, height),
        });

        if !wants_pair(pair_roll, self.speed, &self.tuning) {
            log::debug!("Spawned {:?} obstacle #{}", tier, id);
            return 1;
        }

        let pair_id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id: pair_id,
            tier: HeightTier::Short,
            trailing: true,
            pos: Vec2::new(
                self.viewport.width + self.tuning.pair_offset,
                ground_y - self.tuning.pair_height,
            ),
            size: Vec2::new(self.tuning.pair_width, self.tuning.pair_height),
        });
        log::debug!("Spawned {:?} obstacle #{} with trailing #{}", tier, id, pair_id);
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Viewport;

    #[test]
    fn test_draw_tier_cut_points() {
        let cuts = TierCuts::default();
        assert_eq!(draw_tier(0.0, &cuts), HeightTier::Short);
        assert_eq!(draw_tier(0.7, &cuts), HeightTier::Short);
        assert_eq!(draw_tier(0.71, &cuts), HeightTier::Medium);
        assert_eq!(draw_tier(0.9, &cuts), HeightTier::Medium);
        assert_eq!(draw_tier(0.91, &cuts), HeightTier::Tall);
        assert_eq!(draw_tier(0.9999, &cuts), HeightTier::Tall);
    }

    #[test]
    fn test_draw_tier_distribution() {
        let cuts = TierCuts::default();
        let n = 10_000;
        let mut counts = [0u32; 3];
        for i in 0..n {
            let roll = i as f32 / n as f32;
            match draw_tier(roll, &cuts) {
                HeightTier::Short => counts[0] += 1,
                HeightTier::Medium => counts[1] += 1,
                HeightTier::Tall => counts[2] += 1,
            }
        }
        // ~70% / 20% / 10% over an even sweep of rolls
        assert!((6900..=7100).contains(&counts[0]));
        assert!((1900..=2100).contains(&counts[1]));
        assert!((900..=1100).contains(&counts[2]));
    }

    #[test]
    fn test_spawner_cadence() {
        let mut spawner = Spawner::default();
        let fired: Vec<u32> = (1..=200).filter(|_| spawner.advance(66.0)).collect();
        // Fires on the 67th frame, then every 67 frames
        assert_eq!(fired, vec![67, 134]);
    }

    #[test]
    fn test_pair_needs_speed_and_luck() {
        let tuning = Tuning::default();
        assert!(!wants_pair(0.1, 6.0, &tuning));
        assert!(!wants_pair(0.1, 9.0, &tuning));
        assert!(wants_pair(0.1, 9.5, &tuning));
        assert!(!wants_pair(0.5, 9.5, &tuning));
    }

    #[test]
    fn test_spawned_obstacles_sit_on_ground_offscreen() {
        let mut world = World::new(3, Tuning::default(), Viewport::new(800.0, 400.0));
        let ground_y = world.ground_y();
        for _ in 0..50 {
            world.spawn_obstacles(ground_y);
        }
        assert!(world.obstacles.len() >= 50);
        for o in &world.obstacles {
            assert!(o.pos.x > world.viewport.width);
            assert!((o.pos.y + o.size.y - ground_y).abs() < 1e-3);
            assert!(!o.trailing, "no pairs at the starting speed");
        }
    }

    #[test]
    fn test_fast_runs_spawn_pairs() {
        let mut world = World::new(11, Tuning::default(), Viewport::new(800.0, 400.0));
        world.speed = 20.0;
        let ground_y = world.ground_y();
        let mut total = 0;
        for _ in 0..200 {
            total += world.spawn_obstacles(ground_y);
        }
        assert_eq!(total as usize, world.obstacles.len());
        let trailing: Vec<&Obstacle> = world.obstacles.iter().filter(|o| o.trailing).collect();
        assert!(!trailing.is_empty());
        for o in trailing {
            assert_eq!(o.size, Vec2::new(28.0, 40.0));
            assert!((o.pos.x - 890.0).abs() < 1e-3);
        }
    }
}
