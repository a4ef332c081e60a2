//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults reproduce the
//! shipped feel; a JSON file may override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating tuning data
#[derive(Debug, Error)]
pub enum TuningError {
    /// Tuning file could not be read
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning JSON is malformed
    #[error("invalid tuning json: {0}")]
    Parse(#[from] serde_json::Error),

    /// A parameter is outside its allowed range
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Cut points of the obstacle height distribution.
///
/// A uniform roll in `[0, 1)` above `tall_cut` yields a tall obstacle, above
/// `medium_cut` a medium one, anything else a short one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierCuts {
    pub medium_cut: f32,
    pub tall_cut: f32,
}

impl Default for TierCuts {
    fn default() -> Self {
        Self {
            medium_cut: 0.7,
            tall_cut: 0.9,
        }
    }
}

/// Heights of each obstacle tier (pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierHeights {
    pub short: f32,
    pub medium: f32,
    pub tall: f32,
}

impl Default for TierHeights {
    fn default() -> Self {
        Self {
            short: 40.0,
            medium: 80.0,
            tall: 100.0,
        }
    }
}

/// Complete balance sheet for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Ground level as a fraction of viewport height
    pub ground_fraction: f32,

    // === Character ===
    /// Character x position as a fraction of viewport width
    pub character_x_fraction: f32,
    pub character_width: f32,
    pub character_height: f32,
    /// Vertical velocity applied on jump (negative is up)
    pub jump_impulse: f32,
    /// Frames a jump request stays valid
    pub jump_buffer_frames: u32,
    /// Animation frame advances once the tick counter exceeds this
    pub anim_tick_limit: u32,

    // === Difficulty ===
    pub initial_speed: f32,
    /// Per-frame multiplicative speed growth
    pub speed_growth: f32,
    pub base_gravity: f32,
    /// Extra gravity per unit of scroll speed
    pub gravity_per_speed: f32,

    // === Spawning ===
    /// Spawn threshold before speed reduction (frames)
    pub spawn_base: f32,
    /// Threshold reduction per unit of speed
    pub spawn_speed_scale: f32,
    /// Threshold never drops below this (frames)
    pub spawn_floor: f32,
    pub obstacle_width: f32,
    /// Distance past the right edge where obstacles appear
    pub spawn_offset: f32,
    pub tier_cuts: TierCuts,
    pub tier_heights: TierHeights,

    // === Paired obstacles ===
    /// Chance of a trailing second obstacle once fast enough
    pub pair_chance: f32,
    /// Speed that must be exceeded before pairs can appear
    pub pair_min_speed: f32,
    pub pair_offset: f32,
    pub pair_width: f32,
    pub pair_height: f32,

    // === Autopilot ===
    /// How many frames of scroll ahead the autopilot looks before jumping
    pub autopilot_lead_frames: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ground_fraction: 0.78,

            character_x_fraction: 0.2,
            character_width: 70.0,
            character_height: 50.0,
            jump_impulse: -19.0,
            jump_buffer_frames: 8,
            anim_tick_limit: 5,

            initial_speed: 6.0,
            speed_growth: 1.00015,
            base_gravity: 1.2,
            gravity_per_speed: 0.02,

            spawn_base: 90.0,
            spawn_speed_scale: 4.0,
            spawn_floor: 40.0,
            obstacle_width: 30.0,
            spawn_offset: 40.0,
            tier_cuts: TierCuts::default(),
            tier_heights: TierHeights::default(),

            pair_chance: 0.25,
            pair_min_speed: 9.0,
            pair_offset: 90.0,
            pair_width: 28.0,
            pair_height: 40.0,

            autopilot_lead_frames: 6.0,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (for dumping the defaults)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite number, not negative",
                })
            }
        }

        fn fraction(field: &'static str, value: f32) -> Result<(), TuningError> {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must lie within [0, 1]",
                })
            }
        }

        fraction("ground_fraction", self.ground_fraction)?;
        fraction("character_x_fraction", self.character_x_fraction)?;
        positive("character_width", self.character_width)?;
        positive("character_height", self.character_height)?;
        if !(self.jump_impulse.is_finite() && self.jump_impulse < 0.0) {
            return Err(TuningError::Invalid {
                field: "jump_impulse",
                reason: "must be negative (upward)",
            });
        }

        positive("initial_speed", self.initial_speed)?;
        if !(self.speed_growth.is_finite() && self.speed_growth >= 1.0) {
            return Err(TuningError::Invalid {
                field: "speed_growth",
                reason: "must be at least 1.0",
            });
        }
        positive("base_gravity", self.base_gravity)?;
        if !(self.gravity_per_speed.is_finite() && self.gravity_per_speed >= 0.0) {
            return Err(TuningError::Invalid {
                field: "gravity_per_speed",
                reason: "must not be negative",
            });
        }

        positive("spawn_floor", self.spawn_floor)?;
        if !(self.spawn_base.is_finite() && self.spawn_base >= self.spawn_floor) {
            return Err(TuningError::Invalid {
                field: "spawn_base",
                reason: "must not be below spawn_floor",
            });
        }
        if !(self.spawn_speed_scale.is_finite() && self.spawn_speed_scale >= 0.0) {
            return Err(TuningError::Invalid {
                field: "spawn_speed_scale",
                reason: "must not be negative",
            });
        }
        positive("obstacle_width", self.obstacle_width)?;
        // Obstacles enter from the right edge, never on top of the character
        non_negative("spawn_offset", self.spawn_offset)?;

        let cuts = self.tier_cuts;
        fraction("tier_cuts.medium_cut", cuts.medium_cut)?;
        fraction("tier_cuts.tall_cut", cuts.tall_cut)?;
        if cuts.medium_cut > cuts.tall_cut {
            return Err(TuningError::Invalid {
                field: "tier_cuts",
                reason: "medium_cut must not exceed tall_cut",
            });
        }
        positive("tier_heights.short", self.tier_heights.short)?;
        positive("tier_heights.medium", self.tier_heights.medium)?;
        positive("tier_heights.tall", self.tier_heights.tall)?;

        fraction("pair_chance", self.pair_chance)?;
        positive("pair_width", self.pair_width)?;
        positive("pair_height", self.pair_height)?;
        non_negative("pair_min_speed", self.pair_min_speed)?;
        if !(self.pair_offset.is_finite()
            && self.pair_offset >= self.spawn_offset + self.obstacle_width)
        {
            return Err(TuningError::Invalid {
                field: "pair_offset",
                reason: "must leave the trailing obstacle behind the lead one",
            });
        }

        non_negative("autopilot_lead_frames", self.autopilot_lead_frames)?;

        Ok(())
    }
}
