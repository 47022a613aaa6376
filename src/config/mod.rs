//! World configuration — generation constants and gameplay tuning.
//!
//! Loaded from a RON file when the host provides one; every field has a
//! default matching the shipped `assets/config/world.ron`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

use crate::shared::*;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of one tile, in pixels.
    pub tile_size: f32,
    pub world_width: f32,
    pub world_height: f32,
    /// Pixel depth of the surface crust.
    pub ground_level: f32,
    /// Number of columns left open for the entry shaft.
    pub shaft_width: u32,
    pub player_size: f32,
    pub base_speed: f32,
    pub player_damage: u32,
    pub momentum_decay: f32,
    pub experience_per_tile: u32,
    /// An ore roll in [0, 100] strictly above this seeds a new cluster.
    pub ore_roll_threshold: u32,
    pub shot_interval_secs: f32,
    /// How long an arrow stays live before it is spent.
    pub shot_lifetime_secs: f32,
    pub shot_damage: u32,
    pub wave_interval_secs: f32,
    pub enemy_health: u32,
    pub base_health: u32,
    /// Fixed generation seed; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_size: 32.0,
            world_width: 1500.0,
            world_height: 2500.0,
            ground_level: 400.0,
            shaft_width: 2,
            player_size: 64.0,
            base_speed: 150.0,
            player_damage: 1,
            momentum_decay: 0.94,
            experience_per_tile: 10,
            ore_roll_threshold: 99,
            shot_interval_secs: 0.5,
            shot_lifetime_secs: 1.0,
            shot_damage: 50,
            wave_interval_secs: 60.0,
            enemy_health: 100,
            base_health: 100,
            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn from_ron_str(source: &str) -> Result<Self, String> {
        let config: WorldConfig =
            ron::from_str(source).map_err(|e| format!("Failed to parse world config: {e}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a config file, falling back to defaults (with a warning) when the
    /// file is missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                warn!(
                    "[Config] Could not read {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };
        match Self::from_ron_str(&source) {
            Ok(config) => {
                info!("[Config] Loaded world config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("[Config] {} ({}). Using defaults.", e, path.display());
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.tile_size <= 0.0 {
            return Err(format!("tile_size must be positive, got {}", self.tile_size));
        }
        if self.shaft_width == 0 {
            return Err("shaft_width must be at least 1".to_string());
        }
        if self.columns() < 1 || self.rows() < 1 {
            return Err(format!(
                "world {}x{} below ground level {} holds no tiles",
                self.world_width, self.world_height, self.ground_level
            ));
        }
        if !(0.0..=1.0).contains(&self.momentum_decay) {
            return Err(format!(
                "momentum_decay must lie in [0, 1], got {}",
                self.momentum_decay
            ));
        }
        if !(self.shot_interval_secs > 0.0
            && self.shot_lifetime_secs > 0.0
            && self.wave_interval_secs > 0.0)
        {
            return Err(format!(
                "timer durations must be positive, got shot {} / lifetime {} / wave {}",
                self.shot_interval_secs, self.shot_lifetime_secs, self.wave_interval_secs
            ));
        }
        Ok(())
    }

    pub fn columns(&self) -> i32 {
        (self.world_width / self.tile_size).ceil() as i32
    }

    pub fn rows(&self) -> i32 {
        ((self.world_height - self.ground_level) / self.tile_size).floor() as i32
    }

    /// Columns kept open for the entry shaft, clipped to the grid.
    pub fn shaft_columns(&self) -> Range<i32> {
        let start = (self.world_width / 2.0 / self.tile_size).floor() as i32;
        let end = (start + self.shaft_width as i32).min(self.columns());
        start.min(end)..end
    }

    /// World-space position of a tile.
    pub fn tile_position(&self, coord: TileCoord) -> Vec2 {
        Vec2::new(
            coord.col as f32 * self.tile_size,
            self.ground_level + coord.row as f32 * self.tile_size,
        )
    }

    /// Fraction of total world height reached by the top of `row`.
    pub fn depth_ratio(&self, row: i32) -> f32 {
        (self.ground_level + row as f32 * self.tile_size) / self.world_height
    }

    /// The player starts standing at the base, above the shaft.
    pub fn player_spawn(&self) -> Vec2 {
        self.base_position()
    }

    /// Enemies walk in from the left, just above the crust.
    pub fn enemy_spawn(&self) -> Vec2 {
        Vec2::new(self.player_size * 3.0, self.ground_level - self.player_size)
    }

    /// The base sits on the crust, centred over the shaft.
    pub fn base_position(&self) -> Vec2 {
        Vec2::new(
            self.world_width / 2.0,
            self.ground_level - self.player_size / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_shipped_world() {
        let config = WorldConfig::default();
        assert_eq!(config.columns(), 47);
        assert_eq!(config.rows(), 65);
        assert_eq!(config.shaft_columns(), 23..25);
    }

    #[test]
    fn shipped_ron_file_parses_to_defaults() {
        let source = include_str!("../../assets/config/world.ron");
        let config = WorldConfig::from_ron_str(source).expect("shipped config should parse");
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn partial_ron_keeps_defaults_for_missing_fields() {
        let config = WorldConfig::from_ron_str("(seed: Some(7), base_speed: 90.0)")
            .expect("partial config should parse");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.base_speed, 90.0);
        assert_eq!(config.tile_size, 32.0);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        assert!(WorldConfig::from_ron_str("(tile_size: 0.0)").is_err());
        assert!(WorldConfig::from_ron_str("(shaft_width: 0)").is_err());
        assert!(WorldConfig::from_ron_str("(world_height: 100.0)").is_err());
        assert!(WorldConfig::from_ron_str("(shot_interval_secs: 0.0)").is_err());
        assert!(WorldConfig::from_ron_str("(shot_lifetime_secs: -1.0)").is_err());
        assert!(WorldConfig::from_ron_str("not ron at all").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = WorldConfig::load_or_default("does/not/exist.ron");
        assert_eq!(config, WorldConfig::default());
    }

    #[test]
    fn shaft_is_clipped_at_the_right_edge() {
        let config = WorldConfig {
            world_width: 64.0,
            shaft_width: 4,
            ..WorldConfig::default()
        };
        assert_eq!(config.columns(), 2);
        assert_eq!(config.shaft_columns(), 1..2);
    }

    #[test]
    fn enemies_spawn_left_of_the_base_above_the_crust() {
        let config = WorldConfig::default();
        assert_eq!(config.enemy_spawn(), Vec2::new(192.0, 336.0));
        assert!(config.enemy_spawn().x < config.base_position().x);
    }

    #[test]
    fn tile_positions_start_at_ground_level() {
        let config = WorldConfig::default();
        assert_eq!(config.tile_position(TileCoord::new(0, 0)), Vec2::new(0.0, 400.0));
        assert_eq!(config.tile_position(TileCoord::new(3, 2)), Vec2::new(96.0, 464.0));
    }
}
