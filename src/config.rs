//! Tunables for the simulation and shell.
//!
//! Defaults reproduce the classic values. Drop an `invaders.json` next to
//! the binary to override any subset of them.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed in world units per second.
    pub speed: f32,
    /// Distance from the bottom of the viewport to the ship's top edge.
    pub bottom_offset: f32,
    /// Clamp margin on each side of the viewport.
    pub margin: f32,
    /// Seconds between shots.
    pub fire_interval: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 60.0,
            height: 20.0,
            speed: 280.0,
            bottom_offset: 70.0,
            margin: 20.0,
            fire_interval: 0.22,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    pub width: f32,
    pub height: f32,
    /// Upward speed in world units per second.
    pub speed: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            width: 6.0,
            height: 16.0,
            speed: 480.0,
        }
    }
}

/// Shape and placement of the alien grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
    pub enemy_width: f32,
    pub enemy_height: f32,
    pub h_spacing: f32,
    pub v_spacing: f32,
    pub offset_top: f32,
    pub offset_left: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 5,
            cols: 10,
            enemy_width: 40.0,
            enemy_height: 28.0,
            h_spacing: 58.0,
            v_spacing: 46.0,
            offset_top: 70.0,
            offset_left: 80.0,
        }
    }
}

/// Shared motion of the grid and its two speed ramps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    /// Horizontal speed at the start of a game, world units per second.
    pub base_speed: f32,
    /// Vertical distance applied to every survivor on an edge bounce.
    pub drop_distance: f32,
    /// Multiplier applied to the shared speed on each bounce.
    pub bounce_factor: f32,
    /// Ceiling for the bounce ramp.
    pub bounce_speed_cap: f32,
    /// Additive speed bonus per destroyed enemy.
    pub kill_speed_bonus: f32,
    /// Ceiling for the kill ramp.
    pub kill_speed_cap: f32,
    /// Horizontal bound on each side of the viewport.
    pub side_margin: f32,
}

impl Default for FormationConfig {
    fn default() -> Self {
        Self {
            base_speed: 50.0,
            drop_distance: 24.0,
            bounce_factor: 1.1,
            bounce_speed_cap: 190.0,
            kill_speed_bonus: 3.0,
            kill_speed_cap: 220.0,
            side_margin: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// World-space viewport; the renderer scales this onto the terminal.
    pub view_width: f32,
    pub view_height: f32,
    pub player: PlayerConfig,
    pub projectile: ProjectileConfig,
    pub grid: GridConfig,
    pub formation: FormationConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            view_width: 960.0,
            view_height: 600.0,
            player: PlayerConfig::default(),
            projectile: ProjectileConfig::default(),
            grid: GridConfig::default(),
            formation: FormationConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reads overrides from `path` when the file exists, otherwise defaults.
    /// A malformed file is ignored rather than aborting the game.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => {
                    info!("loaded config overrides from {}", path.display());
                    config
                }
                Err(err) => {
                    warn!("ignoring malformed {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
