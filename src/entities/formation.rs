use crate::config::{FormationConfig, GridConfig};

use super::Enemy;

/// Shared motion state for the alien grid. Every survivor marches with the
/// same direction and speed; bounces and kills ramp that speed through two
/// independently capped channels.
#[derive(Debug, Clone, PartialEq)]
pub struct Formation {
    /// +1.0 marching right, -1.0 marching left.
    pub direction: f32,
    /// World units per second, shared by all survivors.
    pub speed: f32,
}

impl Formation {
    pub fn new(base_speed: f32) -> Self {
        Self {
            direction: 1.0,
            speed: base_speed,
        }
    }

    /// Builds the full rows x cols grid at its starting offsets.
    pub fn spawn_grid(grid: &GridConfig) -> Vec<Enemy> {
        let mut enemies = Vec::with_capacity(grid.rows * grid.cols);
        for row in 0..grid.rows {
            for col in 0..grid.cols {
                enemies.push(Enemy::new(
                    grid.offset_left + col as f32 * grid.h_spacing,
                    grid.offset_top + row as f32 * grid.v_spacing,
                    grid.enemy_width,
                    grid.enemy_height,
                ));
            }
        }
        enemies
    }

    /// Signed horizontal velocity applied to every survivor.
    pub fn velocity(&self) -> f32 {
        self.direction * self.speed
    }

    /// Reverses the march and applies the multiplicative bounce ramp.
    pub fn bounce(&mut self, config: &FormationConfig) {
        self.direction = -self.direction;
        self.speed = (self.speed * config.bounce_factor).min(config.bounce_speed_cap);
    }

    /// Applies the additive per-kill ramp.
    pub fn reward_kill(&mut self, config: &FormationConfig) {
        self.speed = (self.speed + config.kill_speed_bonus).min(config.kill_speed_cap);
    }
}
