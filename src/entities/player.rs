use crate::config::{PlayerConfig, ProjectileConfig};

use super::Projectile;

/// The player's ship. Sits on a fixed row near the bottom of the viewport
/// and only ever moves horizontally.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Seconds until the next shot is allowed.
    pub fire_cooldown: f32,
    fire_interval: f32,
}

impl Player {
    pub fn new(config: &PlayerConfig, view_width: f32, view_height: f32) -> Self {
        Self {
            x: view_width / 2.0 - config.width / 2.0,
            y: view_height - config.bottom_offset,
            width: config.width,
            height: config.height,
            speed: config.speed,
            fire_cooldown: 0.0,
            fire_interval: config.fire_interval,
        }
    }

    /// Horizontal movement from held input, clamped to the playfield.
    /// `direction` is -1.0, 0.0 or 1.0 (opposing keys cancel upstream).
    pub fn advance(&mut self, direction: f32, dt: f32, min_x: f32, max_x: f32) {
        self.x = (self.x + direction * self.speed * dt).min(max_x).max(min_x);
    }

    pub fn tick_cooldown(&mut self, dt: f32) {
        self.fire_cooldown = (self.fire_cooldown - dt).max(0.0);
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    /// Spawns a bullet centered above the ship if the cooldown allows,
    /// restarting the cooldown on success.
    pub fn try_fire(&mut self, projectile: &ProjectileConfig) -> Option<Projectile> {
        if !self.can_fire() {
            return None;
        }
        self.fire_cooldown = self.fire_interval;
        Some(Projectile::new(
            self.x + self.width / 2.0 - projectile.width / 2.0,
            self.y - projectile.height,
            projectile,
        ))
    }
}
