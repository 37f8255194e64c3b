use crate::config::ProjectileConfig;

use super::Rect;

/// A player bullet travelling straight up.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
}

impl Projectile {
    pub fn new(x: f32, y: f32, config: &ProjectileConfig) -> Self {
        Self {
            x,
            y,
            width: config.width,
            height: config.height,
            speed: config.speed,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.y -= self.speed * dt;
    }

    /// True once the trailing (bottom) edge has cleared the top of the
    /// viewport, i.e. the bullet is fully off-screen.
    pub fn is_off_top(&self) -> bool {
        self.y + self.height < 0.0
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}
