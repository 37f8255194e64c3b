//! The per-frame simulation.
//!
//! All gameplay state lives in [`World`] and is advanced exclusively through
//! [`World::step`]; nothing in here touches the terminal, the clock or the
//! speaker. The shell reacts to the returned [`GameEvent`]s.

use log::info;

use crate::config::GameConfig;
use crate::entities::{Enemy, Formation, GamePhase, Player, Projectile};
use crate::input::InputSnapshot;

/// Things that happened during a step, for the shell to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Fired,
    EnemyDestroyed,
    FormationBounced,
    Won,
    Lost,
}

/// Complete game state. The shell owns exactly one and advances it once per
/// rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    config: GameConfig,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub formation: Formation,
    pub phase: GamePhase,
    initial_enemy_count: usize,
}

impl World {
    pub fn new(config: GameConfig) -> Self {
        let enemies = Formation::spawn_grid(&config.grid);
        let initial_enemy_count = enemies.len();
        Self {
            player: Player::new(&config.player, config.view_width, config.view_height),
            projectiles: Vec::new(),
            enemies,
            formation: Formation::new(config.formation.base_speed),
            phase: GamePhase::Playing,
            initial_enemy_count,
            config,
        }
    }

    /// Back to a fresh game: full grid, no bullets, base speed, recentered
    /// ship. Valid in any phase, mid-game included.
    pub fn reset(&mut self) {
        self.enemies = Formation::spawn_grid(&self.config.grid);
        self.projectiles.clear();
        self.formation = Formation::new(self.config.formation.base_speed);
        self.player = Player::new(&self.config.player, self.config.view_width, self.config.view_height);
        self.phase = GamePhase::Playing;
        info!("world reset, {} enemies on the grid", self.enemies.len());
    }

    /// Advances the game by `dt` seconds of held input. The frame clock caps
    /// `dt` (see [`crate::app::MAX_FRAME_DT`]) so bullets cannot tunnel
    /// through the grid on a slow frame. In a terminal phase this is a no-op
    /// until [`World::reset`].
    pub fn step(&mut self, dt: f32, input: &InputSnapshot) -> Vec<GameEvent> {
        let mut events = Vec::new();
        if self.phase != GamePhase::Playing {
            return events;
        }

        self.player.tick_cooldown(dt);

        // Opposing keys cancel out.
        let mut direction = 0.0;
        if input.left {
            direction -= 1.0;
        }
        if input.right {
            direction += 1.0;
        }
        let margin = self.config.player.margin;
        let max_x = self.config.view_width - self.player.width - margin;
        self.player.advance(direction, dt, margin, max_x);

        if input.fire
            && let Some(bullet) = self.player.try_fire(&self.config.projectile)
        {
            self.projectiles.push(bullet);
            events.push(GameEvent::Fired);
        }

        for bullet in &mut self.projectiles {
            bullet.advance(dt);
        }
        self.projectiles.retain(|b| !b.is_off_top());

        // March the grid. Any survivor past a side bound flips the whole
        // formation, once, no matter how many crossed this step.
        let velocity = self.formation.velocity();
        let left_limit = self.config.formation.side_margin;
        let right_limit = self.config.view_width - self.config.formation.side_margin;
        let mut hit_edge = false;
        for enemy in &mut self.enemies {
            enemy.drift(velocity, dt);
            if enemy.x <= left_limit || enemy.x + enemy.width >= right_limit {
                hit_edge = true;
            }
        }
        if hit_edge {
            self.formation.bounce(&self.config.formation);
            for enemy in &mut self.enemies {
                enemy.drop_down(self.config.formation.drop_distance);
            }
            events.push(GameEvent::FormationBounced);
        }

        // Newest bullet against newest enemy first; a bullet destroys at
        // most one enemy per step.
        let mut i = self.projectiles.len();
        while i > 0 {
            i -= 1;
            let bullet_rect = self.projectiles[i].rect();
            let mut j = self.enemies.len();
            while j > 0 {
                j -= 1;
                if bullet_rect.intersects(&self.enemies[j].rect()) {
                    self.enemies.remove(j);
                    self.projectiles.remove(i);
                    self.formation.reward_kill(&self.config.formation);
                    events.push(GameEvent::EnemyDestroyed);
                    break;
                }
            }
        }

        // Descent is checked before clearance, so a survivor on the player's
        // row ends the game even on an otherwise winning step.
        if self.enemies.iter().any(|e| e.bottom() >= self.player.y) {
            self.phase = GamePhase::Lost;
            events.push(GameEvent::Lost);
            info!("an invader reached the ship");
        } else if self.enemies.is_empty() {
            self.phase = GamePhase::Won;
            events.push(GameEvent::Won);
            info!("grid cleared");
        }

        events
    }

    /// One-line summary for the HUD.
    pub fn status_text(&self) -> String {
        match self.phase {
            GamePhase::Won => "You win! Every invader destroyed".to_string(),
            GamePhase::Lost => "Invaded! Press R to try again".to_string(),
            GamePhase::Playing => format!(
                "Aliens remaining: {}/{}",
                self.enemies.len(),
                self.initial_enemy_count
            ),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn initial_enemy_count(&self) -> usize {
        self.initial_enemy_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProjectileConfig;

    const DT: f32 = 1.0 / 60.0;

    fn world() -> World {
        World::new(GameConfig::default())
    }

    fn idle() -> InputSnapshot {
        InputSnapshot::default()
    }

    fn firing() -> InputSnapshot {
        InputSnapshot {
            fire: true,
            ..InputSnapshot::default()
        }
    }

    fn bullet_at(x: f32, y: f32) -> Projectile {
        Projectile::new(x, y, &ProjectileConfig::default())
    }

    #[test]
    fn test_terminal_phase_is_a_no_op() {
        let mut world = world();
        world.phase = GamePhase::Lost;
        let before = world.clone();

        let events = world.step(DT, &firing());
        assert!(events.is_empty());
        assert_eq!(world, before);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut world = world();
        let both = InputSnapshot {
            left: true,
            right: true,
            fire: false,
        };
        let x = world.player.x;
        world.step(DT, &both);
        assert_eq!(world.player.x, x);
    }

    #[test]
    fn test_fired_bullet_advances_on_its_spawn_step() {
        let mut world = world();
        let events = world.step(DT, &firing());
        assert!(events.contains(&GameEvent::Fired));
        assert_eq!(world.projectiles.len(), 1);
        // Spawned at player.y - height, then moved up within the same step.
        let expected = 530.0 - 16.0 - 480.0 * DT;
        assert!((world.projectiles[0].y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_collision_removes_both_and_rewards_formation() {
        let mut world = world();
        world.enemies = vec![Enemy::new(98.0, 55.0, 40.0, 28.0)];
        world.projectiles.push(bullet_at(100.0, 50.0));

        let events = world.step(DT, &idle());
        assert!(events.contains(&GameEvent::EnemyDestroyed));
        assert!(world.enemies.is_empty());
        assert!(world.projectiles.is_empty());
        assert!((world.formation.speed - 53.0).abs() < 1e-3);
    }

    #[test]
    fn test_one_bullet_destroys_at_most_one_enemy() {
        let mut world = world();
        // Two enemies stacked on the same spot, one bullet through them.
        world.enemies = vec![
            Enemy::new(98.0, 55.0, 40.0, 28.0),
            Enemy::new(98.0, 55.0, 40.0, 28.0),
        ];
        world.projectiles.push(bullet_at(100.0, 50.0));

        world.step(DT, &idle());
        assert_eq!(world.enemies.len(), 1);
        assert!(world.projectiles.is_empty());
    }

    #[test]
    fn test_edge_hit_drops_the_whole_grid_once() {
        let mut world = world();
        // Park two enemies past the right bound so both flag the same step.
        world.enemies = vec![
            Enemy::new(940.0, 70.0, 40.0, 28.0),
            Enemy::new(930.0, 116.0, 40.0, 28.0),
        ];
        let rows_before: Vec<f32> = world.enemies.iter().map(|e| e.y).collect();

        let events = world.step(DT, &idle());
        assert!(events.contains(&GameEvent::FormationBounced));
        assert_eq!(world.formation.direction, -1.0);
        for (enemy, y_before) in world.enemies.iter().zip(rows_before) {
            assert_eq!(enemy.y, y_before + 24.0);
        }
    }

    #[test]
    fn test_low_survivor_loses_even_while_another_enemy_dies() {
        let mut world = world();
        world.enemies = vec![
            // Survivor already on the player's row.
            Enemy::new(400.0, 510.0, 40.0, 28.0),
            // Victim of this step's bullet.
            Enemy::new(98.0, 55.0, 40.0, 28.0),
        ];
        world.projectiles.push(bullet_at(100.0, 50.0));

        let events = world.step(DT, &idle());
        assert!(events.contains(&GameEvent::EnemyDestroyed));
        assert!(events.contains(&GameEvent::Lost));
        assert_eq!(world.phase, GamePhase::Lost);
    }

    #[test]
    fn test_clearing_the_grid_wins() {
        let mut world = world();
        world.enemies = vec![Enemy::new(98.0, 55.0, 40.0, 28.0)];
        world.projectiles.push(bullet_at(100.0, 50.0));

        let events = world.step(DT, &idle());
        assert!(events.contains(&GameEvent::Won));
        assert_eq!(world.phase, GamePhase::Won);
        assert_eq!(world.status_text(), "You win! Every invader destroyed");
    }

    #[test]
    fn test_status_counts_survivors() {
        let mut world = world();
        assert_eq!(world.status_text(), "Aliens remaining: 50/50");
        world.enemies.truncate(12);
        assert_eq!(world.status_text(), "Aliens remaining: 12/50");
    }

    #[test]
    fn test_reset_rebuilds_a_fresh_game() {
        let mut world = world();
        for _ in 0..300 {
            world.step(DT, &firing());
        }
        world.reset();

        assert_eq!(world.phase, GamePhase::Playing);
        assert_eq!(world.enemies.len(), 50);
        assert!(world.projectiles.is_empty());
        assert_eq!(world.formation.direction, 1.0);
        assert_eq!(world.formation.speed, 50.0);
        assert_eq!(world.player.x, 450.0);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_enemy_count_never_grows(
                inputs in prop::collection::vec(
                    (any::<bool>(), any::<bool>(), any::<bool>()),
                    0..400
                )
            ) {
                let mut world = world();
                let mut last_count = world.enemies.len();
                for (left, right, fire) in inputs {
                    world.step(DT, &InputSnapshot { left, right, fire });
                    prop_assert!(world.enemies.len() <= last_count);
                    last_count = world.enemies.len();
                }
            }

            #[test]
            fn test_player_never_escapes_the_playfield(
                inputs in prop::collection::vec(
                    (any::<bool>(), any::<bool>()),
                    0..400
                )
            ) {
                let mut world = world();
                for (left, right) in inputs {
                    world.step(DT, &InputSnapshot { left, right, fire: false });
                    prop_assert!(world.player.x >= 20.0);
                    prop_assert!(world.player.x <= 960.0 - 60.0 - 20.0);
                }
            }
        }
    }
}
