use color_eyre::Result;
use log::{debug, info};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::entities::GamePhase;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::sim::{GameEvent, World};

/// Upper bound on a frame's simulated time. Long stalls advance the world
/// at most this far so bullets cannot tunnel through the grid.
pub const MAX_FRAME_DT: f32 = 0.033;

/// Small sleep to hold ~60 FPS and keep the CPU from spinning.
const FRAME_SLEEP: Duration = Duration::from_millis(8);

/// The main application: owns the world and the shell collaborators, and
/// drives one step + one render per frame.
pub struct App {
    running: bool,
    /// Shell-level freeze; the simulation phase never sees it.
    paused: bool,
    world: World,
    frame_count: u64,
    last_frame_time: Instant,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl App {
    pub fn new(config: GameConfig) -> Self {
        Self {
            running: true,
            paused: false,
            world: World::new(config),
            frame_count: 0,
            last_frame_time: Instant::now(),
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager: AudioManager::default(),
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        self.last_frame_time = Instant::now();
        while self.running {
            let now = Instant::now();
            let dt = now
                .duration_since(self.last_frame_time)
                .as_secs_f32()
                .min(MAX_FRAME_DT);
            self.last_frame_time = now;
            self.frame_count += 1;

            terminal.draw(|frame| {
                let view = RenderView {
                    phase: self.world.phase,
                    paused: self.paused,
                    player: &self.world.player,
                    enemies: &self.world.enemies,
                    projectiles: &self.world.projectiles,
                    status: self.world.status_text(),
                    view_width: self.world.config().view_width,
                    view_height: self.world.config().view_height,
                    frame_count: self.frame_count,
                    area: frame.area(),
                };
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events()?;
            let actions = self.input_manager.actions();
            self.process_actions(&actions);

            if !self.paused {
                let events = self.world.step(dt, &self.input_manager.snapshot());
                self.dispatch_events(&events);
            }

            std::thread::sleep(FRAME_SLEEP);
        }
        Ok(())
    }

    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::TogglePause => {
                    // Terminal phases freeze on their own; pause only
                    // applies to a running game.
                    if self.world.phase == GamePhase::Playing {
                        self.paused = !self.paused;
                        debug!("paused: {}", self.paused);
                    }
                }
                InputAction::Restart => {
                    self.world.reset();
                    self.paused = false;
                }
            }
        }
    }

    fn dispatch_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Fired => self.audio_manager.play_fire(),
                GameEvent::EnemyDestroyed => self.audio_manager.play_explosion(),
                GameEvent::FormationBounced => {
                    debug!("formation bounced, speed {:.1}", self.world.formation.speed);
                }
                GameEvent::Won => {
                    info!("game won");
                    self.audio_manager.play_game_over();
                }
                GameEvent::Lost => {
                    info!("game lost");
                    self.audio_manager.play_game_over();
                }
            }
        }
    }
}
