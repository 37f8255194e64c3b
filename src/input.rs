use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

/// Held-key state, written by key events and read once per simulation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

/// One-shot actions handled by the shell, outside the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    TogglePause,
    Restart,
    Quit,
}

/// Manages input polling: tracks press/release transitions for the held
/// movement and fire keys, and collects one-shot shell actions.
pub struct InputManager {
    snapshot: InputSnapshot,
    oneshot_actions: Vec<InputAction>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            snapshot: InputSnapshot::default(),
            oneshot_actions: Vec::new(),
        }
    }

    /// Drains all pending terminal events without blocking.
    /// Call once per frame before reading the snapshot or the actions.
    pub fn poll_events(&mut self) -> color_eyre::Result<()> {
        self.oneshot_actions.clear();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event);
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        match key_event.kind {
            KeyEventKind::Press => self.handle_key_press(key_event),
            KeyEventKind::Release => self.handle_key_release(key_event.code),
            _ => {}
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent) {
        // Quit keys work in any state.
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match key_event.code {
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.oneshot_actions.push(InputAction::TogglePause);
            }
            // Restart is accepted at any time, mid-game included.
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.oneshot_actions.push(InputAction::Restart);
            }
            // Left and right are tracked independently; holding both is a
            // net cancel in the simulation.
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.snapshot.left = true;
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.snapshot.right = true;
            }
            KeyCode::Char(' ') => {
                self.snapshot.fire = true;
            }
            _ => {}
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                self.snapshot.left = false;
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                self.snapshot.right = false;
            }
            KeyCode::Char(' ') => {
                self.snapshot.fire = false;
            }
            _ => {}
        }
    }

    /// The held-key state as of the last poll.
    pub fn snapshot(&self) -> InputSnapshot {
        self.snapshot
    }

    /// One-shot actions collected by the last poll.
    pub fn actions(&self) -> Vec<InputAction> {
        self.oneshot_actions.clone()
    }
}
