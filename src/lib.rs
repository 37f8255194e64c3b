// Library exports for the binary and the integration tests.
pub use config::GameConfig;
pub use entities::{Enemy, Formation, GamePhase, Player, Projectile, Rect};
pub use input::{InputAction, InputSnapshot};
pub use sim::{GameEvent, World};

pub mod app;
pub mod audio;
pub mod config;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod sim;
