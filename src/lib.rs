mod clock;
mod engine;
mod error;
mod library;
mod model;
mod player;
mod progress;
mod scheduler;
mod timer;
mod util;

pub use clock::*;
pub use engine::particles::{ParticleField, Particle, ParticleStyle, style_for};
pub use engine::terminal::TerminalKit;
pub use engine::*;
pub use error::{Result, TutorError};
pub use library::*;
pub use model::config::*;
pub use model::mappings::*;
pub use model::pattern::*;
pub use player::*;
pub use progress::*;
pub use scheduler::*;
pub use timer::*;
pub use util::*;
