pub mod color;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod scheduler;
pub mod shape;
pub mod signal;
pub mod starfield;
pub mod state;
pub mod visualizer;

pub use color::*;
pub use config::*;
pub use constants::*;
pub use engine::*;
pub use error::{ParticleError, Result};
pub use gesture::*;
pub use scheduler::*;
pub use shape::{generate, generate_with, Shape};
pub use signal::*;
pub use starfield::*;
pub use state::*;
pub use visualizer::*;

// Shaders bundled as string constants
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
