use thiserror::Error;

/// Errors raised by the core. Out-of-range numeric inputs are clamped and
/// never show up here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParticleError {
    #[error("requested {requested} particles but capacity is {capacity}")]
    Capacity { requested: usize, capacity: usize },

    #[error("particle engine has been disposed")]
    Disposed,

    #[error("invalid color {0:?}; expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("unknown shape {0:?}")]
    UnknownShape(String),
}

pub type Result<T> = std::result::Result<T, ParticleError>;
