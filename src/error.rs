//! Contract violations raised by the battle engine
//!
//! The simulation has no I/O; everything here is a caller mistake caught at
//! construction or at `start()`.

use thiserror::Error;

/// Errors surfaced by arena/engine construction and lifecycle calls
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleError {
    /// Arena radius must be positive and finite
    #[error("invalid arena geometry: radius {radius}")]
    InvalidArena { radius: f32 },

    /// A battle needs at least one blade
    #[error("battle requires at least one blade")]
    NoBlades,

    /// `start()` called on a battle that is already running
    #[error("battle is already running")]
    AlreadyRunning,

    /// Engines are single-use; construct a new one for another battle
    #[error("battle already finished; create a new engine")]
    AlreadyFinished,

    /// Fixed-interval drivers need a positive step
    #[error("tick interval must be positive, got {0}ms")]
    InvalidInterval(f64),

    /// Tuning document could not be parsed or holds out-of-range values
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
}

pub type Result<T> = std::result::Result<T, BattleError>;
