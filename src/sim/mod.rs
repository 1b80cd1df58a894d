//! Deterministic battle simulation
//!
//! All battle logic lives here. This module must stay pure:
//! - Time comes in from the caller (`now_ms`), never read from a clock
//! - No randomness inside a tick
//! - Stable iteration order (blade order as given at construction)
//! - No rendering or platform dependencies

pub mod arena;
pub mod blade;
pub mod category;
pub mod collision;
pub mod engine;
pub mod events;
pub mod vector;

pub use arena::Arena;
pub use blade::{Blade, BladeId};
pub use category::{Category, CategoryProfile};
pub use collision::{pair_impulse, resolve_pair};
pub use engine::{BattleEngine, BattlePhase, BattleSnapshot, BladeView, TickOutcome};
pub use events::{BattleEvent, BattleObserver, BattleOutcome, EventLog, HitReport, NullObserver};
pub use vector::{angle_between, distance, normalized_vector, reflect_vector};
