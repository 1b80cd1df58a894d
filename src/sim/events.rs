//! Notifications raised by the engine toward its caller
//!
//! Observers are injected per engine instance. Callbacks are informational:
//! they cannot fail and cannot alter the simulation.

use serde::{Deserialize, Serialize};

use super::blade::{Blade, BladeId};

/// One resolved collision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitReport {
    pub a: BladeId,
    pub b: BladeId,
    /// Stamina removed from `a`
    pub drained_a: f32,
    /// Stamina removed from `b`
    pub drained_b: f32,
    /// Hit happened inside the danger circle
    pub danger_zone: bool,
}

/// How a battle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// Exactly one blade still spinning
    Winner(BladeId),
    /// Nobody left spinning
    Draw,
}

impl BattleOutcome {
    pub fn winner(&self) -> Option<BladeId> {
        match self {
            BattleOutcome::Winner(id) => Some(*id),
            BattleOutcome::Draw => None,
        }
    }
}

/// Recorded notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEvent {
    Hit(HitReport),
    End(BattleOutcome),
}

/// Receives engine notifications
pub trait BattleObserver {
    /// Fired once per resolved collision
    fn on_hit(&mut self, _hit: &HitReport) {}

    /// Fired exactly once when at most one blade is left; `None` means draw
    fn on_end(&mut self, _winner: Option<&Blade>) {}
}

/// Ignores every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl BattleObserver for NullObserver {}

/// Records notifications in order
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<BattleEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hits(&self) -> impl Iterator<Item = &HitReport> {
        self.events.iter().filter_map(|e| match e {
            BattleEvent::Hit(hit) => Some(hit),
            BattleEvent::End(_) => None,
        })
    }

    pub fn hit_count(&self) -> usize {
        self.hits().count()
    }

    /// Every end notification received (a correct engine sends at most one)
    pub fn outcomes(&self) -> Vec<BattleOutcome> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BattleEvent::End(outcome) => Some(*outcome),
                BattleEvent::Hit(_) => None,
            })
            .collect()
    }
}

impl BattleObserver for EventLog {
    fn on_hit(&mut self, hit: &HitReport) {
        self.events.push(BattleEvent::Hit(*hit));
    }

    fn on_end(&mut self, winner: Option<&Blade>) {
        let outcome = match winner {
            Some(blade) => BattleOutcome::Winner(blade.id),
            None => BattleOutcome::Draw,
        };
        self.events.push(BattleEvent::End(outcome));
    }
}

impl<O: BattleObserver + ?Sized> BattleObserver for &mut O {
    fn on_hit(&mut self, hit: &HitReport) {
        (**self).on_hit(hit);
    }

    fn on_end(&mut self, winner: Option<&Blade>) {
        (**self).on_end(winner);
    }
}

impl<O: BattleObserver + ?Sized> BattleObserver for Box<O> {
    fn on_hit(&mut self, hit: &HitReport) {
        (**self).on_hit(hit);
    }

    fn on_end(&mut self, winner: Option<&Blade>) {
        (**self).on_end(winner);
    }
}
