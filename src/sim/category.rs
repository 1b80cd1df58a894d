//! Blade categories and their physical coefficients
//!
//! One lookup table drives every category-dependent number in the engine:
//! orbit speed, knockback, stamina drain, reflection and mass.

use serde::{Deserialize, Serialize};

/// Blade archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Fast, light, hits hard, barely reflects
    Attack,
    /// Slow, heavy, bounces attackers back
    Defense,
    /// Outlasts and saps opponents
    Stamina,
    #[default]
    Balance,
}

/// Physical coefficients for one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryProfile {
    /// Multiplier on tangential orbit speed
    pub orbit_multiplier: f32,
    /// Scales the knockback impulse this blade receives; lower loses ties in the danger zone
    pub knockback: f32,
    /// Scales the stamina this blade drains from its opponent on a hit
    pub stamina_drain_multiplier: f32,
    /// Fraction of an incoming blade's velocity bounced back on contact
    pub reflect_coefficient: f32,
    /// Resistance to the shared power impulse
    pub mass: f32,
}

const ATTACK: CategoryProfile = CategoryProfile {
    orbit_multiplier: 1.5,
    knockback: 1.5,
    stamina_drain_multiplier: 0.7,
    reflect_coefficient: 0.2,
    mass: 1.0,
};

const DEFENSE: CategoryProfile = CategoryProfile {
    orbit_multiplier: 0.5,
    knockback: 0.8,
    stamina_drain_multiplier: 0.9,
    reflect_coefficient: 0.9,
    mass: 2.0,
};

const STAMINA: CategoryProfile = CategoryProfile {
    orbit_multiplier: 1.2,
    knockback: 0.9,
    stamina_drain_multiplier: 1.4,
    reflect_coefficient: 0.5,
    mass: 1.4,
};

const BALANCE: CategoryProfile = CategoryProfile {
    orbit_multiplier: 1.0,
    knockback: 1.0,
    stamina_drain_multiplier: 1.0,
    reflect_coefficient: 0.5,
    mass: 1.2,
};

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Attack,
        Category::Defense,
        Category::Stamina,
        Category::Balance,
    ];

    /// Coefficients for this category
    pub fn profile(self) -> &'static CategoryProfile {
        match self {
            Category::Attack => &ATTACK,
            Category::Defense => &DEFENSE,
            Category::Stamina => &STAMINA,
            Category::Balance => &BALANCE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Attack => "attack",
            Category::Defense => "defense",
            Category::Stamina => "stamina",
            Category::Balance => "balance",
        }
    }

    /// Parse a category name; anything unrecognized plays as balance
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "attack" => Category::Attack,
            "defense" | "defence" => Category::Defense,
            "stamina" => Category::Stamina,
            _ => Category::Balance,
        }
    }

    /// Adjust base stats the way each archetype is built: returns (stamina, power)
    pub fn derive_stats(self, base_stamina: f32, base_power: f32) -> (f32, f32) {
        match self {
            Category::Attack => (base_stamina - 200.0, base_power + 50.0),
            Category::Defense => (base_stamina + 100.0, base_power - 20.0),
            Category::Stamina => (base_stamina + 300.0, base_power - 30.0),
            Category::Balance => (base_stamina, base_power),
        }
    }
}
