use serde::{Deserialize, Serialize};

/// A character's performance archetype. Closed set: EP values and the
/// best-in-slot ceiling are both keyed by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    RestoDruid,
    FeralDruid,
    MarksHunter,
    FireMage,
    HolyPaladin,
    HolyPriest,
    CombatRogue,
    RestoShaman,
    Warlock,
    ProtWarrior,
    FuryWarrior,
}

impl Role {
    /// Returns the display name for this role.
    pub fn name(&self) -> &'static str {
        match self {
            Role::RestoDruid => "Resto Druid",
            Role::FeralDruid => "Feral Druid",
            Role::MarksHunter => "Marks Hunter",
            Role::FireMage => "Fire Mage",
            Role::HolyPaladin => "Holy Paladin",
            Role::HolyPriest => "Holy Priest",
            Role::CombatRogue => "Combat Rogue",
            Role::RestoShaman => "Resto Shaman",
            Role::Warlock => "Warlock",
            Role::ProtWarrior => "Prot Warrior",
            Role::FuryWarrior => "Fury Warrior",
        }
    }

    pub fn all() -> &'static [Role] {
        &[
            Role::RestoDruid,
            Role::FeralDruid,
            Role::MarksHunter,
            Role::FireMage,
            Role::HolyPaladin,
            Role::HolyPriest,
            Role::CombatRogue,
            Role::RestoShaman,
            Role::Warlock,
            Role::ProtWarrior,
            Role::FuryWarrior,
        ]
    }
}
