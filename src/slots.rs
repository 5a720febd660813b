//! Equipment slots and their comparison behavior.
//!
//! Three behaviors exist: standard slots compare item against item, the three
//! weapon hands compare whole loadouts (paired one-handers vs. a two-hander),
//! and the enchant slot accumulates stackable units. `Slot::kind()` is the
//! single place that classification lives.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Head,
    Neck,
    Shoulder,
    Chest,
    Waist,
    Legs,
    Feet,
    Wrists,
    Hands,
    Finger,
    Trinket,
    Back,
    Ranged,
    MainHand,
    OffHand,
    TwoHand,
    Enchant,
}

/// Which weapon hand a weapon-slot item fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hand {
    Main,
    Off,
    Two,
}

/// Comparison behavior of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Standard,
    WeaponHand(Hand),
    Stackable,
}

impl Slot {
    pub fn kind(self) -> SlotKind {
        match self {
            Slot::MainHand => SlotKind::WeaponHand(Hand::Main),
            Slot::OffHand => SlotKind::WeaponHand(Hand::Off),
            Slot::TwoHand => SlotKind::WeaponHand(Hand::Two),
            Slot::Enchant => SlotKind::Stackable,
            _ => SlotKind::Standard,
        }
    }

    /// Returns the display name for this slot.
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Head => "head",
            Slot::Neck => "neck",
            Slot::Shoulder => "shoulder",
            Slot::Chest => "chest",
            Slot::Waist => "waist",
            Slot::Legs => "legs",
            Slot::Feet => "feet",
            Slot::Wrists => "wrists",
            Slot::Hands => "hands",
            Slot::Finger => "finger",
            Slot::Trinket => "trinket",
            Slot::Back => "back",
            Slot::Ranged => "ranged",
            Slot::MainHand => "main hand",
            Slot::OffHand => "off hand",
            Slot::TwoHand => "two hand",
            Slot::Enchant => "enchant",
        }
    }
}
