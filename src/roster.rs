//! The raid roster: who is coming, what role they play, and what they
//! currently wear.

use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::error::{RankError, Result};
use crate::items::Item;
use crate::roles::Role;
use crate::slots::Slot;

/// Everything a character currently owns per slot, by item name. Multi-entry
/// lists are candidates (two rings, a backup weapon); the best one for the
/// owner's role counts. The enchant slot holds a unit count instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearSet {
    pub head: Vec<String>,
    pub neck: Vec<String>,
    pub shoulder: Vec<String>,
    pub chest: Vec<String>,
    pub waist: Vec<String>,
    pub legs: Vec<String>,
    pub feet: Vec<String>,
    pub wrists: Vec<String>,
    pub hands: Vec<String>,
    pub fingers: Vec<String>,
    pub trinkets: Vec<String>,
    pub back: Vec<String>,
    pub ranged: Vec<String>,
    pub main_hand: Vec<String>,
    pub off_hand: Vec<String>,
    pub two_hand: Vec<String>,
    pub enchants: u32,
}

impl GearSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equipped candidate item names for a slot. The enchant slot carries a
    /// count, not names.
    pub fn candidates(&self, slot: Slot) -> &[String] {
        match slot {
            Slot::Head => &self.head,
            Slot::Neck => &self.neck,
            Slot::Shoulder => &self.shoulder,
            Slot::Chest => &self.chest,
            Slot::Waist => &self.waist,
            Slot::Legs => &self.legs,
            Slot::Feet => &self.feet,
            Slot::Wrists => &self.wrists,
            Slot::Hands => &self.hands,
            Slot::Finger => &self.fingers,
            Slot::Trinket => &self.trinkets,
            Slot::Back => &self.back,
            Slot::Ranged => &self.ranged,
            Slot::MainHand => &self.main_hand,
            Slot::OffHand => &self.off_hand,
            Slot::TwoHand => &self.two_hand,
            Slot::Enchant => &[],
        }
    }

    /// Every equipped item name across all slots.
    pub fn iter_items(&self) -> impl Iterator<Item = &String> {
        [
            &self.head,
            &self.neck,
            &self.shoulder,
            &self.chest,
            &self.waist,
            &self.legs,
            &self.feet,
            &self.wrists,
            &self.hands,
            &self.fingers,
            &self.trinkets,
            &self.back,
            &self.ranged,
            &self.main_hand,
            &self.off_hand,
            &self.two_hand,
        ]
        .into_iter()
        .flatten()
    }
}

/// One raid member. Built at configuration time, read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterProfile {
    pub name: String,
    pub role: Role,
    pub gear: GearSet,
}

/// The winning weapon arrangement: either main hand plus off hand combined,
/// or a single two-hander.
#[derive(Debug, Clone, PartialEq)]
pub struct WeaponLoadout {
    pub ep: f64,
    pub label: String,
    /// True when at least one weapon hand holds a named item.
    pub occupied: bool,
}

impl CharacterProfile {
    pub fn new(name: impl Into<String>, role: Role, gear: GearSet) -> Self {
        Self {
            name: name.into(),
            role,
            gear,
        }
    }

    /// Highest-EP equipped candidate for `slot`, for this character's role.
    /// Ties keep the first-encountered candidate. An empty slot is
    /// `(None, 0.0)`; a slot occupied only by unscored items keeps a name so
    /// callers can flag the inconsistency.
    pub fn best_in_slot<'a>(
        &'a self,
        catalog: &ItemCatalog,
        slot: Slot,
    ) -> Result<(Option<&'a str>, f64)> {
        let mut best: Option<(&str, f64)> = None;
        for name in self.gear.candidates(slot) {
            let ep = catalog.get(name)?.ep_for(self.role);
            match best {
                Some((_, best_ep)) if ep <= best_ep => {}
                _ => best = Some((name, ep)),
            }
        }
        Ok(match best {
            Some((name, ep)) => (Some(name), ep),
            None => (None, 0.0),
        })
    }

    /// Current value of the stackable enchant slot: unit count times the
    /// per-unit EP of `per_unit` for this character's role.
    pub fn enchant_value(&self, per_unit: &Item) -> (u32, f64) {
        let count = self.gear.enchants;
        (count, per_unit.ep_for(self.role) * f64::from(count))
    }

    /// Best achievable combined weapon arrangement from currently-equipped
    /// weapons: `max(main hand + off hand, two-hander)`.
    pub fn best_weapon_loadout(&self, catalog: &ItemCatalog) -> Result<WeaponLoadout> {
        let (mh_name, mh_ep) = self.best_in_slot(catalog, Slot::MainHand)?;
        let (oh_name, oh_ep) = self.best_in_slot(catalog, Slot::OffHand)?;
        let (th_name, th_ep) = self.best_in_slot(catalog, Slot::TwoHand)?;

        let occupied = mh_name.is_some() || oh_name.is_some() || th_name.is_some();
        if mh_ep + oh_ep >= th_ep {
            Ok(WeaponLoadout {
                ep: mh_ep + oh_ep,
                label: format!(
                    "{} + {}",
                    mh_name.unwrap_or("none"),
                    oh_name.unwrap_or("none")
                ),
                occupied,
            })
        } else {
            Ok(WeaponLoadout {
                ep: th_ep,
                label: th_name.unwrap_or("none").to_string(),
                occupied,
            })
        }
    }
}

/// The fixed group of participants a run is valued for.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    characters: Vec<CharacterProfile>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_character(&mut self, profile: CharacterProfile) -> Result<()> {
        if self.characters.iter().any(|c| c.name == profile.name) {
            return Err(RankError::DuplicateCharacter(profile.name));
        }
        self.characters.push(profile);
        Ok(())
    }

    pub fn characters(&self) -> &[CharacterProfile] {
        &self.characters
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}
