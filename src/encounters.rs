//! Encounter registry: bosses grouped into raids, each with a clear time and
//! a probabilistic loot table. Loot may be shared across encounters with an
//! independent drop chance per encounter.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::error::{RankError, Result};
use crate::items::{EpByRole, Item};
use crate::slots::Slot;

/// One line of a loot table: item name and its drop chance in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    pub item: String,
    pub drop_chance: f64,
}

/// A discrete timed objective with a loot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    pub name: String,
    pub raid: String,
    pub clear_time_minutes: f64,
    pub loot_table: Vec<LootEntry>,
}

/// Where a registered item can come from. `Ungated` covers vendor and quest
/// rewards: the item enters the catalog so gear can reference it, but no
/// encounter's loot table gains an entry for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropSource {
    Encounter(String),
    Ungated,
}

/// Registry of encounters. Raid tags are free-form strings remembered in
/// first-seen order for grouped reporting.
#[derive(Debug, Clone, Default)]
pub struct EncounterCatalog {
    encounters: Vec<Encounter>,
    index: HashMap<String, usize>,
    raids: Vec<String>,
}

impl EncounterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_encounter(
        &mut self,
        name: impl Into<String>,
        raid: impl Into<String>,
        clear_time_minutes: f64,
    ) -> Result<()> {
        let name = name.into();
        if self.index.contains_key(&name) {
            return Err(RankError::DuplicateEncounter(name));
        }
        // The per-minute metric divides by this later.
        if !(clear_time_minutes > 0.0) {
            return Err(RankError::InvalidClearTime {
                encounter: name,
                minutes: clear_time_minutes,
            });
        }
        let raid = raid.into();
        if !self.raids.contains(&raid) {
            self.raids.push(raid.clone());
        }
        self.index.insert(name.clone(), self.encounters.len());
        self.encounters.push(Encounter {
            name,
            raid,
            clear_time_minutes,
            loot_table: Vec::new(),
        });
        Ok(())
    }

    /// Registers one item and attaches it to every listed source. `sources`
    /// and `drop_chances` are parallel arrays; an `Ungated` source consumes
    /// its chance slot without touching any loot table.
    pub fn register_loot(
        &mut self,
        items: &mut ItemCatalog,
        sources: &[DropSource],
        name: &str,
        slot: Slot,
        drop_chances: &[f64],
        ep: EpByRole,
    ) -> Result<()> {
        if sources.len() != drop_chances.len() {
            return Err(RankError::ArrayLengthMismatch {
                item: name.to_string(),
                sources: sources.len(),
                chances: drop_chances.len(),
            });
        }
        for &chance in drop_chances {
            if !(chance > 0.0 && chance <= 100.0) {
                return Err(RankError::InvalidDropChance {
                    item: name.to_string(),
                    chance,
                });
            }
        }
        // Resolve every source before mutating anything.
        let mut targets = Vec::new();
        for (source, &chance) in sources.iter().zip(drop_chances) {
            match source {
                DropSource::Encounter(encounter) => {
                    let idx = *self
                        .index
                        .get(encounter)
                        .ok_or_else(|| RankError::UnknownEncounter(encounter.clone()))?;
                    targets.push((idx, chance));
                }
                DropSource::Ungated => {}
            }
        }

        items.register(Item::new(name, slot, ep))?;
        for (idx, drop_chance) in targets {
            self.encounters[idx].loot_table.push(LootEntry {
                item: name.to_string(),
                drop_chance,
            });
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&Encounter> {
        self.index
            .get(name)
            .map(|&idx| &self.encounters[idx])
            .ok_or_else(|| RankError::UnknownEncounter(name.to_string()))
    }

    /// Encounters in registration order.
    pub fn encounters(&self) -> &[Encounter] {
        &self.encounters
    }

    /// Raid tags in first-seen order.
    pub fn raids(&self) -> &[String] {
        &self.raids
    }
}
