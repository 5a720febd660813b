//! Dataset files: the registration collaborator.
//!
//! A dataset is a JSON document holding the role BIS ceilings, the encounter
//! list, the loot registrations, and the roster. `build` replays it through
//! the same registration calls code would use, in file order, so every
//! registration error is reachable from data.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::ItemCatalog;
use crate::encounters::{DropSource, EncounterCatalog};
use crate::error::Result;
use crate::items::EpByRole;
use crate::roles::Role;
use crate::roster::{CharacterProfile, GearSet, Roster};
use crate::slots::Slot;
use crate::valuation::{EngineConfig, DEFAULT_ENCHANT_STACK_TARGET};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterDef {
    pub name: String,
    pub raid: String,
    pub clear_time_minutes: f64,
}

/// One loot registration. `sources` and `drop_chances` stay parallel arrays
/// so a length mismatch in the file surfaces as the registration error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LootDef {
    pub name: String,
    pub slot: Slot,
    pub sources: Vec<DropSource>,
    pub drop_chances: Vec<f64>,
    #[serde(default)]
    pub ep: EpByRole,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDef {
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub gear: GearSet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub bis_ep: HashMap<Role, f64>,
    #[serde(default = "default_stack_target")]
    pub enchant_stack_target: u32,
    pub encounters: Vec<EncounterDef>,
    pub loot: Vec<LootDef>,
    pub roster: Vec<CharacterDef>,
}

fn default_stack_target() -> u32 {
    DEFAULT_ENCHANT_STACK_TARGET
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::parse(&json)
    }

    pub fn parse(json: &str) -> io::Result<Self> {
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Replays the dataset through the registration interfaces.
    pub fn build(&self) -> Result<(ItemCatalog, Roster, EncounterCatalog, EngineConfig)> {
        let mut items = ItemCatalog::new();
        let mut encounters = EncounterCatalog::new();
        for def in &self.encounters {
            encounters.register_encounter(&def.name, &def.raid, def.clear_time_minutes)?;
        }
        for def in &self.loot {
            encounters.register_loot(
                &mut items,
                &def.sources,
                &def.name,
                def.slot,
                &def.drop_chances,
                def.ep.clone(),
            )?;
        }
        let mut roster = Roster::new();
        for def in &self.roster {
            // Check every equipped reference now, not just the slots some
            // loot table happens to target during valuation.
            for item in def.gear.iter_items() {
                items.get(item)?;
            }
            roster.add_character(CharacterProfile::new(
                &def.name,
                def.role,
                def.gear.clone(),
            ))?;
        }
        let mut config = EngineConfig::new(self.bis_ep.clone());
        config.enchant_stack_target = self.enchant_stack_target;
        Ok((items, roster, encounters, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RankError;

    const MINIMAL: &str = r#"{
        "bis_ep": { "combat_rogue": 4054 },
        "encounters": [
            { "name": "Onyxia", "raid": "Onyxia's Lair", "clear_time_minutes": 20 }
        ],
        "loot": [
            {
                "name": "Onyxia Tooth Pendant",
                "slot": "neck",
                "sources": [ { "encounter": "Onyxia" } ],
                "drop_chances": [100.0],
                "ep": { "combat_rogue": 64 }
            },
            {
                "name": "Vendor Dagger",
                "slot": "off_hand",
                "sources": [ "ungated" ],
                "drop_chances": [100.0],
                "ep": { "combat_rogue": 120 }
            }
        ],
        "roster": [
            {
                "name": "Deadstrike",
                "role": "combat_rogue",
                "gear": { "off_hand": ["Vendor Dagger"], "enchants": 1 }
            }
        ]
    }"#;

    #[test]
    fn test_parse_and_build_minimal_dataset() {
        let dataset = Dataset::parse(MINIMAL).unwrap();
        let (items, roster, encounters, config) = dataset.build().unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(roster.len(), 1);
        assert_eq!(encounters.encounters().len(), 1);
        assert_eq!(encounters.get("Onyxia").unwrap().loot_table.len(), 1);
        assert_eq!(config.enchant_stack_target, DEFAULT_ENCHANT_STACK_TARGET);
        assert_eq!(config.bis_ep[&Role::CombatRogue], 4054.0);
        assert_eq!(roster.characters()[0].gear.enchants, 1);
    }

    #[test]
    fn test_ungated_source_parses_from_plain_string() {
        let dataset = Dataset::parse(MINIMAL).unwrap();
        assert_eq!(dataset.loot[1].sources, vec![DropSource::Ungated]);
    }

    #[test]
    fn test_build_surfaces_registration_errors() {
        let mut dataset = Dataset::parse(MINIMAL).unwrap();
        dataset.loot[0].drop_chances.push(50.0);

        let err = dataset.build().unwrap_err();
        assert!(matches!(err, RankError::ArrayLengthMismatch { .. }));
    }

    #[test]
    fn test_build_rejects_unregistered_equipped_item() {
        // Even in a slot no loot table targets: every equipped reference
        // must resolve in the catalog.
        let mut dataset = Dataset::parse(MINIMAL).unwrap();
        dataset.roster[0]
            .gear
            .trinkets
            .push("Forgotten Charm".to_string());

        let err = dataset.build().unwrap_err();
        assert_eq!(err, RankError::UnknownItem("Forgotten Charm".to_string()));
    }

    #[test]
    fn test_malformed_json_is_invalid_data() {
        let err = Dataset::parse("{ not json").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
