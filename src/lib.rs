//! raidrank - Boss Priority by Expected Loot Value
//!
//! Ranks raid encounters by the average expected gear upgrade their loot
//! tables offer a fixed roster. This module exposes the valuation engine and
//! its registries for testing and external use.

pub mod catalog;
pub mod dataset;
pub mod encounters;
pub mod error;
pub mod items;
pub mod report;
pub mod roles;
pub mod roster;
pub mod slots;
pub mod valuation;

pub use catalog::ItemCatalog;
pub use dataset::Dataset;
pub use encounters::{DropSource, Encounter, EncounterCatalog, LootEntry};
pub use error::{RankError, Result};
pub use items::{ep_by_role, EpByRole, Item};
pub use report::{group_by_raid, Metric, RaidSection, SortOrder};
pub use roles::Role;
pub use roster::{CharacterProfile, GearSet, Roster, WeaponLoadout};
pub use slots::{Hand, Slot, SlotKind};
pub use valuation::{evaluate, CharacterUpgrade, EncounterScore, EngineConfig};
