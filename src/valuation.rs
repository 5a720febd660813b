//! The valuation engine.
//!
//! For every (encounter, character) pair, sums the probability-weighted EP
//! gain of each loot table entry over the character's current gear,
//! normalized by the role's best-in-slot EP ceiling. Weapon-hand loot is
//! valued as part of a full two-slot loadout; stackable enchants are valued
//! at a fixed target stack size. Pure batch computation: reruns on identical
//! input produce bit-identical output.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::catalog::ItemCatalog;
use crate::encounters::{Encounter, EncounterCatalog};
use crate::error::{RankError, Result};
use crate::roles::Role;
use crate::roster::{CharacterProfile, Roster};
use crate::slots::{Hand, Slot, SlotKind};

pub const DEFAULT_ENCHANT_STACK_TARGET: u32 = 2;

/// Engine configuration: the per-role best-in-slot EP ceiling used as the
/// normalization denominator, and the enchant stack size upgrades are valued
/// against.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub bis_ep: HashMap<Role, f64>,
    pub enchant_stack_target: u32,
}

impl EngineConfig {
    pub fn new(bis_ep: HashMap<Role, f64>) -> Self {
        Self {
            bis_ep,
            enchant_stack_target: DEFAULT_ENCHANT_STACK_TARGET,
        }
    }
}

/// Expected normalized upgrade one character realizes from one encounter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterUpgrade {
    pub character: String,
    pub role: Role,
    pub expected_upgrade: f64,
}

/// Per-encounter result: the roster mean, its time-normalized variant, and
/// the per-character breakdown in roster order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterScore {
    pub encounter: String,
    pub raid: String,
    pub clear_time_minutes: f64,
    pub mean_upgrade: f64,
    pub mean_upgrade_per_minute: f64,
    pub per_character: Vec<CharacterUpgrade>,
}

/// Values every encounter for every roster member. Results come back in
/// encounter registration order.
pub fn evaluate(
    items: &ItemCatalog,
    roster: &Roster,
    encounters: &EncounterCatalog,
    config: &EngineConfig,
) -> Result<Vec<EncounterScore>> {
    // Every roster role needs a positive denominator before any division.
    for profile in roster.characters() {
        match config.bis_ep.get(&profile.role) {
            Some(&bis) if bis > 0.0 => {}
            _ => return Err(RankError::MissingBisValue(profile.role)),
        }
    }

    let mut scores = Vec::with_capacity(encounters.encounters().len());
    for encounter in encounters.encounters() {
        let mut per_character = Vec::with_capacity(roster.len());
        let mut total = 0.0;
        for profile in roster.characters() {
            let bis = config.bis_ep[&profile.role];
            let expected = expected_upgrade(items, profile, encounter, config, bis)?;
            total += expected;
            per_character.push(CharacterUpgrade {
                character: profile.name.clone(),
                role: profile.role,
                expected_upgrade: expected,
            });
        }
        let mean_upgrade = if roster.is_empty() {
            0.0
        } else {
            total / roster.len() as f64
        };
        scores.push(EncounterScore {
            encounter: encounter.name.clone(),
            raid: encounter.raid.clone(),
            clear_time_minutes: encounter.clear_time_minutes,
            mean_upgrade,
            mean_upgrade_per_minute: mean_upgrade / encounter.clear_time_minutes,
            per_character,
        });
    }
    Ok(scores)
}

/// Sums the expected normalized EP gain of one character over one loot table.
fn expected_upgrade(
    items: &ItemCatalog,
    profile: &CharacterProfile,
    encounter: &Encounter,
    config: &EngineConfig,
    bis: f64,
) -> Result<f64> {
    let role = profile.role;
    let mut total = 0.0;
    for entry in &encounter.loot_table {
        let item = items.get(&entry.item)?;
        let (ep_new, ep_current, current_label) = match item.slot.kind() {
            SlotKind::Standard => {
                let (current, ep_current) = profile.best_in_slot(items, item.slot)?;
                if let (Some(current), true) = (current, ep_current == 0.0) {
                    return Err(RankError::InconsistentEquippedValue {
                        character: profile.name.clone(),
                        item: current.to_string(),
                        encounter: encounter.name.clone(),
                    });
                }
                (
                    item.ep_for(role),
                    ep_current,
                    current.unwrap_or("none").to_string(),
                )
            }
            SlotKind::Stackable => {
                let (count, ep_current) = profile.enchant_value(item);
                let target = config.enchant_stack_target;
                (
                    item.ep_for(role) * f64::from(target),
                    ep_current,
                    format!("{count}x {}", item.name),
                )
            }
            SlotKind::WeaponHand(hand) => {
                let loadout = profile.best_weapon_loadout(items)?;
                if loadout.ep == 0.0 && loadout.occupied {
                    // Name the equipped weapons, not the winning side's label:
                    // a lone zero-EP two-hander loses the loadout comparison
                    // to the empty pair, whose label would read "none + none".
                    let mut equipped = Vec::new();
                    for slot in [Slot::MainHand, Slot::OffHand, Slot::TwoHand] {
                        if let (Some(name), _) = profile.best_in_slot(items, slot)? {
                            equipped.push(name);
                        }
                    }
                    return Err(RankError::InconsistentEquippedValue {
                        character: profile.name.clone(),
                        item: equipped.join(" + "),
                        encounter: encounter.name.clone(),
                    });
                }
                let ep_new = match hand {
                    Hand::Main => {
                        item.ep_for(role) + profile.best_in_slot(items, Slot::OffHand)?.1
                    }
                    Hand::Off => {
                        item.ep_for(role) + profile.best_in_slot(items, Slot::MainHand)?.1
                    }
                    Hand::Two => item.ep_for(role),
                };
                (ep_new, loadout.ep, loadout.label)
            }
        };

        if ep_new > ep_current {
            total += (ep_new - ep_current) * (entry.drop_chance / 100.0) / bis;
            debug!(
                encounter = %encounter.name,
                character = %profile.name,
                item = %item.name,
                slot = item.slot.name(),
                ep_new,
                ep_current,
                current = %current_label,
                "upgrade"
            );
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encounters::DropSource;
    use crate::items::{ep_by_role, EpByRole};
    use crate::roster::GearSet;

    const EPSILON: f64 = 1e-12;

    struct Fixture {
        items: ItemCatalog,
        roster: Roster,
        encounters: EncounterCatalog,
        config: EngineConfig,
    }

    impl Fixture {
        fn new() -> Self {
            let mut encounters = EncounterCatalog::new();
            encounters
                .register_encounter("Onyxia", "Onyxia's Lair", 20.0)
                .unwrap();
            Self {
                items: ItemCatalog::new(),
                roster: Roster::new(),
                encounters,
                config: EngineConfig::new(HashMap::from([(Role::CombatRogue, 100.0)])),
            }
        }

        fn add_loot(&mut self, name: &str, slot: Slot, chance: f64, ep: EpByRole) {
            self.encounters
                .register_loot(
                    &mut self.items,
                    &[DropSource::Encounter("Onyxia".to_string())],
                    name,
                    slot,
                    &[chance],
                    ep,
                )
                .unwrap();
        }

        fn add_ungated(&mut self, name: &str, slot: Slot, ep: EpByRole) {
            self.encounters
                .register_loot(&mut self.items, &[DropSource::Ungated], name, slot, &[100.0], ep)
                .unwrap();
        }

        fn add_rogue(&mut self, name: &str, gear: GearSet) {
            self.roster
                .add_character(CharacterProfile::new(name, Role::CombatRogue, gear))
                .unwrap();
        }

        fn evaluate(&self) -> Result<Vec<EncounterScore>> {
            evaluate(&self.items, &self.roster, &self.encounters, &self.config)
        }
    }

    fn rogue_ep(ep: f64) -> EpByRole {
        ep_by_role(&[(Role::CombatRogue, ep)])
    }

    #[test]
    fn test_standard_slot_upgrade_into_empty_slot() {
        let mut fx = Fixture::new();
        fx.add_loot("New Helm", Slot::Head, 50.0, rogue_ep(100.0));
        fx.add_rogue("Deadstrike", GearSet::new());

        let scores = fx.evaluate().unwrap();
        // (100 - 0) * 0.5 / 100
        assert!((scores[0].per_character[0].expected_upgrade - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_standard_slot_no_upgrade_when_current_is_better() {
        let mut fx = Fixture::new();
        fx.add_loot("New Helm", Slot::Head, 50.0, rogue_ep(40.0));
        fx.add_ungated("Old Helm", Slot::Head, rogue_ep(60.0));
        let mut gear = GearSet::new();
        gear.head = vec!["Old Helm".to_string()];
        fx.add_rogue("Deadstrike", gear);

        let scores = fx.evaluate().unwrap();
        assert_eq!(scores[0].per_character[0].expected_upgrade, 0.0);
    }

    #[test]
    fn test_main_hand_upgrade_is_valued_as_loadout() {
        let mut fx = Fixture::new();
        fx.add_loot("Dropped Blade", Slot::MainHand, 100.0, rogue_ep(30.0));
        fx.add_ungated("Old Blade", Slot::MainHand, rogue_ep(10.0));
        fx.add_ungated("Old Dagger", Slot::OffHand, rogue_ep(8.0));
        let mut gear = GearSet::new();
        gear.main_hand = vec!["Old Blade".to_string()];
        gear.off_hand = vec!["Old Dagger".to_string()];
        fx.add_rogue("Deadstrike", gear);

        let scores = fx.evaluate().unwrap();
        // new = 30 + 8 (keeps off hand), current = 10 + 8; gain 20 * 1.0 / 100
        assert!((scores[0].per_character[0].expected_upgrade - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_off_hand_upgrade_pairs_with_current_main_hand() {
        let mut fx = Fixture::new();
        fx.add_loot("Dropped Dagger", Slot::OffHand, 100.0, rogue_ep(20.0));
        fx.add_ungated("Old Blade", Slot::MainHand, rogue_ep(10.0));
        fx.add_ungated("Old Dagger", Slot::OffHand, rogue_ep(8.0));
        let mut gear = GearSet::new();
        gear.main_hand = vec!["Old Blade".to_string()];
        gear.off_hand = vec!["Old Dagger".to_string()];
        fx.add_rogue("Deadstrike", gear);

        let scores = fx.evaluate().unwrap();
        // new = 20 + 10, current = 18; gain 12 / 100
        assert!((scores[0].per_character[0].expected_upgrade - 0.12).abs() < EPSILON);
    }

    #[test]
    fn test_two_hander_must_beat_combined_pair() {
        let mut fx = Fixture::new();
        fx.add_loot("Dropped Maul", Slot::TwoHand, 100.0, rogue_ep(15.0));
        fx.add_ungated("Old Blade", Slot::MainHand, rogue_ep(10.0));
        fx.add_ungated("Old Dagger", Slot::OffHand, rogue_ep(8.0));
        let mut gear = GearSet::new();
        gear.main_hand = vec!["Old Blade".to_string()];
        gear.off_hand = vec!["Old Dagger".to_string()];
        fx.add_rogue("Deadstrike", gear);

        // 15 < 10 + 8, so no upgrade at all.
        let scores = fx.evaluate().unwrap();
        assert_eq!(scores[0].per_character[0].expected_upgrade, 0.0);
    }

    #[test]
    fn test_stackable_upgrade_tops_off_the_stack() {
        let mut fx = Fixture::new();
        fx.add_loot("Primal Idol", Slot::Enchant, 100.0, rogue_ep(20.0));
        let mut gear = GearSet::new();
        gear.enchants = 1;
        fx.add_rogue("Deadstrike", gear);

        let scores = fx.evaluate().unwrap();
        // current = 20, new = 40 at target stack 2; gain 20 / 100
        assert!((scores[0].per_character[0].expected_upgrade - 0.2).abs() < EPSILON);
    }

    #[test]
    fn test_full_stack_yields_nothing() {
        let mut fx = Fixture::new();
        fx.add_loot("Primal Idol", Slot::Enchant, 100.0, rogue_ep(20.0));
        let mut gear = GearSet::new();
        gear.enchants = 2;
        fx.add_rogue("Deadstrike", gear);

        let scores = fx.evaluate().unwrap();
        assert_eq!(scores[0].per_character[0].expected_upgrade, 0.0);
    }

    #[test]
    fn test_mean_averages_across_roster() {
        let mut fx = Fixture::new();
        // 100 EP at 100% into an empty slot: 1.0 for each rogue who needs it.
        fx.add_loot("New Helm", Slot::Head, 100.0, rogue_ep(100.0));
        fx.add_ungated("Old Helm", Slot::Head, rogue_ep(50.0));
        fx.add_rogue("Deadstrike", GearSet::new());
        let mut gear = GearSet::new();
        gear.head = vec!["Old Helm".to_string()];
        fx.add_rogue("Kirilov", gear);

        let scores = fx.evaluate().unwrap();
        // Deadstrike gains 1.0, Kirilov gains 0.5; mean 0.75.
        assert!((scores[0].mean_upgrade - 0.75).abs() < EPSILON);
    }

    #[test]
    fn test_per_minute_divides_by_clear_time() {
        let mut fx = Fixture::new();
        fx.add_loot("New Helm", Slot::Head, 100.0, rogue_ep(100.0));
        fx.add_rogue("Deadstrike", GearSet::new());

        let scores = fx.evaluate().unwrap();
        assert!((scores[0].mean_upgrade - 1.0).abs() < EPSILON);
        assert!((scores[0].mean_upgrade_per_minute - 0.05).abs() < EPSILON);
    }

    #[test]
    fn test_equipped_zero_ep_item_is_inconsistent() {
        let mut fx = Fixture::new();
        fx.add_loot("New Helm", Slot::Head, 50.0, rogue_ep(100.0));
        fx.add_ungated("Baseline Cap", Slot::Head, EpByRole::new());
        let mut gear = GearSet::new();
        gear.head = vec!["Baseline Cap".to_string()];
        fx.add_rogue("Deadstrike", gear);

        let err = fx.evaluate().unwrap_err();
        assert_eq!(
            err,
            RankError::InconsistentEquippedValue {
                character: "Deadstrike".to_string(),
                item: "Baseline Cap".to_string(),
                encounter: "Onyxia".to_string(),
            }
        );
    }

    #[test]
    fn test_inconsistent_weapon_error_names_the_two_hander() {
        let mut fx = Fixture::new();
        fx.add_loot("Dropped Blade", Slot::MainHand, 100.0, rogue_ep(30.0));
        // Equipped two-hander scored for nobody: the loadout comparison picks
        // the empty main/off pair, but the error must still name the maul.
        fx.add_ungated("Unscored Maul", Slot::TwoHand, EpByRole::new());
        let mut gear = GearSet::new();
        gear.two_hand = vec!["Unscored Maul".to_string()];
        fx.add_rogue("Deadstrike", gear);

        let err = fx.evaluate().unwrap_err();
        assert_eq!(
            err,
            RankError::InconsistentEquippedValue {
                character: "Deadstrike".to_string(),
                item: "Unscored Maul".to_string(),
                encounter: "Onyxia".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_enchant_count_is_exempt_from_the_check() {
        let mut fx = Fixture::new();
        fx.add_loot("Primal Idol", Slot::Enchant, 100.0, rogue_ep(20.0));
        fx.add_rogue("Deadstrike", GearSet::new());

        let scores = fx.evaluate().unwrap();
        // count 0: current 0, new 40; gain 40 / 100.
        assert!((scores[0].per_character[0].expected_upgrade - 0.4).abs() < EPSILON);
    }

    #[test]
    fn test_missing_bis_value_is_rejected_up_front() {
        let mut fx = Fixture::new();
        fx.add_rogue("Deadstrike", GearSet::new());
        fx.config.bis_ep.clear();

        let err = fx.evaluate().unwrap_err();
        assert_eq!(err, RankError::MissingBisValue(Role::CombatRogue));
    }

    #[test]
    fn test_zero_bis_value_is_rejected_up_front() {
        let mut fx = Fixture::new();
        fx.add_rogue("Deadstrike", GearSet::new());
        fx.config.bis_ep.insert(Role::CombatRogue, 0.0);

        let err = fx.evaluate().unwrap_err();
        assert_eq!(err, RankError::MissingBisValue(Role::CombatRogue));
    }

    #[test]
    fn test_unscored_loot_never_upgrades() {
        let mut fx = Fixture::new();
        fx.add_loot("Caster Staff", Slot::TwoHand, 100.0, EpByRole::new());
        fx.add_rogue("Deadstrike", GearSet::new());

        let scores = fx.evaluate().unwrap();
        assert_eq!(scores[0].per_character[0].expected_upgrade, 0.0);
    }

    #[test]
    fn test_rerun_is_bit_identical() {
        let mut fx = Fixture::new();
        fx.add_loot("New Helm", Slot::Head, 18.55, rogue_ep(62.0));
        fx.add_loot("Primal Idol", Slot::Enchant, 100.0, rogue_ep(28.0));
        let mut gear = GearSet::new();
        gear.enchants = 1;
        fx.add_rogue("Deadstrike", gear);

        assert_eq!(fx.evaluate().unwrap(), fx.evaluate().unwrap());
    }
}
