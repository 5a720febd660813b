//! Reduces engine output into the grouped, ordered structure a reporter
//! renders. No valuation logic lives here.

use std::cmp::Ordering;

use serde::Serialize;

use crate::valuation::EncounterScore;

/// Ordering of encounters within a raid section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Registration,
    ScoreDescending,
}

/// Which per-encounter statistic a report ranks by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MeanUpgrade,
    MeanUpgradePerMinute,
}

impl Metric {
    pub fn of(self, score: &EncounterScore) -> f64 {
        match self {
            Metric::MeanUpgrade => score.mean_upgrade,
            Metric::MeanUpgradePerMinute => score.mean_upgrade_per_minute,
        }
    }
}

/// One raid's encounters, ordered for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct RaidSection {
    pub raid: String,
    pub encounters: Vec<EncounterScore>,
}

/// Groups scores by raid tag (first-seen order preserved) and orders each
/// section. `ScoreDescending` sorts stably, so equal scores keep registration
/// order.
pub fn group_by_raid(scores: &[EncounterScore], order: SortOrder, metric: Metric) -> Vec<RaidSection> {
    let mut sections: Vec<RaidSection> = Vec::new();
    for score in scores {
        match sections.iter_mut().find(|s| s.raid == score.raid) {
            Some(section) => section.encounters.push(score.clone()),
            None => sections.push(RaidSection {
                raid: score.raid.clone(),
                encounters: vec![score.clone()],
            }),
        }
    }
    if order == SortOrder::ScoreDescending {
        for section in &mut sections {
            section.encounters.sort_by(|a, b| {
                metric
                    .of(b)
                    .partial_cmp(&metric.of(a))
                    .unwrap_or(Ordering::Equal)
            });
        }
    }
    sections
}
