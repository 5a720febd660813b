use std::env;
use std::error::Error;
use std::process;

use tracing_subscriber::EnvFilter;

use raidrank::{evaluate, group_by_raid, Dataset, Metric, RaidSection, SortOrder};

/// Bundled sample dataset, used when no path is given.
const SAMPLE_DATASET: &str = include_str!("../data/sample_raid.json");

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut path: Option<String> = None;
    let mut metric = Metric::MeanUpgrade;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--per-minute" => metric = Metric::MeanUpgradePerMinute,
            _ => path = Some(arg),
        }
    }

    let dataset = match &path {
        Some(path) => Dataset::load(path)?,
        None => Dataset::parse(SAMPLE_DATASET)?,
    };
    let (items, roster, encounters, config) = dataset.build()?;
    let scores = evaluate(&items, &roster, &encounters, &config)?;
    tracing::info!(
        encounters = scores.len(),
        characters = roster.len(),
        items = items.len(),
        "valuation complete"
    );

    let sections = group_by_raid(&scores, SortOrder::ScoreDescending, metric);
    print!("{}", render_table(&sections, metric));
    Ok(())
}

fn render_table(sections: &[RaidSection], metric: Metric) -> String {
    let header = match metric {
        Metric::MeanUpgrade => "mean upgrade",
        Metric::MeanUpgradePerMinute => "mean upgrade / min",
    };
    let mut out = String::new();
    for section in sections {
        out.push_str(&format!("{} ({})\n", section.raid, header));
        for score in &section.encounters {
            out.push_str(&format!(
                "  {:<32} {:>10.6}\n",
                score.encounter,
                metric.of(score)
            ));
        }
    }
    out
}
