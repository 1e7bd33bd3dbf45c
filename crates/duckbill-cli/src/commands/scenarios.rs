//! Prints the builtin scenario registry.

use duckbill_core::scenario::Catalog;

pub fn run() {
    for scenario in Catalog::builtin().scenarios() {
        println!("{} ({})", scenario.name, scenario.key.as_str());
        println!("  triggers: {}", scenario.triggers.join(", "));
        let stages: Vec<&str> = scenario.stages.iter().map(|s| s.stage).collect();
        println!("  stages:   {}", stages.join(" -> "));
        println!();
    }
}
