//! Example: extend the RulesEngine with an extra rule and run it directly
//! (without Configurator or the simulated latency).
//! Run with: cargo run --example custom_rules

use sharkpc::{Catalog, ComponentType, Issue, Rule, RulesEngine, Selection, Severity};
use std::sync::Arc;

/// Warn when the build has no storage.
struct StorageRule;

impl Rule for StorageRule {
    fn id(&self) -> &str {
        "storage_present"
    }

    fn name(&self) -> &str {
        "Storage Present"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, selection: &Selection) -> Vec<Issue> {
        if selection.get(ComponentType::Storage).is_some() {
            return Vec::new();
        }
        vec![Issue {
            id: "storage".to_string(),
            rule_id: self.id().to_string(),
            severity: self.severity(),
            message: "No storage selected.".to_string(),
            components: Vec::new(),
            suggestion: Some("Add an SSD".to_string()),
        }]
    }
}

fn main() {
    let catalog = Catalog::builtin();
    let selection: Selection = ["cpu2", "mb1", "gpu1", "psu1"]
        .iter()
        .filter_map(|id| catalog.get(id).cloned())
        .collect();

    let mut engine = RulesEngine::with_default_rules();
    engine.add_rule(Arc::new(StorageRule));
    let issues = engine.analyze(&selection);

    println!("Custom validation found {} issues", issues.len());
    for issue in &issues {
        println!("  [{:?}] {}", issue.severity, issue.message);
        if let Some(ref suggestion) = issue.suggestion {
            println!("    Suggestion: {}", suggestion);
        }
    }

    let errors = issues.iter().filter(|i| matches!(i.severity, Severity::Error)).count();
    if errors > 0 {
        std::process::exit(1);
    }
}
