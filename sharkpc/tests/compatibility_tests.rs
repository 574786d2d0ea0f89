//! Compatibility rules against concrete part combinations
//!
//! Covers:
//! - Socket mismatch between CPU and motherboard
//! - PSU power budget with the 100W margin
//! - ATX motherboard in a Mini-ITX case
//! - Several issues at once

use sharkpc::compatibility::{FormFactorRule, PowerBudgetRule, Rule, RulesEngine, SocketMatchRule};
use sharkpc::prelude::*;

// =============================================================================
// Test Helpers
// =============================================================================

fn cpu(socket: &str, power: u32) -> Component {
    Component::new("cpu-x", "Test CPU", ComponentType::Cpu, 30000)
        .with_socket(socket)
        .with_power(power)
}

fn motherboard(socket: &str, form_factor: &str) -> Component {
    Component::new("mb-x", "Test Board", ComponentType::Motherboard, 15000)
        .with_socket(socket)
        .with_form_factor(form_factor)
}

fn gpu(power: u32) -> Component {
    Component::new("gpu-x", "Test GPU", ComponentType::Gpu, 60000).with_power(power)
}

fn psu(power: u32) -> Component {
    Component::new("psu-x", "Test PSU", ComponentType::Psu, 9000).with_power(power)
}

fn case(form_factor: &str) -> Component {
    Component::new("case-x", "Test Case", ComponentType::Case, 7000).with_form_factor(form_factor)
}

fn selection(parts: Vec<Component>) -> Selection {
    parts.into_iter().collect()
}

fn messages(selection: &Selection) -> Vec<String> {
    RulesEngine::with_default_rules()
        .analyze(selection)
        .into_iter()
        .map(|i| i.message)
        .collect()
}

// =============================================================================
// Socket
// =============================================================================

#[test]
fn test_socket_mismatch_reported() {
    let build = selection(vec![cpu("LGA1700", 125), motherboard("AM5", "ATX")]);
    assert_eq!(messages(&build), vec!["CPU does not fit the motherboard."]);
}

#[test]
fn test_socket_match_passes() {
    let build = selection(vec![cpu("AM5", 105), motherboard("AM5", "ATX")]);
    assert!(SocketMatchRule.check(&build).is_empty());
}

// =============================================================================
// Power budget
// =============================================================================

#[test]
fn test_power_budget_sufficient() {
    // 125 + 220 + 100 = 445 <= 550
    let build = selection(vec![cpu("AM5", 125), gpu(220), psu(550)]);
    assert!(PowerBudgetRule::default().check(&build).is_empty());
}

#[test]
fn test_power_budget_too_weak() {
    let build = selection(vec![cpu("AM5", 125), gpu(220), psu(400)]);
    let issues = PowerBudgetRule::default().check(&build);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].message, "Power supply is too weak for this configuration.");
    assert_eq!(issues[0].suggestion.as_deref(), Some("Use a power supply rated for at least 445W"));
}

#[test]
fn test_power_budget_exact_boundary() {
    let build = selection(vec![cpu("AM5", 125), gpu(220), psu(445)]);
    assert!(PowerBudgetRule::default().check(&build).is_empty());

    let build = selection(vec![cpu("AM5", 125), gpu(220), psu(444)]);
    assert_eq!(PowerBudgetRule::default().check(&build).len(), 1);
}

// =============================================================================
// Form factor
// =============================================================================

#[test]
fn test_atx_board_in_mini_itx_case() {
    let build = selection(vec![motherboard("AM5", "ATX"), case("Mini-ITX")]);
    assert_eq!(messages(&build), vec!["Motherboard does not fit the case."]);
}

#[test]
fn test_atx_board_in_atx_case() {
    let build = selection(vec![motherboard("AM5", "ATX"), case("ATX")]);
    assert!(FormFactorRule.check(&build).is_empty());
}

// =============================================================================
// Engine
// =============================================================================

#[test]
fn test_multiple_issues_in_rule_order() {
    let build = selection(vec![
        case("Mini-ITX"),
        psu(300),
        gpu(220),
        motherboard("AM5", "ATX"),
        cpu("LGA1700", 125),
    ]);
    assert_eq!(
        messages(&build),
        vec![
            "CPU does not fit the motherboard.",
            "Power supply is too weak for this configuration.",
            "Motherboard does not fit the case.",
        ]
    );
}

#[test]
fn test_builtin_seed_builds_are_clean() {
    let catalog = Catalog::builtin();
    let engine = RulesEngine::with_default_rules();
    for ids in [
        ["cpu1", "gpu1", "mb1", "ram1", "storage1", "psu1", "case1"],
        ["cpu2", "gpu2", "mb2", "ram1", "storage1", "psu1", "case1"],
    ] {
        let build: Selection = ids.iter().filter_map(|id| catalog.get(id).cloned()).collect();
        assert_eq!(build.len(), 7);
        assert!(engine.analyze(&build).is_empty(), "{:?}", ids);
    }
}

#[test]
fn test_issue_structure() {
    let build = selection(vec![cpu("LGA1700", 125), motherboard("AM5", "ATX")]);
    for issue in RulesEngine::with_default_rules().analyze(&build) {
        assert!(!issue.id.is_empty());
        assert!(!issue.rule_id.is_empty());
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.components, vec!["cpu-x", "mb-x"]);
        if let Some(ref suggestion) = issue.suggestion {
            assert!(!suggestion.is_empty());
        }
    }
}

struct RamRequiredRule;

impl Rule for RamRequiredRule {
    fn id(&self) -> &str {
        "ram_required"
    }

    fn name(&self) -> &str {
        "Memory Present"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, selection: &Selection) -> Vec<Issue> {
        if selection.get(ComponentType::Ram).is_some() {
            return Vec::new();
        }
        vec![Issue {
            id: "ram".to_string(),
            rule_id: self.id().to_string(),
            severity: self.severity(),
            message: "No memory selected.".to_string(),
            components: Vec::new(),
            suggestion: None,
        }]
    }
}

#[test]
fn test_custom_rule_runs_after_defaults() {
    let mut engine = RulesEngine::with_default_rules();
    engine.add_rule(std::sync::Arc::new(RamRequiredRule));
    assert_eq!(engine.rules().len(), 4);

    let build = selection(vec![cpu("LGA1700", 125), motherboard("AM5", "ATX")]);
    let ids: Vec<_> = engine.analyze(&build).into_iter().map(|i| i.rule_id).collect();
    assert_eq!(ids, vec!["socket_match", "ram_required"]);
}
