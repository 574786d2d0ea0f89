use crate::catalog::ComponentType;
use crate::selection::Selection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Suggestion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub rule_id: String,
    pub severity: Severity,
    pub message: String,
    /// Ids of the selected components the rule compared.
    pub components: Vec<String>,
    pub suggestion: Option<String>,
}

impl Issue {
    fn new(rule: &dyn Rule, message: &str, components: Vec<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            rule_id: rule.id().to_string(),
            severity: rule.severity(),
            message: message.to_string(),
            components,
            suggestion: None,
        }
    }

    fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

pub trait Rule: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn severity(&self) -> Severity;
    fn check(&self, selection: &Selection) -> Vec<Issue>;
}

pub struct RulesEngine {
    rules: Vec<Arc<dyn Rule>>,
}

impl RulesEngine {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Socket, power budget and form factor rules, in that order.
    pub fn with_default_rules() -> Self {
        Self::with_power_margin(PowerBudgetRule::DEFAULT_MARGIN_WATTS)
    }

    pub fn with_power_margin(margin_watts: u32) -> Self {
        let mut engine = Self::new();
        engine.add_rule(Arc::new(SocketMatchRule));
        engine.add_rule(Arc::new(PowerBudgetRule { margin_watts }));
        engine.add_rule(Arc::new(FormFactorRule));
        engine
    }

    pub fn add_rule(&mut self, rule: Arc<dyn Rule>) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Run every rule in registration order. Each rule is independent.
    pub fn analyze(&self, selection: &Selection) -> Vec<Issue> {
        let mut issues = Vec::new();
        for rule in &self.rules {
            let found = rule.check(selection);
            tracing::debug!("Rule {} reported {} issue(s)", rule.id(), found.len());
            issues.extend(found);
        }
        issues
    }
}

impl Default for RulesEngine {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

// Rule implementations

pub struct SocketMatchRule;

impl Rule for SocketMatchRule {
    fn id(&self) -> &str {
        "socket_match"
    }

    fn name(&self) -> &str {
        "CPU Socket Check"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, selection: &Selection) -> Vec<Issue> {
        let (Some(cpu), Some(motherboard)) = (
            selection.get(ComponentType::Cpu),
            selection.get(ComponentType::Motherboard),
        ) else {
            return Vec::new();
        };

        // A socket missing on one side counts as a mismatch; missing on both does not.
        if cpu.socket == motherboard.socket {
            return Vec::new();
        }

        vec![Issue::new(
            self,
            "CPU does not fit the motherboard.",
            vec![cpu.id.clone(), motherboard.id.clone()],
        )
        .with_suggestion(format!(
            "Pick a motherboard with socket {}",
            cpu.socket.as_deref().unwrap_or("matching the CPU")
        ))]
    }
}

/// PSU rating must cover CPU + GPU draw plus a fixed margin. Only evaluated
/// when a GPU is selected; a CPU-only build is never power checked.
pub struct PowerBudgetRule {
    pub margin_watts: u32,
}

impl PowerBudgetRule {
    pub const DEFAULT_MARGIN_WATTS: u32 = 100;
}

impl Default for PowerBudgetRule {
    fn default() -> Self {
        Self {
            margin_watts: Self::DEFAULT_MARGIN_WATTS,
        }
    }
}

impl Rule for PowerBudgetRule {
    fn id(&self) -> &str {
        "power_budget"
    }

    fn name(&self) -> &str {
        "Power Supply Budget"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, selection: &Selection) -> Vec<Issue> {
        let (Some(psu), Some(gpu)) = (
            selection.get(ComponentType::Psu),
            selection.get(ComponentType::Gpu),
        ) else {
            return Vec::new();
        };
        let cpu = selection.get(ComponentType::Cpu);

        let required = u64::from(cpu.and_then(|c| c.power).unwrap_or(0))
            + u64::from(gpu.power.unwrap_or(0))
            + u64::from(self.margin_watts);
        let Some(rated) = psu.power else {
            tracing::debug!("PSU {} has no power rating, skipping budget check", psu.id);
            return Vec::new();
        };

        if u64::from(rated) >= required {
            return Vec::new();
        }

        let mut components: Vec<String> = cpu.map(|c| c.id.clone()).into_iter().collect();
        components.push(gpu.id.clone());
        components.push(psu.id.clone());

        vec![Issue::new(
            self,
            "Power supply is too weak for this configuration.",
            components,
        )
        .with_suggestion(format!(
            "Use a power supply rated for at least {}W",
            required
        ))]
    }
}

/// Flags an ATX motherboard in a Mini-ITX case. No other size pairs are checked.
pub struct FormFactorRule;

impl Rule for FormFactorRule {
    fn id(&self) -> &str {
        "form_factor"
    }

    fn name(&self) -> &str {
        "Case Form Factor"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, selection: &Selection) -> Vec<Issue> {
        let (Some(motherboard), Some(case)) = (
            selection.get(ComponentType::Motherboard),
            selection.get(ComponentType::Case),
        ) else {
            return Vec::new();
        };

        match (motherboard.form_factor.as_deref(), case.form_factor.as_deref()) {
            (Some("ATX"), Some("Mini-ITX")) => vec![Issue::new(
                self,
                "Motherboard does not fit the case.",
                vec![motherboard.id.clone(), case.id.clone()],
            )
            .with_suggestion("Choose an ATX case or a Mini-ITX motherboard")],
            _ => Vec::new(),
        }
    }
}
