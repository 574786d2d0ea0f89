//! Configurator state shared by every front end.
//! No UI runtime dependencies; user-facing messages go through a [`Notifier`].

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Component};
use crate::compatibility::{
    CheckError, CompatibilityBackend, CompatibilityChecker, CompatibilityReport, PendingCheck,
    RulesEngine, SimulatedBackend,
};
use crate::marketplace::{builtin_marketplaces, find_marketplace, Marketplace, SearchRequest};
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::registry::{Build, BuildRegistry};
use crate::selection::Selection;

#[derive(Debug, thiserror::Error)]
pub enum SharkPcError {
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unknown component: {0}")]
    UnknownComponent(String),
    #[error("Duplicate component id: {0}")]
    DuplicateComponent(String),
    #[error("Build {build} references unknown component {component}")]
    UnknownBuildComponent { build: String, component: String },
    #[error("Unknown marketplace: {0}")]
    UnknownMarketplace(String),
    #[error("No marketplace selected")]
    NoMarketplaceSelected,
    #[error("Nothing selected to search for")]
    EmptySelection,
    #[error(transparent)]
    Check(#[from] CheckError),
}

/// Tunables for a [`Configurator`]. Every field has a default, so a JSON
/// file only needs the keys it overrides.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConfiguratorOptions {
    /// Simulated latency of a compatibility check.
    pub check_latency_ms: u64,
    /// Headroom the PSU must have over CPU + GPU draw.
    pub power_margin_watts: u32,
    pub min_components_for_check: usize,
}

impl Default for ConfiguratorOptions {
    fn default() -> Self {
        Self {
            check_latency_ms: 1500,
            power_margin_watts: 100,
            min_components_for_check: 2,
        }
    }
}

impl ConfiguratorOptions {
    pub fn from_file(path: &Path) -> Result<Self, SharkPcError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SharkPcError::Parse(format!("{}: {}", path.display(), e)))
    }

    pub fn check_latency(&self) -> Duration {
        Duration::from_millis(self.check_latency_ms)
    }

    fn checker(&self) -> CompatibilityChecker {
        let engine = RulesEngine::with_power_margin(self.power_margin_watts);
        let backend = SimulatedBackend::new(engine, self.check_latency());
        CompatibilityChecker::new(Arc::new(backend))
            .with_min_components(self.min_components_for_check)
    }
}

/// The configurator: catalog, current selection, community builds and
/// marketplace choice.
pub struct Configurator {
    catalog: Catalog,
    selection: Selection,
    registry: BuildRegistry,
    marketplaces: Vec<Marketplace>,
    selected_marketplace: Option<String>,
    checker: CompatibilityChecker,
    notifier: Arc<dyn Notifier>,
}

impl Configurator {
    /// Built-in catalog, builds and marketplaces.
    pub fn new(options: ConfiguratorOptions) -> Result<Self, SharkPcError> {
        Self::with_catalog(Catalog::builtin(), options).with_builtin_builds()
    }

    /// Use `catalog` instead of the built-in one. Starts with no community
    /// builds; see [`Configurator::with_builtin_builds`].
    pub fn with_catalog(catalog: Catalog, options: ConfiguratorOptions) -> Self {
        Self {
            catalog,
            selection: Selection::new(),
            registry: BuildRegistry::default(),
            marketplaces: builtin_marketplaces(),
            selected_marketplace: None,
            checker: options.checker(),
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Load the seed builds, resolving their components against this
    /// configurator's catalog.
    pub fn with_builtin_builds(self) -> Result<Self, SharkPcError> {
        let registry = BuildRegistry::builtin(&self.catalog)?;
        Ok(self.with_registry(registry))
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_registry(mut self, registry: BuildRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Swap the compatibility backend, keeping the minimum component count.
    pub fn with_backend(mut self, backend: Arc<dyn CompatibilityBackend>) -> Self {
        let min_components = self.checker.min_components();
        self.checker = CompatibilityChecker::new(backend).with_min_components(min_components);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    // Selection

    /// Add `component`, replacing any selected component of its type.
    pub fn add_component(&mut self, component: Component) -> Option<Component> {
        let message = format!("{} added to build", component.name);
        let replaced = self.selection.add(component);
        self.notifier.notify(Notification::success(message));
        replaced
    }

    /// Add the catalog component with `component_id`.
    pub fn pick(&mut self, component_id: &str) -> Result<Option<Component>, SharkPcError> {
        let component = self
            .catalog
            .get(component_id)
            .cloned()
            .ok_or_else(|| SharkPcError::UnknownComponent(component_id.to_string()))?;
        Ok(self.add_component(component))
    }

    /// Remove a selected component. Unknown ids are ignored.
    pub fn remove_component(&mut self, component_id: &str) -> Option<Component> {
        let removed = self.selection.remove(component_id);
        self.notifier.notify(Notification::success("Component removed"));
        removed
    }

    pub fn total_price(&self) -> u64 {
        self.selection.total_price()
    }

    // Compatibility

    pub fn can_check_compatibility(&self) -> bool {
        self.checker.can_check(&self.selection)
    }

    pub fn is_checking(&self) -> bool {
        self.checker.is_checking()
    }

    /// Start a check on the current selection. The result reflects the
    /// selection as it was when the check started.
    pub fn start_compatibility_check(&self) -> Result<PendingCheck, SharkPcError> {
        Ok(self.checker.start(&self.selection)?)
    }

    /// Run a check to completion and announce the outcome.
    pub async fn check_compatibility(&self) -> Result<CompatibilityReport, SharkPcError> {
        let report = self.start_compatibility_check()?.wait().await?;
        self.announce(&report);
        Ok(report)
    }

    /// Send the user-facing summary of `report` to the notifier.
    pub fn announce(&self, report: &CompatibilityReport) {
        let notification = if report.ok {
            Notification::success("All components are compatible!")
        } else {
            Notification::error(format!("Problems found: {}", report.messages().join(", ")))
        };
        self.notifier.notify(notification);
    }

    // Community builds

    pub fn builds(&self) -> &[Build] {
        self.registry.list()
    }

    pub fn like_build(&mut self, build_id: &str) -> Option<u64> {
        self.registry.like(build_id)
    }

    // Marketplaces

    pub fn marketplaces(&self) -> &[Marketplace] {
        &self.marketplaces
    }

    pub fn choose_marketplace(&mut self, marketplace_id: &str) -> Result<&Marketplace, SharkPcError> {
        let marketplace = find_marketplace(&self.marketplaces, marketplace_id)
            .ok_or_else(|| SharkPcError::UnknownMarketplace(marketplace_id.to_string()))?;
        self.selected_marketplace = Some(marketplace.id.clone());
        Ok(marketplace)
    }

    pub fn selected_marketplace(&self) -> Option<&Marketplace> {
        self.selected_marketplace
            .as_deref()
            .and_then(|id| find_marketplace(&self.marketplaces, id))
    }

    pub fn can_search(&self) -> bool {
        !self.selection.is_empty() && self.selected_marketplace.is_some()
    }

    /// Describe the marketplace search for the current selection. Nothing is
    /// sent anywhere.
    pub fn search_marketplace(&self) -> Result<SearchRequest, SharkPcError> {
        if self.selection.is_empty() {
            return Err(SharkPcError::EmptySelection);
        }
        let marketplace = self
            .selected_marketplace()
            .ok_or(SharkPcError::NoMarketplaceSelected)?;
        let request = SearchRequest::new(marketplace, &self.selection);
        tracing::warn!(
            "Marketplace search is not connected; {} queries for {} were not sent",
            request.queries.len(),
            marketplace.name
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{MemoryNotifier, NotificationLevel};

    fn configurator() -> (Configurator, Arc<MemoryNotifier>) {
        let notifier = Arc::new(MemoryNotifier::new());
        let options = ConfiguratorOptions {
            check_latency_ms: 0,
            ..Default::default()
        };
        let configurator = Configurator::new(options)
            .unwrap()
            .with_notifier(notifier.clone());
        (configurator, notifier)
    }

    #[test]
    fn test_options_partial_json() {
        let options: ConfiguratorOptions = serde_json::from_str(r#"{"power_margin_watts": 50}"#).unwrap();
        assert_eq!(options.power_margin_watts, 50);
        assert_eq!(options.check_latency_ms, 1500);
        assert_eq!(options.min_components_for_check, 2);
    }

    #[test]
    fn test_pick_notifies() {
        let (mut configurator, notifier) = configurator();
        configurator.pick("cpu1").unwrap();
        assert_eq!(
            notifier.last(),
            Some(Notification::success("Intel Core i7-13700K added to build"))
        );

        let err = configurator.pick("cpu42").unwrap_err();
        assert!(matches!(err, SharkPcError::UnknownComponent(_)));
        assert_eq!(configurator.selection().len(), 1);
        assert_eq!(notifier.notifications().len(), 1);
    }

    #[test]
    fn test_remove_always_notifies() {
        let (mut configurator, notifier) = configurator();
        assert!(configurator.remove_component("gpu1").is_none());
        assert_eq!(notifier.last(), Some(Notification::success("Component removed")));
    }

    #[tokio::test]
    async fn test_check_announces_problems() {
        let (mut configurator, notifier) = configurator();
        configurator.pick("cpu1").unwrap();
        configurator.pick("mb2").unwrap();

        let report = configurator.check_compatibility().await.unwrap();
        assert!(!report.ok);
        let last = notifier.last().unwrap();
        assert_eq!(last.level, NotificationLevel::Error);
        assert_eq!(last.message, "Problems found: CPU does not fit the motherboard.");
    }

    #[tokio::test]
    async fn test_check_needs_two_components() {
        let (mut configurator, _) = configurator();
        configurator.pick("cpu1").unwrap();
        assert!(!configurator.can_check_compatibility());
        let err = configurator.check_compatibility().await.unwrap_err();
        assert!(matches!(
            err,
            SharkPcError::Check(CheckError::NotEnoughComponents { selected: 1, required: 2 })
        ));
    }

    #[test]
    fn test_search_preconditions() {
        let (mut configurator, _) = configurator();
        assert!(matches!(
            configurator.search_marketplace(),
            Err(SharkPcError::EmptySelection)
        ));

        configurator.pick("gpu2").unwrap();
        assert!(!configurator.can_search());
        assert!(matches!(
            configurator.search_marketplace(),
            Err(SharkPcError::NoMarketplaceSelected)
        ));

        assert!(configurator.choose_marketplace("amazon").is_err());
        configurator.choose_marketplace("wildberries").unwrap();
        assert!(configurator.can_search());
        let request = configurator.search_marketplace().unwrap();
        assert_eq!(request.queries, vec!["RTX 4060 Ti"]);
        assert_eq!(request.label(), "Find PC on Wildberries");
    }
}
