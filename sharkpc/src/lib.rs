//! SharkPC - PC build configurator core
//!
//! Browse a component catalog, assemble a build with at most one part per
//! type, check it for compatibility and browse community builds.
//!
//! # Quick Start
//!
//! ```no_run
//! use sharkpc::{Configurator, ConfiguratorOptions};
//!
//! # async fn run() -> Result<(), sharkpc::SharkPcError> {
//! let mut configurator = Configurator::new(ConfiguratorOptions::default())?;
//! configurator.pick("cpu1")?;
//! configurator.pick("mb2")?;
//!
//! let report = configurator.check_compatibility().await?;
//! for message in report.messages() {
//!     println!("{}", message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Catalog**: built-in component list, or load your own JSON
//! - **Compatibility**: socket, power budget and form factor rules
//! - **Community builds**: most-liked first, with a like counter
//! - **Marketplaces**: search requests for a selection (not sent anywhere yet)

pub mod catalog;
pub mod compatibility;
pub mod core;
pub mod format;
pub mod marketplace;
pub mod notify;
pub mod registry;
pub mod selection;

// Re-export main types
pub use catalog::{Catalog, CatalogQuery, Component, ComponentType, SortKey};
pub use compatibility::{
    CheckError, CompatibilityBackend, CompatibilityChecker, CompatibilityReport, Issue,
    PendingCheck, Rule, RulesEngine, Severity, SimulatedBackend,
};
pub use crate::core::{Configurator, ConfiguratorOptions, SharkPcError};
pub use format::format_price;
pub use marketplace::{Marketplace, SearchRequest};
pub use notify::{MemoryNotifier, Notification, NotificationLevel, Notifier, TracingNotifier};
pub use registry::{Build, BuildRegistry};
pub use selection::Selection;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Catalog, CompatibilityReport, Component, ComponentType, Configurator,
        ConfiguratorOptions, Issue, Selection, Severity, SharkPcError,
    };
}
