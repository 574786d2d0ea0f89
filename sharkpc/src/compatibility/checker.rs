//! Asynchronous compatibility checking
//!
//! A check is started against a snapshot of the selection and completes
//! after the backend responds. Only one check may be in flight per
//! [`CompatibilityChecker`]; the busy flag is released when the task
//! finishes or is cancelled.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::compatibility::rules::{Issue, RulesEngine};
use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckError {
    #[error("At least {required} components are needed for a compatibility check ({selected} selected)")]
    NotEnoughComponents { selected: usize, required: usize },
    #[error("A compatibility check is already running")]
    AlreadyRunning,
    #[error("Compatibility check was cancelled")]
    Cancelled,
    #[error("Compatibility backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityReport {
    pub ok: bool,
    pub issues: Vec<Issue>,
    pub checked_at: DateTime<Utc>,
}

impl CompatibilityReport {
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        Self {
            ok: issues.is_empty(),
            issues,
            checked_at: Utc::now(),
        }
    }

    /// Issue messages in rule order.
    pub fn messages(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.message.as_str()).collect()
    }
}

/// Something that can judge a selection. The simulated backend stands in for
/// a remote price/stock/compatibility service.
#[async_trait]
pub trait CompatibilityBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn check(&self, selection: &Selection) -> Result<CompatibilityReport, CheckError>;
}

/// Waits a fixed latency, then runs the local rules engine.
pub struct SimulatedBackend {
    engine: RulesEngine,
    latency: Duration,
}

impl SimulatedBackend {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

    pub fn new(engine: RulesEngine, latency: Duration) -> Self {
        Self { engine, latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new(RulesEngine::with_default_rules(), Self::DEFAULT_LATENCY)
    }
}

#[async_trait]
impl CompatibilityBackend for SimulatedBackend {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn check(&self, selection: &Selection) -> Result<CompatibilityReport, CheckError> {
        tokio::time::sleep(self.latency).await;
        Ok(CompatibilityReport::from_issues(self.engine.analyze(selection)))
    }
}

/// Clears the busy flag when dropped, including when the task is aborted.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Handle to an in-flight check.
pub struct PendingCheck {
    handle: JoinHandle<Result<CompatibilityReport, CheckError>>,
}

impl PendingCheck {
    pub async fn wait(self) -> Result<CompatibilityReport, CheckError> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(CheckError::Cancelled),
            Err(e) => Err(CheckError::Backend(e.to_string())),
        }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

pub struct CompatibilityChecker {
    backend: Arc<dyn CompatibilityBackend>,
    busy: Arc<AtomicBool>,
    min_components: usize,
}

impl CompatibilityChecker {
    pub const DEFAULT_MIN_COMPONENTS: usize = 2;

    pub fn new(backend: Arc<dyn CompatibilityBackend>) -> Self {
        Self {
            backend,
            busy: Arc::new(AtomicBool::new(false)),
            min_components: Self::DEFAULT_MIN_COMPONENTS,
        }
    }

    pub fn with_min_components(mut self, min_components: usize) -> Self {
        self.min_components = min_components;
        self
    }

    pub fn min_components(&self) -> usize {
        self.min_components
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn is_checking(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Whether the check trigger is enabled for `selection`.
    pub fn can_check(&self, selection: &Selection) -> bool {
        selection.len() >= self.min_components && !self.is_checking()
    }

    /// Start a check on a snapshot of `selection`. Later edits to the
    /// selection do not affect the pending result. Must be called within a
    /// tokio runtime.
    pub fn start(&self, selection: &Selection) -> Result<PendingCheck, CheckError> {
        if selection.len() < self.min_components {
            return Err(CheckError::NotEnoughComponents {
                selected: selection.len(),
                required: self.min_components,
            });
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(CheckError::AlreadyRunning);
        }

        let guard = BusyGuard(Arc::clone(&self.busy));
        let backend = Arc::clone(&self.backend);
        let snapshot = selection.clone();
        tracing::info!(
            "Checking compatibility of {} components via {}",
            snapshot.len(),
            backend.name()
        );

        let handle = tokio::spawn(async move {
            let _guard = guard;
            backend.check(&snapshot).await
        });
        Ok(PendingCheck { handle })
    }

    pub async fn check(&self, selection: &Selection) -> Result<CompatibilityReport, CheckError> {
        self.start(selection)?.wait().await
    }
}

impl Default for CompatibilityChecker {
    fn default() -> Self {
        Self::new(Arc::new(SimulatedBackend::default()))
    }
}
