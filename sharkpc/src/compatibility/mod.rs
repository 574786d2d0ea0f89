//! Compatibility Checker
//!
//! Pairwise rules evaluated over the current selection:
//!
//! 1. **Socket**: CPU and motherboard sockets must match.
//! 2. **Power budget**: PSU rating must cover CPU + GPU draw plus 100W.
//!    Only evaluated when a GPU is selected.
//! 3. **Form factor**: an ATX motherboard does not fit a Mini-ITX case.
//!
//! Rules live in a [`RulesEngine`]; [`CompatibilityChecker`] runs the engine
//! through an asynchronous [`CompatibilityBackend`] with a busy flag.

pub mod checker;
pub mod rules;

pub use checker::{
    CheckError, CompatibilityBackend, CompatibilityChecker, CompatibilityReport, PendingCheck,
    SimulatedBackend,
};
pub use rules::{FormFactorRule, Issue, PowerBudgetRule, Rule, RulesEngine, Severity, SocketMatchRule};
