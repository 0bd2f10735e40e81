//! Warning channel between the pipeline and its caller.
//!
//! The pipeline never fails hard: every degraded condition is surfaced as
//! a message through an injected [`DiagnosticsSink`]. The core has no
//! knowledge of how messages are presented; the CLI routes them to
//! `tracing`, while tests and embedders can collect them in memory.

use std::sync::Mutex;
use tracing::{info, warn};

/// How serious a reported condition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
}

/// Receiver for non-fatal pipeline diagnostics.
pub trait DiagnosticsSink {
    /// Report one condition. Implementations must not panic.
    fn report(&self, severity: Severity, message: &str);
}

/// Sink that forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn report(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Info => info!("{message}"),
            Severity::Warning => warn!("{message}"),
        }
    }
}

/// Sink that records diagnostics in memory.
///
/// Useful for asserting on emitted warnings in tests and for embedders
/// that render messages themselves.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages reported at [`Severity::Warning`], in order.
    pub fn warnings(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(severity, _)| *severity == Severity::Warning)
            .map(|(_, message)| message.clone())
            .collect()
    }

    /// Total number of reported messages of any severity.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DiagnosticsSink for MemorySink {
    fn report(&self, severity: Severity, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}
