//! Diagnostic helper.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;
use log::warn;
use serde_json::Value;

use crate::diagnostic::{Diagnostic, PreparedDiagnostic};
use crate::tasklog::TaskLogger;

/// Exposes the prepared diagnostics to the driver behavior and collects the
/// values it reports back.
///
/// Cloning shares the result store, so the dispatcher keeps one clone and
/// reads the results after the invocation returns.
#[derive(Clone)]
pub struct DiagnosticHelper {
    diagnostics: Arc<Vec<Diagnostic>>,
    prepared: Arc<IndexMap<String, PreparedDiagnostic>>,
    results: Arc<Mutex<IndexMap<String, Value>>>,
    logger: Arc<dyn TaskLogger>,
}

impl DiagnosticHelper {
    pub fn new(
        diagnostics: Vec<Diagnostic>,
        prepared: IndexMap<String, PreparedDiagnostic>,
        logger: Arc<dyn TaskLogger>,
    ) -> Self {
        Self {
            diagnostics: Arc::new(diagnostics),
            prepared: Arc::new(prepared),
            results: Arc::new(Mutex::new(IndexMap::new())),
            logger,
        }
    }

    /// The original diagnostic list, including items that did not prepare.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// A prepared descriptor by name.
    pub fn get(&self, name: &str) -> Option<&PreparedDiagnostic> {
        self.prepared.get(name)
    }

    /// Names of the prepared diagnostics, in preparation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.prepared.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.prepared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prepared.is_empty()
    }

    /// Record a value the driver produced for a diagnostic.
    ///
    /// Values for names that were never prepared are refused and logged.
    pub fn set_result(&self, name: &str, value: Value) {
        if !self.prepared.contains_key(name) {
            self.logger
                .warn(&format!("Ignoring result for unknown diagnostic '{name}'."));
            return;
        }
        match self.results.lock() {
            Ok(mut results) => {
                results.insert(name.to_string(), value);
            }
            Err(_) => warn!("diagnostic result store poisoned, dropping '{name}'"),
        }
    }

    /// Snapshot of the collected results.
    pub fn results(&self) -> IndexMap<String, Value> {
        self.results.lock().map(|r| r.clone()).unwrap_or_default()
    }
}
