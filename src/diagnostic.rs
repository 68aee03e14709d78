//! Diagnostic definitions and batch preparation.

use indexmap::IndexMap;
use log::error;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::device::Device;
use crate::error::DiagnosticError;
use crate::tasklog::TaskLogger;

/// A named, driver-evaluated probe yielding a value about a device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Unique name. Duplicate names within one batch: last write wins.
    pub name: String,

    /// Name of the driver this diagnostic targets. A run only prepares the
    /// diagnostics bound to the device's active driver.
    pub driver: String,

    /// Disabled diagnostics are skipped without being counted as failures.
    pub enabled: bool,

    /// The driver-interpretable definition.
    pub definition: DiagnosticDefinition,
}

/// The two supported definition styles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticDefinition {
    /// A behavior snippet the driver evaluates as-is.
    Script { source: String },

    /// A CLI command plus an extraction pattern applied to its output.
    Command {
        /// CLI mode to run the command in (e.g. "enable").
        mode: String,
        command: String,
        pattern: String,
        replacement: String,
    },
}

impl Diagnostic {
    pub fn new(
        name: impl Into<String>,
        driver: impl Into<String>,
        definition: DiagnosticDefinition,
    ) -> Self {
        Self {
            name: name.into(),
            driver: driver.into(),
            enabled: true,
            definition,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Convert this diagnostic into a driver-consumable descriptor.
    ///
    /// Returns `Ok(None)` when the diagnostic simply does not apply to the
    /// device (disabled, or bound to another driver); that is a silent skip,
    /// not a failure. A malformed definition is a failure of this item only.
    pub fn prepare(&self, device: &Device) -> Result<Option<PreparedDiagnostic>, DiagnosticError> {
        if !self.enabled || self.driver != device.driver {
            return Ok(None);
        }
        let descriptor = match &self.definition {
            DiagnosticDefinition::Script { source } => {
                if source.trim().is_empty() {
                    return Err(DiagnosticError::EmptyField {
                        name: self.name.clone(),
                        field: "script source",
                    });
                }
                json!({
                    "type": "script",
                    "name": self.name,
                    "source": source,
                })
            }
            DiagnosticDefinition::Command {
                mode,
                command,
                pattern,
                replacement,
            } => {
                if command.trim().is_empty() {
                    return Err(DiagnosticError::EmptyField {
                        name: self.name.clone(),
                        field: "command",
                    });
                }
                // Compiled here only to validate; the driver applies it.
                Regex::new(pattern).map_err(|source| DiagnosticError::InvalidPattern {
                    name: self.name.clone(),
                    source,
                })?;
                json!({
                    "type": "command",
                    "name": self.name,
                    "mode": mode,
                    "command": command,
                    "pattern": pattern,
                    "replacement": replacement,
                })
            }
        };
        Ok(Some(PreparedDiagnostic {
            name: self.name.clone(),
            descriptor,
        }))
    }
}

/// A diagnostic in the form the driver runtime consumes.
#[derive(Debug, Clone)]
pub struct PreparedDiagnostic {
    pub name: String,
    pub descriptor: Value,
}

/// Prepare a batch of diagnostics against one device.
///
/// Per-item failures are logged to both the `log` facade and the task
/// logger, then dropped; one bad definition never aborts the rest of the
/// batch.
pub fn prepare_batch(
    diagnostics: &[Diagnostic],
    device: &Device,
    logger: &dyn TaskLogger,
) -> IndexMap<String, PreparedDiagnostic> {
    let mut prepared = IndexMap::new();
    for diagnostic in diagnostics {
        match diagnostic.prepare(device) {
            Ok(Some(item)) => {
                prepared.insert(item.name.clone(), item);
            }
            Ok(None) => {}
            Err(e) => {
                error!("error while preparing diagnostic '{}': {e}", diagnostic.name);
                logger.error(&format!(
                    "Error while preparing the diagnostic {}: '{e}'.",
                    diagnostic.name
                ));
            }
        }
    }
    prepared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::addr::NetworkAddress;
    use crate::tasklog::{BufferLogger, TaskLevel};

    fn device() -> Device {
        Device::new(
            "edge1",
            NetworkAddress::parse("2001:db8::1/64").unwrap(),
            "acme_os",
        )
    }

    fn command_diagnostic(name: &str, pattern: &str) -> Diagnostic {
        Diagnostic::new(
            name,
            "acme_os",
            DiagnosticDefinition::Command {
                mode: "enable".to_string(),
                command: "show version".to_string(),
                pattern: pattern.to_string(),
                replacement: "$1".to_string(),
            },
        )
    }

    #[test]
    fn test_prepare_builds_command_descriptor() {
        let prepared = command_diagnostic("uptime", r"uptime is (.*)")
            .prepare(&device())
            .unwrap()
            .unwrap();
        assert_eq!(prepared.name, "uptime");
        assert_eq!(prepared.descriptor["type"], "command");
        assert_eq!(prepared.descriptor["command"], "show version");
    }

    #[test]
    fn test_prepare_skips_disabled_and_foreign_driver() {
        let disabled = command_diagnostic("uptime", ".*").disabled();
        assert!(disabled.prepare(&device()).unwrap().is_none());

        let mut foreign = command_diagnostic("uptime", ".*");
        foreign.driver = "other_os".to_string();
        assert!(foreign.prepare(&device()).unwrap().is_none());
    }

    #[test]
    fn test_prepare_rejects_bad_definitions() {
        let bad_pattern = command_diagnostic("uptime", "(unclosed");
        assert!(matches!(
            bad_pattern.prepare(&device()),
            Err(DiagnosticError::InvalidPattern { .. })
        ));

        let blank = Diagnostic::new(
            "blank",
            "acme_os",
            DiagnosticDefinition::Script {
                source: "   ".to_string(),
            },
        );
        assert!(matches!(
            blank.prepare(&device()),
            Err(DiagnosticError::EmptyField { .. })
        ));
    }

    #[test]
    fn test_batch_isolates_per_item_failure() {
        let logger = BufferLogger::new();
        let batch = vec![
            command_diagnostic("uptime", r"uptime is (.*)"),
            command_diagnostic("broken", "(unclosed"),
            command_diagnostic("serial", r"Serial: (\S+)"),
        ];
        let prepared = prepare_batch(&batch, &device(), &logger);

        assert_eq!(prepared.len(), 2);
        assert!(prepared.contains_key("uptime"));
        assert!(prepared.contains_key("serial"));
        assert_eq!(logger.count_at(TaskLevel::Error), 1);
    }

    #[test]
    fn test_batch_duplicate_names_last_write_wins() {
        let logger = BufferLogger::new();
        let mut first = command_diagnostic("uptime", ".*");
        first.definition = DiagnosticDefinition::Command {
            mode: "enable".to_string(),
            command: "show version".to_string(),
            pattern: ".*".to_string(),
            replacement: "first".to_string(),
        };
        let mut second = command_diagnostic("uptime", ".*");
        second.definition = DiagnosticDefinition::Command {
            mode: "enable".to_string(),
            command: "show version".to_string(),
            pattern: ".*".to_string(),
            replacement: "second".to_string(),
        };
        let prepared = prepare_batch(&[first, second], &device(), &logger);

        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared["uptime"].descriptor["replacement"], "second");
    }

    #[test]
    fn test_serde_definition_tagging() {
        let diagnostic = command_diagnostic("uptime", ".*");
        let json = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(json["definition"]["type"], "command");
        let back: Diagnostic = serde_json::from_value(json).unwrap();
        assert_eq!(back.name, "uptime");
    }
}
