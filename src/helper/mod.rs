//! Script-facing helpers handed to the driver runtime.
//!
//! Helpers are thin adapters: they expose a device's live transport, its
//! credential set and its prepared diagnostics to the loaded behavior,
//! without letting the behavior own any of them.

mod cli;
mod device;
mod diagnostic;
mod snmp;

pub use cli::CliHelper;
pub use device::DeviceHelper;
pub use diagnostic::DiagnosticHelper;
pub use snmp::SnmpHelper;

use std::fmt;
use std::sync::Arc;

use crate::tasklog::TaskLogger;

/// The options bundle carried by a driver invocation.
///
/// Exactly one protocol helper is set per run (CLI xor SNMP), chosen by the
/// driver's declared transport.
pub struct ScriptOptions {
    pub cli: Option<CliHelper>,
    pub snmp: Option<SnmpHelper>,
    pub device: Option<DeviceHelper>,
    pub diagnostics: Option<DiagnosticHelper>,
    pub logger: Arc<dyn TaskLogger>,
}

impl ScriptOptions {
    pub fn new(logger: Arc<dyn TaskLogger>) -> Self {
        Self {
            cli: None,
            snmp: None,
            device: None,
            diagnostics: None,
            logger,
        }
    }

    pub fn with_cli(mut self, helper: CliHelper) -> Self {
        self.cli = Some(helper);
        self
    }

    pub fn with_snmp(mut self, helper: SnmpHelper) -> Self {
        self.snmp = Some(helper);
        self
    }

    pub fn with_device(mut self, helper: DeviceHelper) -> Self {
        self.device = Some(helper);
        self
    }

    pub fn with_diagnostics(mut self, helper: DiagnosticHelper) -> Self {
        self.diagnostics = Some(helper);
        self
    }
}

impl fmt::Debug for ScriptOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptOptions")
            .field("cli", &self.cli.as_ref().map(|_| "<CliHelper>"))
            .field("snmp", &self.snmp.as_ref().map(|_| "<SnmpHelper>"))
            .field("device", &self.device.as_ref().map(|_| "<DeviceHelper>"))
            .field(
                "diagnostics",
                &self.diagnostics.as_ref().map(|_| "<DiagnosticHelper>"),
            )
            .finish_non_exhaustive()
    }
}
