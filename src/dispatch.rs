//! Diagnostic run orchestration.
//!
//! One [`DiagnosticRunner::run`] call is one unit of work against one
//! device: select the protocol from the driver's declared transport, build
//! the matching helper, acquire an isolated driver context, prepare the
//! diagnostics, invoke the driver's diagnostic entry point, classify the
//! outcome. The context is released exactly once on every exit path; the
//! borrowed sessions are never closed.

use std::sync::Arc;

use indexmap::IndexMap;
use log::error;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::credentials::CredentialSet;
use crate::device::{Device, DeviceDriver, DriverProtocol};
use crate::diagnostic::{Diagnostic, prepare_batch};
use crate::error::{DispatchError, Error, Result, RuntimeError};
use crate::helper::{CliHelper, DeviceHelper, DiagnosticHelper, ScriptOptions, SnmpHelper};
use crate::runtime::{
    DEFAULT_ENTRY_POINT, DIAGNOSTICS_OPERATION, DriverCall, DriverContext, DriverRuntime,
    FailureKind, RuntimeFailure,
};
use crate::session::SessionSet;
use crate::tasklog::TaskLogger;

/// Tunables for a diagnostic runner.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Mirror every CLI command into the task log.
    pub cli_trace: bool,

    /// Entry point invoked on the loaded behavior.
    pub entry_point: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            cli_trace: false,
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
        }
    }
}

/// Executes diagnostic runs against devices.
pub struct DiagnosticRunner {
    runtime: Arc<dyn DriverRuntime>,
    config: RunnerConfig,
}

impl DiagnosticRunner {
    pub fn new(runtime: Arc<dyn DriverRuntime>) -> Self {
        Self::with_config(runtime, RunnerConfig::default())
    }

    pub fn with_config(runtime: Arc<dyn DriverRuntime>, config: RunnerConfig) -> Self {
        Self { runtime, config }
    }

    /// Run a batch of diagnostics against one device.
    ///
    /// Returns the values the driver reported, keyed by diagnostic name. An
    /// empty map is a successful no-op: either nothing prepared, or the
    /// driver reported nothing.
    pub async fn run(
        &self,
        device: &Device,
        sessions: &SessionSet,
        credentials: &CredentialSet,
        diagnostics: &[Diagnostic],
        logger: Arc<dyn TaskLogger>,
    ) -> Result<IndexMap<String, Value>> {
        let driver = device.device_driver()?;

        // Credential/session preconditions are checked before any runtime
        // work: a mismatch fails the run without acquiring a context.
        let mut cli_helper = None;
        let mut snmp_helper = None;
        match driver.protocol {
            DriverProtocol::Snmp => {
                let CredentialSet::Snmp(community) = credentials else {
                    return Err(credential_mismatch(&driver, credentials));
                };
                let session = sessions
                    .snmp
                    .clone()
                    .ok_or(DispatchError::SessionUnavailable { protocol: "SNMP" })?;
                snmp_helper = Some(SnmpHelper::new(session, community.clone(), logger.clone()));
            }
            DriverProtocol::Telnet | DriverProtocol::Ssh => {
                let CredentialSet::Cli(account) = credentials else {
                    return Err(credential_mismatch(&driver, credentials));
                };
                let session = sessions
                    .cli
                    .clone()
                    .ok_or(DispatchError::SessionUnavailable { protocol: "CLI" })?;
                cli_helper = Some(CliHelper::new(
                    session,
                    account.clone(),
                    logger.clone(),
                    self.config.cli_trace,
                ));
            }
        }

        let context = DriverContext::acquire(self.runtime.as_ref(), &driver).await?;
        let outcome = self
            .run_in_context(&context, &driver, device, cli_helper, snmp_helper, diagnostics, &logger)
            .await;
        context.release().await;
        outcome
    }

    #[allow(clippy::too_many_arguments)]
    async fn run_in_context(
        &self,
        context: &DriverContext<'_>,
        driver: &DeviceDriver,
        device: &Device,
        cli_helper: Option<CliHelper>,
        snmp_helper: Option<SnmpHelper>,
        diagnostics: &[Diagnostic],
        logger: &Arc<dyn TaskLogger>,
    ) -> Result<IndexMap<String, Value>> {
        let prepared = prepare_batch(diagnostics, device, logger.as_ref());
        if prepared.is_empty() {
            logger.info("No diagnostic to run on this device.");
            return Ok(IndexMap::new());
        }

        let diagnostic_helper =
            DiagnosticHelper::new(diagnostics.to_vec(), prepared, logger.clone());
        let mut options = ScriptOptions::new(logger.clone())
            .with_device(DeviceHelper::new(device))
            .with_diagnostics(diagnostic_helper.clone());
        if let Some(helper) = cli_helper {
            options = options.with_cli(helper);
        }
        if let Some(helper) = snmp_helper {
            options = options.with_snmp(helper);
        }

        let call = DriverCall {
            operation: DIAGNOSTICS_OPERATION.to_string(),
            protocol: driver.protocol.wire_value().to_string(),
            options,
            logger: logger.clone(),
        };

        match context.invoke(&self.config.entry_point, call).await {
            Ok(_) => Ok(diagnostic_helper.results()),
            Err(failure) => Err(classify_failure(
                driver,
                &self.config.entry_point,
                failure,
                logger.as_ref(),
            )),
        }
    }
}

fn credential_mismatch(driver: &DeviceDriver, credentials: &CredentialSet) -> Error {
    DispatchError::InvalidCredentials {
        message: format!(
            "driver '{}' requires {} over {}, got {} credentials",
            driver.name,
            if driver.protocol.requires_cli() {
                "a CLI account"
            } else {
                "an SNMP community"
            },
            driver.protocol,
            credentials.kind(),
        ),
    }
    .into()
}

/// Map an invocation failure onto the run error taxonomy.
///
/// Structured kinds from the runtime win; for runtimes that only report
/// plain messages, the authentication signature check takes over.
fn classify_failure(
    driver: &DeviceDriver,
    entry_point: &str,
    failure: RuntimeFailure,
    logger: &dyn TaskLogger,
) -> Error {
    error!(
        "error while running driver '{}': {}",
        driver.name, failure.message
    );
    logger.error(&format!(
        "Error while running driver {}: '{}'.",
        driver.name, failure.message
    ));
    match failure.kind {
        FailureKind::AuthenticationFailed => DispatchError::InvalidCredentials {
            message: failure.message,
        }
        .into(),
        FailureKind::UnsupportedEntryPoint => RuntimeError::UnsupportedEntryPoint {
            driver: driver.name.clone(),
            entry_point: entry_point.to_string(),
        }
        .into(),
        FailureKind::Other if is_authentication_failure(&failure.message) => {
            DispatchError::InvalidCredentials {
                message: failure.message,
            }
            .into()
        }
        FailureKind::Other => RuntimeError::Execution {
            driver: driver.name.clone(),
            message: failure.message,
        }
        .into(),
    }
}

static AUTH_FAILURE_SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)authentication\s+(failed|failure|error)|invalid\s+credentials")
        .unwrap()
});

/// Whether a plain failure message reads as an authentication rejection.
pub fn is_authentication_failure(message: &str) -> bool {
    AUTH_FAILURE_SIGNATURE.is_match(message)
}
