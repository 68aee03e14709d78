//! Driver execution runtime interface.
//!
//! The sandboxed interpreter that actually evaluates driver behavior is an
//! injected collaborator behind [`DriverRuntime`]. This crate only defines
//! the contract: load a behavior definition into a fresh environment, invoke
//! a named entry point with the fixed argument tuple, dispose the
//! environment. Tests run against fake runtimes implementing the same
//! contract.

mod context;

pub use context::DriverContext;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::helper::ScriptOptions;
use crate::tasklog::TaskLogger;

/// Entry point every driver behavior definition exposes.
pub const DEFAULT_ENTRY_POINT: &str = "_connect";

/// Operation tag for diagnostic runs.
pub const DIAGNOSTICS_OPERATION: &str = "diagnostics";

/// Opaque handle to a loaded execution environment.
///
/// Issued by the runtime on load, surrendered on dispose. Handles are only
/// meaningful to the runtime that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuntimeHandle(u64);

impl RuntimeHandle {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(&self) -> u64 {
        self.0
    }
}

/// Structured failure kind reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The device rejected the driver's authentication attempt.
    AuthenticationFailed,

    /// The loaded behavior does not expose the requested entry point.
    UnsupportedEntryPoint,

    /// Anything else raised during load or execution.
    Other,
}

/// A failure raised by the runtime collaborator.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct RuntimeFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl RuntimeFailure {
    pub fn authentication(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::AuthenticationFailed,
            message: message.into(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::UnsupportedEntryPoint,
            message: message.into(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Other,
            message: message.into(),
        }
    }
}

/// Arguments for a driver entry-point invocation.
///
/// The fixed ABI tuple: operation tag, protocol wire string, options bundle,
/// log sink.
pub struct DriverCall {
    /// Operation tag (e.g. [`DIAGNOSTICS_OPERATION`]).
    pub operation: String,

    /// Wire-level protocol identifier ("snmp", "telnet", "ssh").
    pub protocol: String,

    /// Helpers available to the behavior during this invocation.
    pub options: ScriptOptions,

    /// Run-visible log sink.
    pub logger: Arc<dyn TaskLogger>,
}

impl fmt::Debug for DriverCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverCall")
            .field("operation", &self.operation)
            .field("protocol", &self.protocol)
            .finish_non_exhaustive()
    }
}

/// The sandboxed interpreter hosting driver behavior.
#[async_trait]
pub trait DriverRuntime: Send + Sync {
    /// Allocate a fresh execution environment and load a behavior definition
    /// into it.
    async fn load(&self, driver: &str, source: &str) -> Result<RuntimeHandle, RuntimeFailure>;

    /// Invoke an entry point of a loaded behavior.
    async fn invoke(
        &self,
        handle: RuntimeHandle,
        entry_point: &str,
        call: DriverCall,
    ) -> Result<Value, RuntimeFailure>;

    /// Tear an execution environment down. Handles are single-use.
    async fn dispose(&self, handle: RuntimeHandle);
}
