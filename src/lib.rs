//! # Netdiag
//!
//! Async diagnostic automation engine for network devices.
//!
//! Netdiag runs vendor-specific diagnostic procedures against a device over
//! a command-line transport (Telnet/SSH) or SNMP. The protocol conversation
//! for each device type is supplied as data — a driver behavior definition
//! loaded into an isolated execution context per run — rather than compiled
//! into this crate.
//!
//! ## Features
//!
//! - Bit-exact IPv4/IPv6 address model with prefix containment and role tags
//! - Per-run isolated driver contexts with guaranteed disposal
//! - Pluggable scripting runtime and transports (trait-based collaborators)
//! - Per-diagnostic failure isolation: one bad definition never kills a batch
//! - Structured error classification, including authentication detection
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use netdiag::{
//!     Device, DeviceDriver, DriverProtocol, DriverRegistry, NetworkAddress,
//! };
//!
//! fn main() -> Result<(), netdiag::Error> {
//!     let mut registry = DriverRegistry::global()
//!         .write()
//!         .expect("driver registry poisoned");
//!     registry.replace(DeviceDriver::new(
//!         "acme_os",
//!         DriverProtocol::Ssh,
//!         std::fs::read_to_string("drivers/acme_os.js").unwrap_or_default(),
//!     ));
//!     drop(registry);
//!
//!     let device = Device::new(
//!         "edge1",
//!         NetworkAddress::parse("2001:db8::1/64")?,
//!         "acme_os",
//!     );
//!     assert_eq!(device.device_driver()?.protocol, DriverProtocol::Ssh);
//!     Ok(())
//! }
//! ```
//!
//! A full run wires a [`DiagnosticRunner`] to a [`DriverRuntime`]
//! implementation and the live sessions lent by the caller; see the
//! [`dispatch`] module documentation.

pub mod addr;
pub mod credentials;
pub mod device;
pub mod diagnostic;
pub mod dispatch;
pub mod error;
pub mod helper;
pub mod registry;
pub mod runtime;
pub mod session;
pub mod tasklog;

// Re-export main types for convenience
pub use addr::{AddressUsage, Network4Address, Network6Address, NetworkAddress};
pub use credentials::{CliAccount, CredentialSet, SnmpCommunity, SnmpVersion};
pub use device::{Device, DeviceDriver, DriverProtocol};
pub use diagnostic::{Diagnostic, DiagnosticDefinition, PreparedDiagnostic};
pub use dispatch::{DiagnosticRunner, RunnerConfig};
pub use error::{Error, Result};
pub use helper::{CliHelper, DeviceHelper, DiagnosticHelper, ScriptOptions, SnmpHelper};
pub use registry::DriverRegistry;
pub use runtime::{
    DriverCall, DriverContext, DriverRuntime, FailureKind, RuntimeFailure, RuntimeHandle,
};
pub use session::{CliSession, SessionSet, SnmpSession};
pub use tasklog::{BufferLogger, FacadeLogger, TaskLevel, TaskLogger};
