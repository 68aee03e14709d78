//! Device and device-driver records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::addr::NetworkAddress;
use crate::error::{DispatchError, Result};
use crate::registry::DriverRegistry;

/// Transport protocol a driver converses over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverProtocol {
    Snmp,
    Telnet,
    Ssh,
}

impl DriverProtocol {
    /// Wire-level string form handed to the driver invocation.
    pub const fn wire_value(&self) -> &'static str {
        match self {
            DriverProtocol::Snmp => "snmp",
            DriverProtocol::Telnet => "telnet",
            DriverProtocol::Ssh => "ssh",
        }
    }

    /// Whether this protocol runs over a command-line session.
    pub const fn requires_cli(&self) -> bool {
        matches!(self, DriverProtocol::Telnet | DriverProtocol::Ssh)
    }
}

impl fmt::Display for DriverProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_value())
    }
}

/// A vendor/model-specific driver.
///
/// The behavior definition (`source`) is data, not code compiled into this
/// crate: the runtime collaborator loads it into an isolated context per
/// run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceDriver {
    /// Driver name (e.g., "cisco_iosxe", "juniper_junos").
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// Transport protocol this driver requires.
    pub protocol: DriverProtocol,

    /// Loadable behavior definition.
    pub source: String,
}

impl DeviceDriver {
    pub fn new(
        name: impl Into<String>,
        protocol: DriverProtocol,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            protocol,
            source: source.into(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// A managed network device.
///
/// Live sessions are not stored here; the caller owns them and lends them to
/// each run through a [`SessionSet`](crate::session::SessionSet).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Device name.
    pub name: String,

    /// Primary management address.
    pub address: NetworkAddress,

    /// Name of the active driver, selected by model/vendor.
    pub driver: String,
}

impl Device {
    pub fn new(
        name: impl Into<String>,
        address: NetworkAddress,
        driver: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            driver: driver.into(),
        }
    }

    /// Resolve the active driver from the registry.
    pub fn device_driver(&self) -> Result<DeviceDriver> {
        DriverRegistry::lookup(&self.driver).ok_or_else(|| {
            DispatchError::MissingDriver {
                device: self.name.clone(),
                driver: self.driver.clone(),
            }
            .into()
        })
    }
}
