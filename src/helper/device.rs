//! Device helper.

use serde_json::{Value, json};

use crate::addr::NetworkAddress;
use crate::device::Device;

/// Exposes the device's descriptive attributes to the driver behavior.
///
/// A value snapshot; the behavior cannot mutate the device record through
/// it.
#[derive(Debug, Clone)]
pub struct DeviceHelper {
    name: String,
    address: NetworkAddress,
    driver: String,
}

impl DeviceHelper {
    pub fn new(device: &Device) -> Self {
        Self {
            name: device.name.clone(),
            address: device.address,
            driver: device.driver.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bare management address, without prefix length.
    pub fn ip(&self) -> String {
        self.address.ip()
    }

    pub fn address(&self) -> &NetworkAddress {
        &self.address
    }

    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// JSON snapshot for behaviors that take attributes wholesale.
    pub fn to_value(&self) -> Value {
        json!({
            "name": self.name,
            "ip": self.ip(),
            "driver": self.driver,
        })
    }
}
