//! Global driver registry.
//!
//! Drivers are registered by the embedding application, typically after
//! reading their behavior definitions from disk. Devices reference drivers
//! by name.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use crate::device::DeviceDriver;
use crate::error::{DispatchError, Result};

/// Global driver registry.
static REGISTRY: Lazy<RwLock<DriverRegistry>> =
    Lazy::new(|| RwLock::new(DriverRegistry::new()));

/// Registry of device drivers, keyed by name.
#[derive(Debug, Default)]
pub struct DriverRegistry {
    drivers: HashMap<String, DeviceDriver>,
}

impl DriverRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            drivers: HashMap::new(),
        }
    }

    /// Get the global registry.
    pub fn global() -> &'static RwLock<DriverRegistry> {
        &REGISTRY
    }

    /// Look a driver up in the global registry.
    pub fn lookup(name: &str) -> Option<DeviceDriver> {
        REGISTRY.read().ok()?.get(name).cloned()
    }

    /// Register a driver. Duplicate names are rejected.
    pub fn register(&mut self, driver: DeviceDriver) -> Result<()> {
        if self.drivers.contains_key(&driver.name) {
            return Err(DispatchError::DriverAlreadyRegistered {
                name: driver.name.clone(),
            }
            .into());
        }
        self.drivers.insert(driver.name.clone(), driver);
        Ok(())
    }

    /// Register or overwrite a driver, for reloading updated definitions.
    pub fn replace(&mut self, driver: DeviceDriver) {
        self.drivers.insert(driver.name.clone(), driver);
    }

    /// Get a driver by name.
    pub fn get(&self, name: &str) -> Option<&DeviceDriver> {
        self.drivers.get(name)
    }

    /// Check if a driver is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.drivers.contains_key(name)
    }

    /// List all registered driver names.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.drivers.keys()
    }
}
