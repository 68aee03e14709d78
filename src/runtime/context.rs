//! Scoped driver execution context.

use log::warn;
use serde_json::Value;

use super::{DriverCall, DriverRuntime, RuntimeFailure, RuntimeHandle};
use crate::device::DeviceDriver;
use crate::error::{Result, RuntimeError};

/// An isolated execution environment holding one loaded driver behavior.
///
/// Acquired per run, never shared across devices or drivers, released
/// exactly once on every exit path. The dispatcher releases explicitly;
/// dropping an unreleased context leaks the runtime environment and logs a
/// warning.
pub struct DriverContext<'r> {
    runtime: &'r dyn DriverRuntime,
    handle: Option<RuntimeHandle>,
    driver: String,
}

impl<'r> DriverContext<'r> {
    /// Allocate a fresh environment and load the driver's behavior into it.
    pub async fn acquire(
        runtime: &'r dyn DriverRuntime,
        driver: &DeviceDriver,
    ) -> Result<DriverContext<'r>> {
        let handle = runtime
            .load(&driver.name, &driver.source)
            .await
            .map_err(|failure| RuntimeError::Load {
                driver: driver.name.clone(),
                message: failure.message,
            })?;
        Ok(Self {
            runtime,
            handle: Some(handle),
            driver: driver.name.clone(),
        })
    }

    /// Name of the driver loaded in this context.
    pub fn driver(&self) -> &str {
        &self.driver
    }

    /// Call into the loaded behavior.
    pub async fn invoke(
        &self,
        entry_point: &str,
        call: DriverCall,
    ) -> std::result::Result<Value, RuntimeFailure> {
        match self.handle {
            Some(handle) => self.runtime.invoke(handle, entry_point, call).await,
            None => Err(RuntimeFailure::other("context already released")),
        }
    }

    /// Dispose the environment. Consumes the context.
    pub async fn release(mut self) {
        if let Some(handle) = self.handle.take() {
            self.runtime.dispose(handle).await;
        }
    }
}

impl Drop for DriverContext<'_> {
    fn drop(&mut self) {
        if self.handle.take().is_some() {
            warn!(
                "driver context for '{}' dropped without release",
                self.driver
            );
        }
    }
}
