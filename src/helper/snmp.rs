//! SNMP helper.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::credentials::{SnmpCommunity, SnmpVersion};
use crate::runtime::RuntimeFailure;
use crate::session::SnmpSession;
use crate::tasklog::TaskLogger;

/// Exposes a live SNMP session and its community to the driver behavior.
#[derive(Clone)]
pub struct SnmpHelper {
    session: Arc<Mutex<dyn SnmpSession>>,
    community: SnmpCommunity,
    logger: Arc<dyn TaskLogger>,
}

impl SnmpHelper {
    pub fn new(
        session: Arc<Mutex<dyn SnmpSession>>,
        community: SnmpCommunity,
        logger: Arc<dyn TaskLogger>,
    ) -> Self {
        Self {
            session,
            community,
            logger,
        }
    }

    pub fn community(&self) -> &str {
        self.community.community()
    }

    pub fn version(&self) -> SnmpVersion {
        self.community.version()
    }

    /// Get a single OID value over the borrowed session.
    pub async fn get(&self, oid: &str) -> Result<String, RuntimeFailure> {
        let mut session = self.session.lock().await;
        session
            .get(oid)
            .await
            .map_err(|e| self.transport_failure(oid, e))
    }

    /// Walk a subtree over the borrowed session.
    pub async fn walk(&self, oid: &str) -> Result<Vec<(String, String)>, RuntimeFailure> {
        let mut session = self.session.lock().await;
        session
            .walk(oid)
            .await
            .map_err(|e| self.transport_failure(oid, e))
    }

    fn transport_failure(&self, oid: &str, e: std::io::Error) -> RuntimeFailure {
        self.logger.warn(&format!("SNMP request on {oid} failed: {e}"));
        RuntimeFailure::other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use async_trait::async_trait;

    use super::*;
    use crate::tasklog::{BufferLogger, TaskLevel};

    struct TableSession;

    #[async_trait]
    impl SnmpSession for TableSession {
        async fn get(&mut self, oid: &str) -> io::Result<String> {
            if oid == "1.3.6.1.2.1.1.5.0" {
                Ok("edge1".to_string())
            } else {
                Err(io::Error::new(io::ErrorKind::NotFound, "no such OID"))
            }
        }

        async fn walk(&mut self, oid: &str) -> io::Result<Vec<(String, String)>> {
            Ok(vec![(format!("{oid}.1"), "up".to_string())])
        }
    }

    fn helper(logger: Arc<BufferLogger>) -> SnmpHelper {
        SnmpHelper::new(
            Arc::new(Mutex::new(TableSession)),
            SnmpCommunity::new("public", SnmpVersion::V2c),
            logger,
        )
    }

    #[tokio::test]
    async fn test_get_and_walk() {
        let logger = Arc::new(BufferLogger::new());
        let helper = helper(logger);
        assert_eq!(helper.get("1.3.6.1.2.1.1.5.0").await.unwrap(), "edge1");
        let rows = helper.walk("1.3.6.1.2.1.2.2").await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_logged() {
        let logger = Arc::new(BufferLogger::new());
        let helper = helper(logger.clone());
        assert!(helper.get("1.2.3").await.is_err());
        assert_eq!(logger.count_at(TaskLevel::Warn), 1);
    }
}
