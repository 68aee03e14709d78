//! Live transport session interfaces.
//!
//! The actual Telnet/SSH and SNMP transports live outside this crate. A run
//! borrows whichever sessions the caller lends through a [`SessionSet`]; the
//! dispatcher never opens or closes them.

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

/// A live command-line session (Telnet or SSH).
#[async_trait]
pub trait CliSession: Send {
    /// Send a command and return the resulting output.
    async fn send_command(&mut self, command: &str) -> io::Result<String>;
}

/// A live SNMP session.
#[async_trait]
pub trait SnmpSession: Send {
    /// Get a single OID value.
    async fn get(&mut self, oid: &str) -> io::Result<String>;

    /// Walk a subtree, returning (OID, value) pairs.
    async fn walk(&mut self, oid: &str) -> io::Result<Vec<(String, String)>>;
}

/// The sessions lent to a diagnostic run.
///
/// Shared handles, so a run can expose the same session to more than one
/// helper. Cloning clones the handles, not the sessions.
#[derive(Clone, Default)]
pub struct SessionSet {
    pub cli: Option<Arc<Mutex<dyn CliSession>>>,
    pub snmp: Option<Arc<Mutex<dyn SnmpSession>>>,
}

impl SessionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cli(mut self, session: Arc<Mutex<dyn CliSession>>) -> Self {
        self.cli = Some(session);
        self
    }

    pub fn with_snmp(mut self, session: Arc<Mutex<dyn SnmpSession>>) -> Self {
        self.snmp = Some(session);
        self
    }
}
