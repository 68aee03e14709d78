//! Command-line helper.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::credentials::CliAccount;
use crate::runtime::RuntimeFailure;
use crate::session::CliSession;
use crate::tasklog::TaskLogger;

/// Exposes a live CLI session and its account to the driver behavior.
#[derive(Clone)]
pub struct CliHelper {
    session: Arc<Mutex<dyn CliSession>>,
    account: CliAccount,
    logger: Arc<dyn TaskLogger>,
    trace_commands: bool,
}

impl CliHelper {
    pub fn new(
        session: Arc<Mutex<dyn CliSession>>,
        account: CliAccount,
        logger: Arc<dyn TaskLogger>,
        trace_commands: bool,
    ) -> Self {
        Self {
            session,
            account,
            logger,
            trace_commands,
        }
    }

    pub fn username(&self) -> &str {
        self.account.username()
    }

    pub fn password(&self) -> &str {
        self.account.password()
    }

    pub fn super_password(&self) -> Option<&str> {
        self.account.super_password()
    }

    /// Send a command over the borrowed session and return its output.
    pub async fn send(&self, command: &str) -> Result<String, RuntimeFailure> {
        if self.trace_commands {
            self.logger.trace(&format!("CLI> {command}"));
        }
        let mut session = self.session.lock().await;
        session
            .send_command(command)
            .await
            .map_err(|e| RuntimeFailure::other(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use async_trait::async_trait;

    use super::*;
    use crate::tasklog::{BufferLogger, TaskLevel};

    struct EchoSession;

    #[async_trait]
    impl CliSession for EchoSession {
        async fn send_command(&mut self, command: &str) -> io::Result<String> {
            Ok(format!("ran: {command}"))
        }
    }

    #[tokio::test]
    async fn test_send_returns_session_output() {
        let logger = Arc::new(BufferLogger::new());
        let helper = CliHelper::new(
            Arc::new(Mutex::new(EchoSession)),
            CliAccount::new("admin", "secret"),
            logger.clone(),
            false,
        );
        let output = helper.send("show version").await.unwrap();
        assert_eq!(output, "ran: show version");
        assert_eq!(logger.count_at(TaskLevel::Trace), 0);
    }

    #[tokio::test]
    async fn test_send_traces_when_enabled() {
        let logger = Arc::new(BufferLogger::new());
        let helper = CliHelper::new(
            Arc::new(Mutex::new(EchoSession)),
            CliAccount::new("admin", "secret"),
            logger.clone(),
            true,
        );
        helper.send("show version").await.unwrap();
        assert_eq!(logger.count_at(TaskLevel::Trace), 1);
    }
}
