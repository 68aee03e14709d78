//! Run-visible log sink.
//!
//! The dispatcher and the helpers write progress and failure messages to a
//! [`TaskLogger`], which the caller owns. The driver behavior receives the
//! same sink through its invocation arguments, so everything a run produces
//! ends up in one place.

use std::fmt;
use std::sync::Mutex;

/// Severity of a task log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TaskLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for TaskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskLevel::Trace => "TRACE",
            TaskLevel::Debug => "DEBUG",
            TaskLevel::Info => "INFO",
            TaskLevel::Warn => "WARN",
            TaskLevel::Error => "ERROR",
        };
        write!(f, "{name}")
    }
}

/// Sink for messages produced during a diagnostic run.
pub trait TaskLogger: Send + Sync {
    /// Record a message at the given level.
    fn log(&self, level: TaskLevel, message: &str);

    fn trace(&self, message: &str) {
        self.log(TaskLevel::Trace, message);
    }

    fn debug(&self, message: &str) {
        self.log(TaskLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(TaskLevel::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(TaskLevel::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(TaskLevel::Error, message);
    }
}

/// Task logger forwarding to the `log` facade under the `netdiag::task`
/// target.
#[derive(Debug, Default)]
pub struct FacadeLogger;

impl TaskLogger for FacadeLogger {
    fn log(&self, level: TaskLevel, message: &str) {
        let level = match level {
            TaskLevel::Trace => log::Level::Trace,
            TaskLevel::Debug => log::Level::Debug,
            TaskLevel::Info => log::Level::Info,
            TaskLevel::Warn => log::Level::Warn,
            TaskLevel::Error => log::Level::Error,
        };
        log::log!(target: "netdiag::task", level, "{message}");
    }
}

/// Task logger collecting entries in memory.
///
/// Useful for attaching a run's log to a task record, and for asserting on
/// logged output in tests.
#[derive(Debug, Default)]
pub struct BufferLogger {
    entries: Mutex<Vec<(TaskLevel, String)>>,
}

impl BufferLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All collected entries, in order.
    pub fn entries(&self) -> Vec<(TaskLevel, String)> {
        self.entries.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Number of entries at exactly `level`.
    pub fn count_at(&self, level: TaskLevel) -> usize {
        self.entries()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }
}

impl TaskLogger for BufferLogger {
    fn log(&self, level: TaskLevel, message: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push((level, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_logger_collects_in_order() {
        let logger = BufferLogger::new();
        logger.info("first");
        logger.error("second");

        let entries = logger.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (TaskLevel::Info, "first".to_string()));
        assert_eq!(entries[1], (TaskLevel::Error, "second".to_string()));
    }

    #[test]
    fn test_count_at_level() {
        let logger = BufferLogger::new();
        logger.warn("a");
        logger.error("b");
        logger.error("c");

        assert_eq!(logger.count_at(TaskLevel::Warn), 1);
        assert_eq!(logger.count_at(TaskLevel::Error), 2);
        assert_eq!(logger.count_at(TaskLevel::Trace), 0);
    }
}
