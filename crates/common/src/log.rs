//! Audit-log seam.
//!
//! Every decision the session hook makes is reported as a single line through
//! a [`SessionLog`] sink. Inside the PAM stack the sink is syslog; elsewhere it
//! is [`TracingLog`] or, in tests, [`MemoryLog`].

use std::sync::Mutex;

/// Severity of an audit line. Only two levels are ever emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Error,
    Info,
}

/// Destination for audit lines.
pub trait SessionLog {
    fn emit(&self, level: LogLevel, message: &str);
}

// ── TracingLog ──────────────────────────────────────────────────────────────

/// Forwards audit lines to `tracing` under the `dsba::audit` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl SessionLog for TracingLog {
    fn emit(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => tracing::error!(target: "dsba::audit", "{message}"),
            LogLevel::Info => tracing::info!(target: "dsba::audit", "{message}"),
        }
    }
}

// ── MemoryLog ───────────────────────────────────────────────────────────────

/// Records audit lines in order of emission.
#[derive(Debug, Default)]
pub struct MemoryLog {
    lines: Mutex<Vec<(LogLevel, String)>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn lines(&self) -> Vec<(LogLevel, String)> {
        self.lines.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Messages emitted at `level`, in order.
    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_empty()
    }
}

impl SessionLog for MemoryLog {
    fn emit(&self, level: LogLevel, message: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((level, message.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_log_keeps_order_and_levels() {
        let log = MemoryLog::new();
        assert!(log.is_empty());

        log.emit(LogLevel::Info, "first");
        log.emit(LogLevel::Error, "second");
        log.emit(LogLevel::Info, "third");

        assert_eq!(log.lines().len(), 3);
        assert_eq!(log.messages(LogLevel::Info), vec!["first", "third"]);
        assert_eq!(log.messages(LogLevel::Error), vec!["second"]);
    }
}
