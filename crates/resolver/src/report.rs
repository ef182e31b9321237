//! Audit reporting under the silent/quiet policy.

use dsba_common::log::{LogLevel, SessionLog};

use crate::policy::PolicyFlags;

/// Wraps a [`SessionLog`] and drops lines the policy flags suppress.
///
/// Error lines are dropped when `silent`; info lines when `silent` or `quiet`.
pub struct Reporter<'a> {
    sink: &'a dyn SessionLog,
    silent: bool,
    quiet: bool,
}

impl<'a> Reporter<'a> {
    pub fn new(sink: &'a dyn SessionLog, flags: &PolicyFlags) -> Self {
        Self {
            sink,
            silent: flags.silent,
            quiet: flags.quiet,
        }
    }

    pub fn error(&self, message: impl std::fmt::Display) {
        if !self.silent {
            self.sink.emit(LogLevel::Error, &message.to_string());
        }
    }

    pub fn info(&self, message: impl std::fmt::Display) {
        if !self.silent && !self.quiet {
            self.sink.emit(LogLevel::Info, &message.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, dsba_common::log::MemoryLog, rstest::rstest};

    #[rstest]
    #[case(false, false, 1, 1)]
    #[case(false, true, 1, 0)]
    #[case(true, false, 0, 0)]
    #[case(true, true, 0, 0)]
    fn suppression(
        #[case] silent: bool,
        #[case] quiet: bool,
        #[case] errors: usize,
        #[case] infos: usize,
    ) {
        let log = MemoryLog::new();
        let flags = PolicyFlags {
            silent,
            quiet,
            override_existing: false,
        };
        let reporter = Reporter::new(&log, &flags);

        reporter.error("boom");
        reporter.info("hello");

        assert_eq!(log.messages(LogLevel::Error).len(), errors);
        assert_eq!(log.messages(LogLevel::Info).len(), infos);
    }
}
