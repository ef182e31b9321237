//! Policy flags and module argument parsing.

use std::str::FromStr;

use dsba_common::log::{LogLevel, SessionLog};

/// Caller-supplied toggles. They change logging and conflict handling, never
/// the derived value itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyFlags {
    /// Suppress all logging except configuration errors.
    pub silent: bool,
    /// Suppress informational logging.
    pub quiet: bool,
    /// Replace an existing value that differs from the derived one.
    pub override_existing: bool,
}

impl PolicyFlags {
    /// Build flags from the host's silence bit and the module argument list.
    ///
    /// Unknown tokens are logged at error level even when `silent` is set.
    pub fn from_module_args<S: AsRef<str>>(
        silent: bool,
        args: &[S],
        log: &dyn SessionLog,
    ) -> Self {
        let mut flags = Self {
            silent,
            ..Self::default()
        };

        for token in args.iter().map(AsRef::as_ref) {
            match token.parse::<ModuleArg>() {
                Ok(arg) => flags.apply(arg),
                Err(UnknownArg(token)) => {
                    log.emit(LogLevel::Error, &format!("Unknown option: {token}"));
                },
            }
        }

        flags
    }

    pub fn apply(&mut self, arg: ModuleArg) {
        match arg {
            ModuleArg::Quiet => self.quiet = true,
            ModuleArg::Override => self.override_existing = true,
        }
    }
}

/// Recognized module argument tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleArg {
    Quiet,
    Override,
}

impl ModuleArg {
    pub fn token(&self) -> &'static str {
        match self {
            Self::Quiet => "quiet",
            Self::Override => "override",
        }
    }
}

/// A module argument that is not one of [`ModuleArg`]'s tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownArg(pub String);

impl FromStr for ModuleArg {
    type Err = UnknownArg;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quiet" => Ok(Self::Quiet),
            "override" => Ok(Self::Override),
            other => Err(UnknownArg(other.to_owned())),
        }
    }
}
