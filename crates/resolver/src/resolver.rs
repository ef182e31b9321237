//! The session-open decision procedure.
//!
//! [`SessionAddressResolver::resolve`] is pure: it sees the runtime directory
//! and the existing value and says what should happen.
//! [`SessionAddressResolver::apply`] reads both from a store, resolves, and
//! then carries the [`Resolution`] out: it logs, and writes at most one entry.

use {
    dsba_common::{env::EnvStore, hooks::HookStatus, log::SessionLog},
    serde::Serialize,
    tracing::debug,
};

use crate::{
    address::{BUS_ADDRESS_VAR, CandidateAddress, RUNTIME_DIR_VAR},
    decision::Decision,
    error::ResolveError,
    policy::PolicyFlags,
    report::Reporter,
};

/// What [`SessionAddressResolver::resolve`] concluded, before any side effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The session already holds the derived value.
    AlreadyCorrect(CandidateAddress),
    /// Write the candidate, replacing `previous` when it is set.
    Assign {
        candidate: CandidateAddress,
        previous: Option<Vec<u8>>,
    },
    Rejected(ResolveError),
}

impl Resolution {
    /// `Assign` here means a write is warranted; whether it succeeds is only
    /// known once the resolution is applied.
    pub fn decision(&self) -> Decision {
        match self {
            Self::AlreadyCorrect(_) => Decision::NoopAlreadyCorrect,
            Self::Assign { .. } => Decision::Assign,
            Self::Rejected(err) => Decision::from(err),
        }
    }

    pub fn candidate(&self) -> Option<&CandidateAddress> {
        match self {
            Self::AlreadyCorrect(candidate) | Self::Assign { candidate, .. } => Some(candidate),
            Self::Rejected(_) => None,
        }
    }
}

/// Result of a complete open-session run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub decision: Decision,
    pub status: HookStatus,
    /// The entry now present in the session, when the run succeeded.
    pub entry: Option<String>,
}

impl Outcome {
    fn new(decision: Decision, entry: Option<CandidateAddress>) -> Self {
        Self {
            decision,
            status: decision.status(),
            entry: entry.map(|c| String::from_utf8_lossy(&c.into_entry()).into_owned()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAddressResolver {
    flags: PolicyFlags,
}

impl SessionAddressResolver {
    pub fn new(flags: PolicyFlags) -> Self {
        Self { flags }
    }

    /// Decide without touching any store or log. An empty `existing` counts
    /// as unset.
    pub fn resolve(&self, runtime_dir: Option<&[u8]>, existing: Option<&[u8]>) -> Resolution {
        let candidate = match CandidateAddress::from_runtime_dir(runtime_dir) {
            Ok(candidate) => candidate,
            Err(err) => return Resolution::Rejected(err),
        };

        match existing.filter(|v| !v.is_empty()) {
            None => Resolution::Assign {
                candidate,
                previous: None,
            },
            Some(current) if candidate.matches(current) => Resolution::AlreadyCorrect(candidate),
            Some(current) if self.flags.override_existing => Resolution::Assign {
                candidate,
                previous: Some(current.to_vec()),
            },
            Some(current) => {
                Resolution::Rejected(ResolveError::conflict(String::from_utf8_lossy(current)))
            },
        }
    }

    /// Resolve against `store` and carry the result out, logging through `log`
    /// under this resolver's policy flags.
    pub fn apply(&self, store: &mut dyn EnvStore, log: &dyn SessionLog) -> Outcome {
        let report = Reporter::new(log, &self.flags);
        let runtime_dir = store.get(RUNTIME_DIR_VAR);
        let existing = store.get(BUS_ADDRESS_VAR);

        let resolution = self.resolve(runtime_dir.as_deref(), existing.as_deref());
        debug!(
            decision = %resolution.decision(),
            candidate = ?resolution.candidate().map(ToString::to_string),
            "session address resolved"
        );

        let outcome = match resolution {
            Resolution::AlreadyCorrect(candidate) => {
                report.info(format_args!(
                    "{BUS_ADDRESS_VAR} is already set to the correct value: {}",
                    String::from_utf8_lossy(candidate.value())
                ));
                Outcome::new(Decision::NoopAlreadyCorrect, Some(candidate))
            },
            Resolution::Assign {
                candidate,
                previous,
            } => {
                if let Some(previous) = previous {
                    report.info(format_args!(
                        "Overriding current {BUS_ADDRESS_VAR} value: {}",
                        String::from_utf8_lossy(&previous)
                    ));
                }
                report.info(format_args!("Assigning {candidate}"));
                match store.put(candidate.entry()) {
                    Ok(()) => Outcome::new(Decision::Assign, Some(candidate)),
                    Err(e) => {
                        let err = ResolveError::store_write(&e);
                        report.error(&err);
                        Outcome::new(Decision::from(&err), None)
                    },
                }
            },
            Resolution::Rejected(err) => {
                report.error(&err);
                Outcome::new(Decision::from(&err), None)
            },
        };

        debug!(decision = %outcome.decision, status = ?outcome.status, "session address applied");
        outcome
    }
}

/// Run the session-open hook: parse `args`, then resolve and apply against
/// `store`.
///
/// `silent` is the host's request for silence. Unknown arguments are logged
/// regardless of it.
pub fn open_session<S: AsRef<str>>(
    args: &[S],
    silent: bool,
    store: &mut dyn EnvStore,
    log: &dyn SessionLog,
) -> Outcome {
    let flags = PolicyFlags::from_module_args(silent, args, log);
    SessionAddressResolver::new(flags).apply(store, log)
}
