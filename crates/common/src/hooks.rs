//! Lifecycle phases and the table that routes them.
//!
//! The host calls one entry point per lifecycle phase. Only session open does
//! real work; session close is acknowledged and ignored; every other phase is
//! answered from the same "not provided" row of [`PHASE_TABLE`] so the host can
//! tell a misconfigured stack apart from a failed session.

use std::fmt;

use {serde::Serialize, tracing::debug};

use crate::log::{LogLevel, SessionLog};

// ── LifecyclePhase ──────────────────────────────────────────────────────────

/// Lifecycle phases the host can invoke a module for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    OpenSession,
    CloseSession,
    Authenticate,
    SetCredentials,
    AccountManagement,
    ChangeAuthToken,
}

impl LifecyclePhase {
    /// All variants, for iteration.
    pub const ALL: &'static [LifecyclePhase] = &[
        Self::OpenSession,
        Self::CloseSession,
        Self::Authenticate,
        Self::SetCredentials,
        Self::AccountManagement,
        Self::ChangeAuthToken,
    ];

    /// The name the host uses for this phase, as in `pam_sm_<name>`.
    pub fn host_name(&self) -> &'static str {
        match self {
            Self::OpenSession => "open_session",
            Self::CloseSession => "close_session",
            Self::Authenticate => "authenticate",
            Self::SetCredentials => "setcred",
            Self::AccountManagement => "acct_mgmt",
            Self::ChangeAuthToken => "chauthtok",
        }
    }

    /// Exported symbol name of the entry point for this phase.
    pub fn entry_point(&self) -> String {
        format!("pam_sm_{}", self.host_name())
    }

    /// How this module answers the phase.
    pub fn behavior(&self) -> PhaseBehavior {
        PHASE_TABLE
            .iter()
            .find(|(phase, _)| phase == self)
            .map_or(PhaseBehavior::Unsupported, |(_, behavior)| *behavior)
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host_name())
    }
}

// ── HookStatus ──────────────────────────────────────────────────────────────

/// Result reported back to the host for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStatus {
    Success,
    /// The session could not be set up as requested.
    SessionError,
    /// The module was asked to do something it does not provide.
    ServiceError,
    /// The module takes no position; the host should disregard this result.
    Ignore,
}

impl HookStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

// ── Phase table ─────────────────────────────────────────────────────────────

/// What the module does when the host calls a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseBehavior {
    /// Run the session handler and report its status.
    Handle,
    /// Report [`HookStatus::Ignore`] without doing anything.
    Ignore,
    /// Log that the phase is not provided and report [`HookStatus::ServiceError`].
    Unsupported,
}

pub const PHASE_TABLE: &[(LifecyclePhase, PhaseBehavior)] = &[
    (LifecyclePhase::OpenSession, PhaseBehavior::Handle),
    (LifecyclePhase::CloseSession, PhaseBehavior::Ignore),
    (LifecyclePhase::Authenticate, PhaseBehavior::Unsupported),
    (LifecyclePhase::SetCredentials, PhaseBehavior::Unsupported),
    (LifecyclePhase::AccountManagement, PhaseBehavior::Unsupported),
    (LifecyclePhase::ChangeAuthToken, PhaseBehavior::Unsupported),
];

/// Route one host invocation through [`PHASE_TABLE`].
///
/// `handle` runs only for [`PhaseBehavior::Handle`] phases. The "not provided"
/// line is logged regardless of any silence the caller requested, since it
/// points at a misconfigured host rather than a runtime condition.
pub fn dispatch<F>(phase: LifecyclePhase, log: &dyn SessionLog, handle: F) -> HookStatus
where
    F: FnOnce() -> HookStatus,
{
    let behavior = phase.behavior();
    debug!(phase = %phase, ?behavior, "dispatching lifecycle phase");

    match behavior {
        PhaseBehavior::Handle => handle(),
        PhaseBehavior::Ignore => HookStatus::Ignore,
        PhaseBehavior::Unsupported => {
            log.emit(
                LogLevel::Error,
                &format!("Module does not provide '{phase}' function"),
            );
            HookStatus::ServiceError
        },
    }
}
