//! Host-independent glue between an entry point and the resolver.

use std::{
    ffi::c_int,
    panic::{AssertUnwindSafe, catch_unwind},
};

use {
    dsba_common::{
        env::EnvStore,
        hooks::{self, HookStatus, LifecyclePhase},
        log::SessionLog,
    },
    dsba_resolver::open_session,
    tracing::debug,
};

use crate::status::{self, PAM_SERVICE_ERR, PAM_SESSION_ERR};

/// Route one host call through the phase table and translate the result.
pub fn run_phase(
    phase: LifecyclePhase,
    flags: c_int,
    args: &[String],
    store: &mut dyn EnvStore,
    log: &dyn SessionLog,
) -> c_int {
    let result = hooks::dispatch(phase, log, || {
        open_session(args, status::is_silent(flags), store, log).status
    });
    debug!(phase = %phase, status = ?result, "lifecycle phase finished");
    status::to_pam(result)
}

/// Run `work` so that no panic unwinds into the host.
///
/// A panic is reported as the failure status of the phase: a session error on
/// open, a service error everywhere else.
pub fn with_ffi_boundary<F>(phase: LifecyclePhase, work: F) -> c_int
where
    F: FnOnce() -> c_int,
{
    match catch_unwind(AssertUnwindSafe(work)) {
        Ok(code) => code,
        Err(_) => match phase {
            LifecyclePhase::OpenSession => PAM_SESSION_ERR,
            _ => PAM_SERVICE_ERR,
        },
    }
}

/// Status for a call that arrived without a usable PAM handle.
pub fn missing_handle(phase: LifecyclePhase) -> c_int {
    match phase.behavior() {
        hooks::PhaseBehavior::Ignore => status::to_pam(HookStatus::Ignore),
        _ => PAM_SERVICE_ERR,
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::status::{PAM_IGNORE, PAM_SILENT, PAM_SUCCESS},
        dsba_common::{
            env::MemoryEnvStore,
            log::{LogLevel, MemoryLog},
        },
        rstest::rstest,
    };

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| (*t).to_owned()).collect()
    }

    fn session() -> MemoryEnvStore {
        MemoryEnvStore::new().with_var("XDG_RUNTIME_DIR", "/run/user/1000")
    }

    #[test]
    fn open_session_assigns() {
        let mut store = session();
        let log = MemoryLog::new();

        let code = run_phase(LifecyclePhase::OpenSession, 0, &[], &mut store, &log);

        assert_eq!(code, PAM_SUCCESS);
        assert_eq!(
            store.get("DBUS_SESSION_BUS_ADDRESS").as_deref(),
            Some(b"unix:path=/run/user/1000/bus".as_slice())
        );
    }

    #[test]
    fn silent_flag_reaches_resolver() {
        let mut store = MemoryEnvStore::new();
        let log = MemoryLog::new();

        let code = run_phase(
            LifecyclePhase::OpenSession,
            PAM_SILENT,
            &args(&["bogus"]),
            &mut store,
            &log,
        );

        assert_eq!(code, PAM_SESSION_ERR);
        // Only the configuration error survives silence.
        assert_eq!(
            log.lines(),
            vec![(LogLevel::Error, "Unknown option: bogus".to_owned())]
        );
    }

    #[test]
    fn close_session_is_ignored() {
        let mut store = session();
        let log = MemoryLog::new();

        let code = run_phase(
            LifecyclePhase::CloseSession,
            0,
            &args(&["override"]),
            &mut store,
            &log,
        );

        assert_eq!(code, PAM_IGNORE);
        assert_eq!(store.writes(), 0);
        assert!(log.is_empty());
    }

    #[rstest]
    #[case(LifecyclePhase::Authenticate)]
    #[case(LifecyclePhase::SetCredentials)]
    #[case(LifecyclePhase::AccountManagement)]
    #[case(LifecyclePhase::ChangeAuthToken)]
    fn unsupported_phases_are_service_errors_even_when_silent(#[case] phase: LifecyclePhase) {
        let mut store = session();
        let log = MemoryLog::new();

        let code = run_phase(phase, PAM_SILENT, &[], &mut store, &log);

        assert_eq!(code, PAM_SERVICE_ERR);
        assert_eq!(store.writes(), 0);
        assert_eq!(
            log.messages(LogLevel::Error),
            vec![format!("Module does not provide '{phase}' function")]
        );
    }

    #[rstest]
    #[case(LifecyclePhase::OpenSession, PAM_SESSION_ERR)]
    #[case(LifecyclePhase::CloseSession, PAM_SERVICE_ERR)]
    #[case(LifecyclePhase::Authenticate, PAM_SERVICE_ERR)]
    fn panics_do_not_cross_the_boundary(#[case] phase: LifecyclePhase, #[case] code: c_int) {
        assert_eq!(with_ffi_boundary(phase, || panic!("boom")), code);
        assert_eq!(with_ffi_boundary(phase, || PAM_SUCCESS), PAM_SUCCESS);
    }

    #[rstest]
    #[case(LifecyclePhase::OpenSession, PAM_SERVICE_ERR)]
    #[case(LifecyclePhase::CloseSession, PAM_IGNORE)]
    #[case(LifecyclePhase::ChangeAuthToken, PAM_SERVICE_ERR)]
    fn missing_handle_status(#[case] phase: LifecyclePhase, #[case] code: c_int) {
        assert_eq!(missing_handle(phase), code);
    }
}
