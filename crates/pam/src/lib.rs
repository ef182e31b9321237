//! `pam_dsba.so`: publish `DBUS_SESSION_BUS_ADDRESS` into a new PAM session.
//!
//! ```text
//! session optional pam_dsba.so [quiet] [override]
//! ```
//!
//! On session open the module derives `unix:path=$XDG_RUNTIME_DIR/bus` and
//! either leaves a matching value alone, writes it, or refuses to replace a
//! different one unless `override` is given. Session close is ignored. The
//! auth, credential, account and password phases are not provided and always
//! answer with a service error.
//!
//! The raw bindings and exported entry points are left out of test builds so
//! the unit tests never need `libpam`.

#![allow(unsafe_code)]

mod args;
mod session;
mod status;

#[cfg(not(test))]
pub mod ffi;
#[cfg(not(test))]
mod handle;

#[cfg(not(test))]
pub mod exports {
    use std::ffi::{c_char, c_int};

    use dsba_common::hooks::LifecyclePhase;

    use crate::{
        args::decode_args,
        ffi::PamHandle,
        handle::{PamEnv, PamSyslog},
        session::{missing_handle, run_phase, with_ffi_boundary},
    };

    /// # Safety
    ///
    /// Called by the host with a live handle and `argc` valid entries in `argv`.
    unsafe fn enter(
        phase: LifecyclePhase,
        pamh: *mut PamHandle,
        flags: c_int,
        argc: c_int,
        argv: *const *const c_char,
    ) -> c_int {
        tracing::debug!(target: "pam_dsba", phase = %phase, "ffi call");

        if pamh.is_null() {
            return missing_handle(phase);
        }

        with_ffi_boundary(phase, || {
            // SAFETY: the host contract covers `argc`/`argv` and `pamh` for the
            // duration of this call; none of these values escape it.
            let (args, mut env, log) = unsafe {
                (
                    decode_args(argc, argv),
                    PamEnv::new(pamh),
                    PamSyslog::new(pamh),
                )
            };
            run_phase(phase, flags, &args, &mut env, &log)
        })
    }

    macro_rules! entry_point {
        ($name:ident, $phase:expr) => {
            /// # Safety
            ///
            /// Only the PAM library may call this, with a handle for the
            /// current transaction and `argc` valid entries in `argv`.
            #[unsafe(no_mangle)]
            pub unsafe extern "C" fn $name(
                pamh: *mut PamHandle,
                flags: c_int,
                argc: c_int,
                argv: *const *const c_char,
            ) -> c_int {
                // SAFETY: forwarded verbatim from the host.
                unsafe { enter($phase, pamh, flags, argc, argv) }
            }
        };
    }

    entry_point!(pam_sm_open_session, LifecyclePhase::OpenSession);
    entry_point!(pam_sm_close_session, LifecyclePhase::CloseSession);
    entry_point!(pam_sm_authenticate, LifecyclePhase::Authenticate);
    entry_point!(pam_sm_setcred, LifecyclePhase::SetCredentials);
    entry_point!(pam_sm_acct_mgmt, LifecyclePhase::AccountManagement);
    entry_point!(pam_sm_chauthtok, LifecyclePhase::ChangeAuthToken);
}
