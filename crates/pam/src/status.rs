//! Linux-PAM numeric constants used at the ABI boundary.

use std::ffi::c_int;

use dsba_common::hooks::HookStatus;

pub const PAM_SUCCESS: c_int = 0;
pub const PAM_SERVICE_ERR: c_int = 3;
pub const PAM_SESSION_ERR: c_int = 14;
pub const PAM_IGNORE: c_int = 25;

/// Host flag bit requesting that the module not emit messages.
pub const PAM_SILENT: c_int = 0x8000;

pub fn to_pam(status: HookStatus) -> c_int {
    match status {
        HookStatus::Success => PAM_SUCCESS,
        HookStatus::SessionError => PAM_SESSION_ERR,
        HookStatus::ServiceError => PAM_SERVICE_ERR,
        HookStatus::Ignore => PAM_IGNORE,
    }
}

pub fn is_silent(flags: c_int) -> bool {
    flags & PAM_SILENT == PAM_SILENT
}
