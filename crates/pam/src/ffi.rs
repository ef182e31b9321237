//! Raw Linux-PAM bindings.
//!
//! Only the handful of `libpam` functions this module calls. The handle is
//! opaque; it is only ever passed back to `libpam`.

use std::ffi::{c_char, c_int};

/// Opaque `pam_handle_t`.
#[repr(C)]
pub struct PamHandle {
    _private: [u8; 0],
}

/// syslog priorities passed to `pam_syslog`.
pub const LOG_ERR: c_int = 3;
pub const LOG_INFO: c_int = 6;

#[cfg_attr(feature = "link-libpam", link(name = "pam"))]
unsafe extern "C" {
    pub fn pam_getenv(pamh: *mut PamHandle, name: *const c_char) -> *const c_char;

    pub fn pam_putenv(pamh: *mut PamHandle, name_value: *const c_char) -> c_int;

    pub fn pam_strerror(pamh: *mut PamHandle, errnum: c_int) -> *const c_char;

    pub fn pam_syslog(pamh: *const PamHandle, priority: c_int, fmt: *const c_char, ...);
}
