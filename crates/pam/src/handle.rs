//! [`EnvStore`] and [`SessionLog`] over a live PAM handle.

use std::ffi::{CStr, CString, c_int};

use dsba_common::{
    Error, Result,
    env::EnvStore,
    log::{LogLevel, SessionLog},
};

use crate::{
    ffi::{self, LOG_ERR, LOG_INFO, PamHandle},
    status::PAM_SUCCESS,
};

/// The session environment PAM keeps for this handle.
pub struct PamEnv {
    pamh: *mut PamHandle,
}

impl PamEnv {
    /// # Safety
    ///
    /// `pamh` must be a non-null handle the host passed to the current entry
    /// point, and the value must not outlive that call.
    pub unsafe fn new(pamh: *mut PamHandle) -> Self {
        Self { pamh }
    }

    fn describe(&self, code: c_int) -> String {
        // SAFETY: `pamh` is live for the call; `pam_strerror` accepts any code.
        let text = unsafe { ffi::pam_strerror(self.pamh, code) };
        if text.is_null() {
            return format!("PAM error {code}");
        }
        // SAFETY: non-null results point at static NUL-terminated strings.
        unsafe { CStr::from_ptr(text) }
            .to_string_lossy()
            .into_owned()
    }
}

impl EnvStore for PamEnv {
    fn get(&self, name: &str) -> Option<Vec<u8>> {
        let name = CString::new(name).ok()?;
        // SAFETY: `pamh` is live and `name` is NUL-terminated.
        let value = unsafe { ffi::pam_getenv(self.pamh, name.as_ptr()) };
        if value.is_null() {
            return None;
        }
        // SAFETY: PAM returns a NUL-terminated string that stays valid until
        // the environment is next modified; it is copied out immediately.
        let value = unsafe { CStr::from_ptr(value) };
        Some(value.to_bytes().to_vec())
    }

    fn put(&mut self, entry: &[u8]) -> Result<()> {
        let entry = CString::new(entry)
            .map_err(|_| Error::malformed_entry(String::from_utf8_lossy(entry)))?;
        // SAFETY: `pamh` is live and `entry` is NUL-terminated; PAM copies it.
        let code = unsafe { ffi::pam_putenv(self.pamh, entry.as_ptr()) };
        if code == PAM_SUCCESS {
            Ok(())
        } else {
            Err(Error::store(self.describe(code)))
        }
    }
}

/// Audit lines to syslog through `pam_syslog`.
pub struct PamSyslog {
    pamh: *const PamHandle,
}

impl PamSyslog {
    /// # Safety
    ///
    /// Same contract as [`PamEnv::new`].
    pub unsafe fn new(pamh: *const PamHandle) -> Self {
        Self { pamh }
    }
}

impl SessionLog for PamSyslog {
    fn emit(&self, level: LogLevel, message: &str) {
        let priority = match level {
            LogLevel::Error => LOG_ERR,
            LogLevel::Info => LOG_INFO,
        };
        let Ok(message) = CString::new(message.replace('\0', "")) else {
            return;
        };
        // SAFETY: `pamh` is live; the message is passed as the argument of a
        // literal "%s" so it is never interpreted as a format string.
        unsafe { ffi::pam_syslog(self.pamh, priority, c"%s".as_ptr(), message.as_ptr()) };
    }
}
