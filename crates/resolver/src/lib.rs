//! Session bus address resolution.
//!
//! Given the session's `XDG_RUNTIME_DIR`, derive
//! `DBUS_SESSION_BUS_ADDRESS=unix:path=<dir>/bus` and reconcile it against any
//! value already present in the session, under the caller's policy flags.

pub mod address;
pub mod decision;
pub mod error;
pub mod policy;
pub mod report;
pub mod resolver;

pub use {
    address::CandidateAddress,
    decision::Decision,
    error::{ResolveError, Result},
    policy::{ModuleArg, PolicyFlags},
    resolver::{Outcome, Resolution, SessionAddressResolver, open_session},
};
