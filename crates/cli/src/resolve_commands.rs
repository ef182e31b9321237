//! CLI commands that run the session-open decision against an in-memory session.

use std::ffi::OsString;

use {
    clap::Args,
    dsba_common::{env::MemoryEnvStore, log::TracingLog},
    dsba_resolver::{
        ModuleArg, Outcome,
        address::{BUS_ADDRESS_VAR, RUNTIME_DIR_VAR},
        open_session,
    },
};

#[derive(Args, Debug, Clone, Default)]
pub struct ResolveArgs {
    /// Runtime directory of the simulated session.
    #[arg(long, env = "XDG_RUNTIME_DIR")]
    pub runtime_dir: Option<OsString>,
    /// Bus address already present in the simulated session.
    #[arg(long, env = "DBUS_SESSION_BUS_ADDRESS")]
    pub existing: Option<OsString>,
    /// Same as the `quiet` module argument.
    #[arg(long)]
    pub quiet: bool,
    /// Same as the `override` module argument.
    #[arg(long = "override")]
    pub override_existing: bool,
    /// Simulate the host's silence flag.
    #[arg(long)]
    pub silent: bool,
    /// Raw module argument, exactly as written in a PAM service file. Repeatable.
    #[arg(long = "arg", value_name = "TOKEN")]
    pub module_args: Vec<String>,
    /// Make the simulated environment refuse writes with this message.
    #[arg(long, value_name = "MESSAGE")]
    pub fail_write: Option<String>,
}

impl ResolveArgs {
    /// Module argument list equivalent to these flags.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.module_args.len() + 2);
        if self.quiet {
            tokens.push(ModuleArg::Quiet.token().to_owned());
        }
        if self.override_existing {
            tokens.push(ModuleArg::Override.token().to_owned());
        }
        tokens.extend(self.module_args.iter().cloned());
        tokens
    }

    pub fn session(&self) -> MemoryEnvStore {
        let mut store = MemoryEnvStore::new();
        if let Some(dir) = &self.runtime_dir {
            store.set(RUNTIME_DIR_VAR, dir.as_encoded_bytes());
        }
        if let Some(existing) = &self.existing {
            store.set(BUS_ADDRESS_VAR, existing.as_encoded_bytes());
        }
        if let Some(message) = &self.fail_write {
            store = store.with_failing_writes(message.as_str());
        }
        store
    }

    pub fn run(&self) -> Outcome {
        let mut store = self.session();
        open_session(&self.tokens(), self.silent, &mut store, &TracingLog)
    }
}

pub fn handle_resolve(args: &ResolveArgs, json: bool) -> anyhow::Result<bool> {
    let outcome = args.run();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("Decision: {}", outcome.decision);
        println!("Status:   {:?}", outcome.status);
        if let Some(entry) = &outcome.entry {
            println!("Entry:    {entry}");
        }
    }

    Ok(outcome.status.is_success())
}

pub fn handle_export(args: &ResolveArgs) -> bool {
    let outcome = args.run();
    match &outcome.entry {
        Some(entry) if outcome.status.is_success() => {
            println!("{entry}");
            true
        },
        _ => false,
    }
}
