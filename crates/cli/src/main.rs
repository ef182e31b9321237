mod phases_commands;
mod resolve_commands;

use {
    clap::{Parser, Subcommand},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "dsba",
    about = "dsba: dry-run the session bus address hook outside PAM"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the session-open decision and print it.
    Resolve {
        #[command(flatten)]
        input: resolve_commands::ResolveArgs,
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the resulting `DBUS_SESSION_BUS_ADDRESS=...` entry, for `eval`.
    Export {
        #[command(flatten)]
        input: resolve_commands::ResolveArgs,
    },
    /// List lifecycle phases and how the module answers them.
    Phases {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Initialise tracing. Logs go to stderr so `export` output stays clean.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_telemetry(&cli);

    let success = match cli.command {
        Commands::Resolve { input, json } => resolve_commands::handle_resolve(&input, json)?,
        Commands::Export { input } => resolve_commands::handle_export(&input),
        Commands::Phases { json } => {
            phases_commands::handle_phases(json)?;
            true
        },
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}
