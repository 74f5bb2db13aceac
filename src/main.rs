//! `powerhintd` entrypoint: CLI parsing, logging, composition, exit policy.

use std::process::{self, ExitCode};
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use power_hint_daemon::cli_app::{Cli, Command};
use power_hint_daemon::core::selector;
use power_hint_daemon::daemon::{bootstrap, signals};
use power_hint_daemon::hints::manager::HintManager;
use power_hint_daemon::monitor::ProfileMonitor;
use power_hint_daemon::platform::properties::{InMemoryPropertyStore, PropertyStore};
use power_hint_daemon::platform::registry::{LocalRegistry, ServeOutcome};
use power_hint_daemon::platform::shutdown;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store: Arc<dyn PropertyStore> =
        Arc::new(InMemoryPropertyStore::seeded(cli.properties.clone()));

    match &cli.command {
        Command::Check => check(&cli, store.as_ref()),
        Command::Run => run(&cli, store),
    }
}

/// Resolve and load the hint configuration once, without serving.
fn check(cli: &Cli, store: &dyn PropertyStore) -> ExitCode {
    let path = selector::resolve_path(cli.select.into(), store, &cli.config_dir);
    match HintManager::load(&path, false) {
        Ok(manager) => {
            info!(
                path = %path.display(),
                adpf = manager.is_extended_profile_enabled(),
                "hint config ok"
            );
            println!("ok: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, store: Arc<dyn PropertyStore>) -> ExitCode {
    let (handle, token) = shutdown::shutdown_pair();
    let handle = Arc::new(handle);
    if let Err(err) = signals::install(Arc::clone(&handle)) {
        error!(%err, "failed to install signal handlers");
        return ExitCode::FAILURE;
    }

    let monitor = Arc::new(ProfileMonitor::new(Arc::clone(&store), token.clone()));
    let deps = bootstrap::Deps {
        store,
        registry: Arc::new(LocalRegistry::new()),
        monitor,
        selection: cli.select.into(),
        config_dir: cli.config_dir.clone(),
    };

    match bootstrap::run(&deps, &token) {
        // Bootstrap-phase failure: die abnormally, a half-initialized daemon
        // is strictly worse than a clean restart by the supervisor.
        Err(err) => {
            error!("{err}");
            process::abort();
        }
        Ok(ServeOutcome::Shutdown) => ExitCode::SUCCESS,
        Ok(ServeOutcome::Disconnected) => {
            error!("request dispatch loop returned, exiting for supervisor restart");
            ExitCode::FAILURE
        }
    }
}
