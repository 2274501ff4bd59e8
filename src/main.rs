//! Entry point: resolve CLI flags and persisted preferences, locate or
//! inject a backend client, and either dump JSON (`--output json`) or start
//! the interactive runtime.

use std::process::ExitCode;
use std::sync::Arc;

use abacus::app::Runtime;
use abacus::cli::{Cli, OutputFormat};
use abacus::config::{self, PersistedConfig};
use abacus::eventcore::{AbacusApp, AppConfig};
use abacus::store::{locate_database, BackendClient, SubprocessClient};
use tracing::{error, info};

#[cfg(feature = "sqlite")]
use abacus::store::SqliteClient;

fn init_logging(verbose: u8, log_file: Option<&std::path::Path>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let default_path = dirs::config_dir().unwrap_or_else(std::env::temp_dir).join("abacus").join("abacus.log");
    let log_path = log_file.map(std::path::PathBuf::from).unwrap_or(default_path);
    let log_dir = log_path.parent()?.to_path_buf();
    let file_name = log_path.file_name()?.to_owned();
    std::fs::create_dir_all(&log_dir).ok()?;
    let appender = tracing_appender::rolling::never(&log_dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;
    Some(guard)
}

fn resolve_client(db_path: &std::path::Path) -> Arc<dyn BackendClient> {
    #[cfg(feature = "sqlite")]
    {
        if db_path.is_file() {
            match SqliteClient::open(db_path.to_path_buf()) {
                Ok(client) => return Arc::new(client),
                Err(e) => error!(error = %e, "failed to open sqlite database, falling back to bd subprocess"),
            }
        }
    }
    Arc::new(SubprocessClient::new(std::path::PathBuf::from("bd"), db_path.to_path_buf()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref());

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{:#}", anyhow::Error::new(e));
            std::process::exit(1);
        }
    };

    let location = match locate_database(&cwd, cli.db.as_deref()) {
        Ok(location) => location,
        Err(e) => {
            eprintln!("{:#}", anyhow::Error::new(e));
            std::process::exit(1);
        }
    };

    let client = resolve_client(&location.path);

    if let Some(OutputFormat::Json) = cli.output {
        return dump_json(client).await;
    }

    let config_path = cli.config.clone().unwrap_or_else(config::default_path);
    let persisted = match config::load(&config_path) {
        Ok(persisted) => persisted,
        Err(e) => {
            error!(error = %e, path = %config_path.display(), "failed to load config, using defaults");
            PersistedConfig::default()
        }
    };

    let refresh_interval = if cli.refresh_interval != 5 {
        std::time::Duration::from_secs(cli.refresh_interval)
    } else {
        std::time::Duration::from_secs(persisted.refresh_interval_secs)
    };
    let auto_refresh = !cli.no_auto_refresh && persisted.auto_refresh;

    let app_config = AppConfig {
        client,
        db_path: location.path,
        refresh_interval,
        auto_refresh,
        known_labels: Vec::new(),
        known_assignees: Vec::new(),
        theme: persisted.theme.resolve(),
        column_mode: persisted.column_mode,
    };

    abacus::eventcore::configure(app_config);

    info!("starting abacus");
    let result = match Runtime::<AbacusApp>::new_terminal() {
        Ok(runtime) => runtime.run(),
        Err(e) => Err(e),
    };

    config::save(
        &config_path,
        &PersistedConfig {
            refresh_interval_secs: refresh_interval.as_secs(),
            auto_refresh,
            column_mode: persisted.column_mode,
            theme: persisted.theme,
        },
    );

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "runtime exited with an error");
            ExitCode::from(1)
        }
    }
}

async fn dump_json(client: Arc<dyn BackendClient>) -> ExitCode {
    let issues = match client.export().await {
        Ok(issues) => issues,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };
    match serde_json::to_writer_pretty(std::io::stdout(), &issues) {
        Ok(()) => {
            println!();
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
