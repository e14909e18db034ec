use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabclean::cleaning::{CleaningConfig, NullAction};
use tabclean::config::AppConfig;
use tabclean::http::{AppState, create_router};
use tabclean::pipeline::{BatchReport, CleaningPipeline, Upload};

#[derive(Parser)]
#[command(name = "tabclean", version, about = "Batch cleaning for CSV and Excel files")]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true, env = "TABCLEAN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address. Overrides `server.host` from the config file.
        #[arg(long, env = "HOST")]
        host: Option<String>,

        /// Bind port. Overrides `server.port` from the config file.
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },
    /// Clean local files with the same pipeline the server uses
    Clean {
        /// Files to clean (csv, xls, xlsx)
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// What to do with null values: keep, mean, median or drop
        #[arg(long, default_value_t = NullAction::Keep)]
        null_action: NullAction,

        /// Prepend a 1-based `PrimaryKey` column
        #[arg(long)]
        assign_pk: bool,

        /// Remove duplicate rows, keeping the first occurrence
        #[arg(long)]
        remove_duplicates: bool,

        /// Directory for cleaned files. Overrides `storage.output_dir`.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

pub fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(AppConfig::default()),
    }
}

pub async fn run_command(command: Commands, config: AppConfig) -> Result<()> {
    match command {
        Commands::Serve { host, port } => handle_serve(config, host, port).await,
        Commands::Clean {
            files,
            null_action,
            assign_pk,
            remove_duplicates,
            output_dir,
        } => {
            let options = CleaningConfig {
                null_action,
                remove_duplicates,
                assign_primary_key: assign_pk,
                filetype: None,
            };
            handle_clean(config, files, options, output_dir).await
        }
    }
}

async fn handle_serve(mut config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let pipeline = CleaningPipeline::from_config(&config)?;
    tracing::info!(
        staging = %pipeline.storage().staging_dir().display(),
        output = %pipeline.storage().output_dir().display(),
        extensions = ?pipeline.policy().allowed(),
        "Pipeline ready"
    );
    if let Some(log_dir) = config.log_dir.as_deref() {
        tracing::info!(
            log = %tabclean::logging::current_log_path(log_dir).display(),
            errors = %tabclean::logging::current_error_log_path(log_dir).display(),
            "Writing logs"
        );
    }

    let state = AppState::new(pipeline, config.server.max_upload_bytes);
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    println!("Listening on http://{addr}");

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

async fn handle_clean(
    mut config: AppConfig,
    files: Vec<PathBuf>,
    options: CleaningConfig,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(dir) = output_dir {
        config.storage.output_dir = dir;
    }

    let mut uploads = Vec::with_capacity(files.len());
    for path in &files {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        uploads.push(Upload::new(filename, bytes));
    }

    let report = tokio::task::spawn_blocking(move || -> Result<BatchReport> {
        let pipeline = CleaningPipeline::from_config(&config)?;
        Ok(pipeline.process_batch(&options, &uploads)?)
    })
    .await
    .context("Cleaning task panicked")??;

    print_report(&report);
    Ok(())
}

fn print_report(report: &BatchReport) {
    for file in report.processed() {
        println!("cleaned  {} -> {}", file.original, file.output_path.display());
    }
    for (filename, reason) in report.skipped() {
        println!("skipped  {filename}: {reason}");
    }
    for (filename, stage, error) in report.failed() {
        println!("failed   {filename} ({stage}): {error}");
    }
    println!("{}", report.summary());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clean_flags() {
        let cli = Cli::parse_from([
            "tabclean",
            "clean",
            "a.csv",
            "b.xlsx",
            "--null-action",
            "median",
            "--assign-pk",
        ]);
        let Commands::Clean {
            files,
            null_action,
            assign_pk,
            remove_duplicates,
            ..
        } = cli.command
        else {
            panic!("expected clean subcommand");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(null_action, NullAction::Median);
        assert!(assign_pk);
        assert!(!remove_duplicates);
    }

    #[test]
    fn test_rejects_unknown_null_action() {
        assert!(Cli::try_parse_from(["tabclean", "clean", "a.csv", "--null-action", "zero"]).is_err());
    }
}
