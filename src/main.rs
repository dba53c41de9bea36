mod adapters;
mod application;
mod bom_construction;
mod cli;
mod config;
mod ports;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{DirectoryScanner, FileSystemWriter, StdoutPresenter};
use adapters::outbound::process::{SystemCommandRunner, DEFAULT_COMMAND_TIMEOUT};
use application::dto::{BomRequest, BomResponse, ScanRequest};
use application::use_cases::{BuildBomUseCase, ScanDirectoryUseCase};
use bom_construction::domain::{LibraryReference, Platform};
use clap::error::ErrorKind;
use clap::CommandFactory;
use cli::{Args, OutputFormat};
use config::ConfigFile;
use ports::outbound::OutputPresenter;
use shared::error::{BomError, ExitCode};
use shared::Result;
use std::path::Path;
use std::process;
use std::str::FromStr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();
    if !args.has_inputs() {
        Args::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "nothing to identify: pass -l NAME, a library FILE, or --scan DIR",
            )
            .exit();
    }
    init_tracing(args.verbose);

    match run(args) {
        Ok(code) => process::exit(code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "warn,native_sbom=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Effective settings after layering CLI flags over the config file
struct Settings {
    platform: Platform,
    format: OutputFormat,
    timeout: Duration,
    include_system_paths: bool,
}

fn resolve_settings(args: &Args, config: &ConfigFile) -> Result<Settings> {
    let config_format = config
        .format
        .as_deref()
        .map(OutputFormat::from_str)
        .transpose()
        .map_err(|message| BomError::Validation { message })?;

    Ok(Settings {
        platform: args
            .platform
            .or_else(|| config.platform())
            .unwrap_or_else(Platform::current),
        format: args
            .format
            .or(config_format)
            .unwrap_or(OutputFormat::Json),
        timeout: args
            .timeout
            .or(config.command_timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_COMMAND_TIMEOUT),
        include_system_paths: !args.no_system_paths
            && config.include_system_paths.unwrap_or(true),
    })
}

fn load_config(explicit: Option<&Path>, quiet: bool) -> Result<ConfigFile> {
    if let Some(path) = explicit {
        let config = config::load_config_from_path(path)?;
        if !quiet {
            eprintln!("📄 Loaded config from: {}", path.display());
        }
        return Ok(config);
    }
    match config::discover_config(Path::new("."))? {
        Some(config) => {
            if !quiet {
                eprintln!("📄 Auto-discovered config file: {}", config::CONFIG_FILENAME);
            }
            Ok(config)
        }
        None => Ok(ConfigFile::default()),
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref(), args.quiet)?;
    let settings = resolve_settings(&args, &config)?;

    let mut search_paths = args.library_paths.clone();
    search_paths.extend(config.search_paths.clone().unwrap_or_default());
    let chain_settings = config.chain_settings();

    // Create adapters (Dependency Injection)
    let command_runner = SystemCommandRunner::with_timeout(settings.timeout);
    let progress_reporter = if args.quiet {
        StderrProgressReporter::quiet()
    } else {
        StderrProgressReporter::new()
    };

    let response: BomResponse = if let Some(root) = &args.scan {
        let use_case = ScanDirectoryUseCase::new(
            DirectoryScanner::new(),
            command_runner,
            progress_reporter,
            settings.platform,
        );
        let request = ScanRequest::new(root.clone())
            .with_search_paths(search_paths)
            .with_system_paths(settings.include_system_paths)
            .with_chain_settings(chain_settings);
        use_case.execute(request)?
    } else {
        let request = BomRequest::new(
            args.libraries
                .iter()
                .map(|name| LibraryReference::from_linker_flag(name))
                .collect(),
            search_paths,
            args.files.clone(),
        )
        .with_system_paths(settings.include_system_paths)
        .with_chain_settings(chain_settings);

        let use_case =
            BuildBomUseCase::new(command_runner, progress_reporter, settings.platform);
        use_case.execute(request)?
    };

    if !args.quiet {
        eprintln!("{}", settings.format.progress_message());
    }
    let formatter = settings.format.create_formatter();
    let formatted_output = formatter.format(&response)?;

    // Present output
    let presenter: Box<dyn OutputPresenter> = match &args.output {
        Some(output_path) => Box::new(FileSystemWriter::new(output_path.clone())),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&formatted_output)?;

    if response.is_empty() && args.fail_on_empty {
        eprintln!("⚠️  No library could be identified");
        return Ok(ExitCode::NoLibrariesIdentified);
    }
    Ok(ExitCode::Success)
}
