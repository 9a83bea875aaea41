use checks::prelude::*;
use clap::{Args, Parser, Subcommand, ValueEnum};
use harness::DashboardSuite;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "harness")]
#[command(about = "Structural and deployment checks for the DevOps dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run every check and exit non-zero if any failed
    Run {
        #[command(flatten)]
        source: ConfigArgs,
        /// Seed for the simulated load time and build info
        #[arg(long)]
        seed: Option<u64>,
        /// Treat this run as CI (creates missing expected directories)
        #[arg(long)]
        ci: bool,
        /// Output format for the summary
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Add a check that always fails
        #[arg(long)]
        intentional_failure: bool,
    },
    /// List the checks in the order they run
    List {
        #[command(flatten)]
        source: ConfigArgs,
        /// Include the check that always fails
        #[arg(long)]
        intentional_failure: bool,
    },
}

#[derive(Args)]
struct ConfigArgs {
    /// HTML document to check
    #[arg(long)]
    html: Option<PathBuf>,
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let outcome = match cli.command {
        Commands::Run {
            source,
            seed,
            ci,
            format,
            intentional_failure,
        } => run_checks(&source, seed, ci, format, intentional_failure),
        Commands::List {
            source,
            intentional_failure,
        } => list_checks(&source, intentional_failure).map(|()| true),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("✗ {}", e);
            error!("harness setup failed: {}", e);
            ExitCode::from(2)
        }
    }
}

fn load_config(source: &ConfigArgs) -> HarnessResult<HarnessConfig> {
    let mut config = match &source.config {
        Some(path) => HarnessConfig::from_file(path)?,
        None => HarnessConfig::default(),
    };

    if let Some(html) = &source.html {
        config = config.with_html_path(html);
    }

    Ok(config)
}

fn run_checks(
    source: &ConfigArgs,
    seed: Option<u64>,
    ci: bool,
    format: OutputFormat,
    intentional_failure: bool,
) -> HarnessResult<bool> {
    let mut config = load_config(source)?;
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }
    let config = config.validated()?;

    let mut env = EnvSnapshot::capture(&config.runtime_command);
    if ci {
        env = env.with_ci(true);
    }
    env.log_diagnostics();

    let mut suite =
        DashboardSuite::new(config, env).with_intentional_failure(intentional_failure);
    if format == OutputFormat::Json {
        suite = suite.quiet();
    }

    let results = suite.run_all();
    info!(success = results.is_success(), "run finished");

    match format {
        OutputFormat::Text => Ok(print_summary(&results)),
        OutputFormat::Json => {
            println!("{}", render_json(&results)?);
            Ok(results.is_success())
        }
    }
}

fn list_checks(source: &ConfigArgs, intentional_failure: bool) -> HarnessResult<()> {
    let config = load_config(source)?.validated()?;
    let suite = DashboardSuite::new(config, EnvSnapshot::default())
        .with_intentional_failure(intentional_failure);

    println!("Checks:");
    for (index, name) in suite.check_names().iter().enumerate() {
        println!("  {}. {}", index + 1, name);
    }
    Ok(())
}
