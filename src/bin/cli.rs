//! openwrt-matrix CLI
//!
//! Scans an OpenWrt release tree and emits the build-job matrix as JSON.
//! Intended to run inside a GitHub Actions workflow, where the matrix is
//! also published as the `job-config` step output.

use std::path::PathBuf;

use clap::Parser;
use openwrt_matrix::{
    error::{AppError, Result},
    models::{Config, FilterSet, ReleaseTree, Selection},
    pipeline,
    utils::{github, http},
};

/// openwrt-matrix - Release target scanner
#[derive(Parser, Debug)]
#[command(
    name = "openwrt-matrix",
    version,
    about = "Scans an OpenWrt release tree and emits a build-job matrix"
)]
struct Cli {
    /// Release version to scan (e.g. 23.05.3)
    version: String,

    /// Comma-separated list of targets to build (manual runs)
    #[arg(long)]
    targets: Option<String>,

    /// Comma-separated list of subtargets to build (manual runs)
    #[arg(long)]
    subtargets: Option<String>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Write the matrix JSON to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.version.trim().is_empty() {
        return Err(AppError::config("Release version must not be empty"));
    }

    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    let selection = Selection::new(
        FilterSet::from_arg(cli.targets.as_deref()),
        FilterSet::from_arg(cli.subtargets.as_deref()),
    );
    let tree = ReleaseTree::new(&config.crawler.base_url, cli.version.trim());

    log::info!(
        "Scanning release {} at {}",
        tree.version(),
        config.crawler.base_url
    );

    let client = http::create_async_client(&config.crawler)?;
    let fetcher = http::HttpFetcher::new(client);

    let jobs = pipeline::run_scan(&fetcher, &tree, &selection).await?;

    let pretty = serde_json::to_string_pretty(&jobs)?;
    match &cli.output {
        Some(path) => {
            std::fs::write(path, &pretty)?;
            log::info!("Job matrix written to {}", path.display());
        }
        None => println!("{pretty}"),
    }

    github::set_output("job-config", &serde_json::to_string(&jobs)?)?;

    Ok(())
}
