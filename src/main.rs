use anyhow::{Context, Result};
use clap::Parser;
use replication_curve::{cli::Cli, config::ReplicationConfig, pipeline};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve the run configuration from an optional file plus CLI flags
fn load_config(args: &Cli) -> Result<ReplicationConfig> {
    let base = match &args.config {
        Some(path) => ReplicationConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReplicationConfig::default(),
    };

    Ok(base.apply_overrides(args.overrides()))
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let config = load_config(&args)?;
    pipeline::run(&config).context("Replication curve run failed")?;

    Ok(())
}
