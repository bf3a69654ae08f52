use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use vrf_gas::{
    run_groups, wait_for_health, Cli, Config, Fixtures, TerminalReporter, VerifierClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config and apply CLI overrides
    let mut config = Config::load_or_default(&cli.config)?;
    cli.apply_to_config(&mut config);

    if cli.verbose {
        eprintln!("Configuration: {:?}", config);
    }

    // 1. Load test vectors
    eprintln!("Loading fixtures from {}...", config.fixtures.path.display());
    let fixtures = Fixtures::load(&config.fixtures.path).with_context(|| {
        format!(
            "Failed to load fixtures: {}",
            config.fixtures.path.display()
        )
    })?;

    // 2. Connect to the verifier
    eprintln!("Connecting to verifier at {}...", config.verifier.url);
    let verifier = VerifierClient::connect(
        &config.verifier.url,
        Duration::from_millis(config.verifier.request_timeout_ms),
    )?;
    wait_for_health(
        &verifier,
        Duration::from_millis(config.verifier.ready_timeout_ms),
    )
    .await
    .context("Verifier is not ready")?;

    // 3. Collect, summarize and report each group as it completes
    let reporter = if config.report.colors {
        TerminalReporter::new()
    } else {
        TerminalReporter::without_colors()
    };
    let groups = &config.benchmark.groups;
    let summary = run_groups(groups, &verifier, &fixtures, &reporter, cli.verbose)
        .await
        .context("Failed to write report")?;

    // 4. Fail the run if any group was skipped
    let failed = summary.failures.len();
    if let Some(first) = summary.failures.into_iter().next() {
        return Err(anyhow::Error::new(first).context(format!(
            "{} of {} benchmark groups failed",
            failed,
            groups.len()
        )));
    }

    Ok(())
}
