//! Quality-gate entrypoint for CI.
//!
//! Reads `FUSEGATE_METRICS_PATH` and `FUSEGATE_GATES_PATH`, prints the gate
//! report as JSON and exits non-zero when a hard gate failed.

use anyhow::Context;
use mimalloc::MiMalloc;

use fusegate::config::Config;
use fusegate::gate::{self, GateConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    let metrics_path = config
        .metrics_path
        .as_deref()
        .context("FUSEGATE_METRICS_PATH is not set")?;
    let gates_path = config
        .gates_path
        .as_deref()
        .context("FUSEGATE_GATES_PATH is not set")?;

    tracing::info!(
        metrics = %metrics_path.display(),
        gates = %gates_path.display(),
        "Validating quality gates"
    );

    let metrics = gate::load_metrics(metrics_path)?;
    let gates = GateConfig::from_file(gates_path)?;
    let report = gate::validate(&metrics, &gates);

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.passed {
        tracing::error!(%report, "Quality gate failed");
        std::process::exit(1);
    }

    Ok(())
}
