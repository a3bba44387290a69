//! podrun CLI - Main entry point

use clap::Parser;
use podrun_foundation::PodrunConfig;
use podrun_task::{KubeOrchestrator, RunOutcome, TaskManager, TaskManagerConfig, TaskSpec};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Printed ahead of the captured output
const OUTPUT_LABEL: &str = "Pod logs:\n";

/// podrun - run a script in an ephemeral Kubernetes pod and print its output
#[derive(Parser, Debug)]
#[command(name = "podrun")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Script to run; resolved against the current directory
    #[arg(default_value = "script.py")]
    script: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the task output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = PodrunConfig::load()?;
    let spec = TaskSpec::for_script(&args.script, &config)?;

    let orchestrator = KubeOrchestrator::connect(&config).await?;
    info!(
        "Connected; pods go to namespace {}",
        orchestrator.namespace()
    );

    let manager = TaskManager::new(Arc::new(orchestrator), TaskManagerConfig::from(&config));
    let outcome = manager.run(spec).await?;
    report_status(&outcome);

    println!("{}", render_output(&outcome.output));
    Ok(())
}

fn report_status(outcome: &RunOutcome) {
    if outcome.is_success() {
        info!("Task {} {}", outcome.handle, outcome.status);
    } else {
        warn!("Task {} {}", outcome.handle, outcome.status);
    }
}

fn render_output(output: &str) -> String {
    format!("{}{}", OUTPUT_LABEL, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_output_label() {
        assert_eq!(render_output("hello\n"), "Pod logs:\nhello\n");
        assert_eq!(render_output(""), "Pod logs:\n");
    }

    #[test]
    fn test_default_script_argument() {
        let args = Args::try_parse_from(["podrun"]).unwrap();
        assert_eq!(args.script, PathBuf::from("script.py"));

        let args = Args::try_parse_from(["podrun", "jobs/train.py"]).unwrap();
        assert_eq!(args.script, PathBuf::from("jobs/train.py"));
    }

    #[test]
    fn test_no_flags_accepted() {
        assert!(Args::try_parse_from(["podrun", "--namespace", "x"]).is_err());
    }
}
