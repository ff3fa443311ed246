//! Grist CLI - thin glue around the analysis engine.
//!
//! Builds an `OperationRequest` from the subcommand, hands it to the engine
//! façade and prints whatever string comes back. All analysis behavior lives
//! in the `grist` crate.

mod cli;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use grist::{Engine, ToolPhase};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let engine = Engine::new(&cli.root).with_notifier(|event| {
        let phase = match event.phase {
            ToolPhase::Start => "tool_start",
            ToolPhase::End => "tool_end",
        };
        debug!(
            phase,
            operation = event.operation,
            request_id = event.request_id,
            "lifecycle"
        );
    });

    // The façade never fails; errors arrive as `Error: ...` report strings.
    let report = engine.execute(cli.command.into_request()).await;
    print!("{report}");
    if !report.ends_with('\n') {
        println!();
    }

    if report.starts_with("Error: ") {
        std::process::exit(1);
    }
}
