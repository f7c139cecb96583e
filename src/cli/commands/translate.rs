//! One-shot "translate now" from the terminal.

use anyhow::{Context, Result, bail};
use tokio::sync::broadcast::{self, error::RecvError};

use super::session::build_orchestrator;
use crate::cli::OverrideArgs;
use crate::config::Setting;
use crate::engine::{self, CycleOutcome, EngineEvent};
use crate::ui::{Spinner, Style};
use crate::warn;

/// Translates the current clipboard text once.
///
/// The translation is written back to the clipboard and printed to stdout.
/// Returns the process exit code.
pub async fn run_translate(overrides: OverrideArgs) -> Result<exitcode::ExitCode> {
    let (mut orchestrator, completions) = build_orchestrator(&overrides, false)?;
    // Only the manual trigger should run, even if the clipboard changes meanwhile.
    orchestrator.apply_override(Setting::AutoTranslate(false));

    let mut events = orchestrator.subscribe();
    let (handle, task) = engine::spawn(orchestrator, completions);

    let spinner = Spinner::new("Reading clipboard...");
    handle.translate_now().await?;
    let outcome = wait_for_outcome(&mut events, &spinner).await;
    spinner.stop();

    handle.shutdown().await.ok();
    task.await.context("The translation engine panicked")?;

    match outcome? {
        CycleOutcome::Completed { translated } => {
            println!("{translated}");
            Ok(exitcode::OK)
        }
        CycleOutcome::Failed(message) => {
            warn!("{} {message}", Style::error("Error:"));
            Ok(exitcode::UNAVAILABLE)
        }
        CycleOutcome::Skipped(message) => {
            warn!("{} {message}", Style::warning("Not translated:"));
            Ok(exitcode::DATAERR)
        }
    }
}

async fn wait_for_outcome(
    events: &mut broadcast::Receiver<EngineEvent>,
    spinner: &Spinner,
) -> Result<CycleOutcome> {
    loop {
        match events.recv().await {
            Ok(EngineEvent::Finished(outcome)) => return Ok(outcome),
            Ok(EngineEvent::Status(status)) => spinner.set_message(&status),
            Ok(EngineEvent::Log(entry)) => tracing::debug!("{entry}"),
            Err(RecvError::Lagged(skipped)) => tracing::debug!(skipped, "events skipped"),
            Err(RecvError::Closed) => bail!("The translation engine stopped unexpectedly"),
        }
    }
}
