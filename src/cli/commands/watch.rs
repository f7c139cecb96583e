//! The default command: watch the clipboard until Ctrl+C.

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::RecvError;

use super::session::build_orchestrator;
use crate::cli::WatchArgs;
use crate::config::TranslationConfig;
use crate::engine::{self, EngineEvent};
use crate::status;
use crate::ui::Style;

/// Runs the watcher, printing each activity log entry to stderr.
pub async fn run_watch(args: WatchArgs) -> Result<()> {
    let (orchestrator, completions) = build_orchestrator(&args.overrides, !args.no_paste)?;

    print_banner(orchestrator.config(), args.no_paste);
    for entry in orchestrator.log().entries() {
        status!("{}", Style::secondary(entry));
    }

    let mut events = orchestrator.subscribe();
    let (handle, task) = engine::spawn(orchestrator, completions);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            result = &mut ctrl_c => {
                result.context("Failed to listen for Ctrl+C")?;
                status!();
                break;
            }
            event = events.recv() => match event {
                Ok(event) => print_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "watch output fell behind");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }

    handle.shutdown().await.ok();
    task.await.context("The translation engine panicked")?;
    Ok(())
}

fn print_event(event: &EngineEvent) {
    match event {
        EngineEvent::Log(entry) if entry.message.starts_with("ERROR:") => {
            status!("{}", Style::error(entry));
        }
        EngineEvent::Log(entry) => status!("{}", Style::secondary(entry)),
        EngineEvent::Status(_) | EngineEvent::Finished(_) => {}
    }
}

fn print_banner(config: &TranslationConfig, no_paste: bool) {
    status!(
        "{} {} {} {} via {}",
        Style::header("pluggo"),
        Style::code(config.source_language),
        Style::secondary("→"),
        Style::code(config.target_language),
        Style::value(config.provider.label()),
    );
    if !config.auto_translate {
        status!(
            "{}",
            Style::warning("Auto-translate is off. Run 'pluggo set auto_translate on' to enable it.")
        );
    }
    if config.auto_paste && !no_paste {
        status!(
            "{}",
            Style::hint("Auto-paste is on: translations are pasted into the focused app.")
        );
    }
    status!("{}", Style::hint("Copy some text to translate it. Press Ctrl+C to stop."));
}
