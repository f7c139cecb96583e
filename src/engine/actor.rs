//! The engine task: one loop that owns the orchestrator and serializes
//! clipboard ticks, user commands, and translation completions.

use anyhow::{Context, Result, anyhow};
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::events::{EngineEvent, Snapshot};
use super::orchestrator::{Completion, Orchestrator};
use crate::clipboard::POLL_INTERVAL;
use crate::config::Setting;

const COMMAND_CAPACITY: usize = 32;

/// User actions exposed to presentation layers.
#[derive(Debug)]
pub enum Command {
    TranslateNow,
    Apply(Setting),
    ClearLog,
    CopyLog,
    Snapshot(oneshot::Sender<Snapshot>),
    Shutdown,
}

/// Cheap, cloneable access to a running engine.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::Sender<Command>,
    events: broadcast::Sender<EngineEvent>,
}

impl EngineHandle {
    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow!("The translation engine has stopped"))
    }

    pub async fn translate_now(&self) -> Result<()> {
        self.send(Command::TranslateNow).await
    }

    pub async fn apply(&self, setting: Setting) -> Result<()> {
        self.send(Command::Apply(setting)).await
    }

    pub async fn clear_log(&self) -> Result<()> {
        self.send(Command::ClearLog).await
    }

    pub async fn copy_log(&self) -> Result<()> {
        self.send(Command::CopyLog).await
    }

    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (reply, response) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        response
            .await
            .context("The translation engine stopped before answering")
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }
}

/// Spawns the engine loop polling at the standard interval.
pub fn spawn(
    orchestrator: Orchestrator,
    completions: mpsc::UnboundedReceiver<Completion>,
) -> (EngineHandle, JoinHandle<()>) {
    spawn_with_interval(orchestrator, completions, POLL_INTERVAL)
}

/// Spawns the engine loop polling every `poll_interval`.
pub fn spawn_with_interval(
    orchestrator: Orchestrator,
    completions: mpsc::UnboundedReceiver<Completion>,
    poll_interval: Duration,
) -> (EngineHandle, JoinHandle<()>) {
    let (commands, commands_rx) = mpsc::channel(COMMAND_CAPACITY);
    let handle = EngineHandle {
        commands,
        events: orchestrator.event_sender(),
    };

    let task = tokio::spawn(run(orchestrator, commands_rx, completions, poll_interval));
    (handle, task)
}

async fn run(
    mut orchestrator: Orchestrator,
    mut commands: mpsc::Receiver<Command>,
    mut completions: mpsc::UnboundedReceiver<Completion>,
    poll_interval: Duration,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!(?poll_interval, "engine started");

    loop {
        tokio::select! {
            _ = ticker.tick() => orchestrator.tick(),
            command = commands.recv() => match command {
                Some(Command::Shutdown) | None => break,
                Some(command) => handle_command(&mut orchestrator, command),
            },
            Some(completion) = completions.recv() => orchestrator.apply_completion(completion),
        }
    }

    orchestrator.cancel_in_flight();
    tracing::info!("engine stopped");
}

fn handle_command(orchestrator: &mut Orchestrator, command: Command) {
    match command {
        Command::TranslateNow => orchestrator.translate_now(),
        Command::Apply(setting) => orchestrator.apply_setting(setting),
        Command::ClearLog => orchestrator.clear_log(),
        Command::CopyLog => orchestrator.copy_log(),
        Command::Snapshot(reply) => {
            let _ = reply.send(orchestrator.snapshot());
        }
        Command::Shutdown => {}
    }
}
