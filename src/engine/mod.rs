//! Translation orchestration: dedup, cancel-and-replace dispatch, write-back.

mod actor;
mod events;
mod orchestrator;

pub use actor::{Command, EngineHandle, spawn, spawn_with_interval};
pub use events::{CycleOutcome, EngineEvent, Snapshot};
pub use orchestrator::{Completion, Dependencies, Orchestrator, Trigger};
