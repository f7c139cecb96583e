use crate::activity::LogEntry;
use crate::config::TranslationConfig;

/// How a translation cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The translation was written to the clipboard.
    Completed { translated: String },
    /// The provider call failed; the clipboard is untouched.
    Failed(String),
    /// Nothing was sent (empty clipboard, text too long).
    Skipped(String),
}

/// Notifications for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Status(String),
    Log(LogEntry),
    Finished(CycleOutcome),
}

/// Everything a presentation layer reads at once.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub config: TranslationConfig,
    pub status: String,
    /// Newest first.
    pub log: Vec<LogEntry>,
    pub translating: bool,
    pub last_translated_source: Option<String>,
}
