use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use super::events::{CycleOutcome, EngineEvent, Snapshot};
use crate::activity::ActivityLog;
use crate::clipboard::{ChangeDetector, ClipboardStore, PasteInjector};
use crate::config::{Preferences, Setting, TranslationConfig};
use crate::translation::{TranslationError, TranslationRequest, Translator, char_count};

const EVENT_CAPACITY: usize = 64;

/// Detected-text lengths above this are logged as this value.
const DETECTED_LENGTH_CAP: usize = 80;

/// Collaborators the orchestrator drives.
pub struct Dependencies {
    pub clipboard: Arc<dyn ClipboardStore>,
    pub translator: Arc<dyn Translator>,
    pub paste: Arc<dyn PasteInjector>,
    pub preferences: Box<dyn Preferences>,
}

/// What started a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// "Translate now": reads the clipboard directly, ignores dedup.
    Manual,
    /// New text reported by the change detector.
    Auto,
}

/// Result of one provider call, tagged with the ticket it was dispatched under.
#[derive(Debug)]
pub struct Completion {
    pub ticket: u64,
    pub source: String,
    pub result: Result<String, TranslationError>,
}

struct InFlightTask {
    ticket: u64,
    handle: JoinHandle<()>,
}

/// Owns all translation state and applies every change to it.
///
/// At most one translation is in flight. A new dispatch aborts the previous
/// one, and a completion is applied only if its ticket is still the current
/// one.
pub struct Orchestrator {
    config: TranslationConfig,
    preferences: Box<dyn Preferences>,
    clipboard: Arc<dyn ClipboardStore>,
    translator: Arc<dyn Translator>,
    paste: Arc<dyn PasteInjector>,
    detector: ChangeDetector,
    log: ActivityLog,
    status: String,
    last_translated_source: Option<String>,
    in_flight: Option<InFlightTask>,
    next_ticket: u64,
    completions: mpsc::UnboundedSender<Completion>,
    events: broadcast::Sender<EngineEvent>,
}

impl Orchestrator {
    /// Loads the config from preferences and starts watching from the current clipboard state.
    ///
    /// Completions of spawned translations arrive on the returned receiver and
    /// must be fed back through [`apply_completion`](Self::apply_completion).
    pub fn new(deps: Dependencies) -> (Self, mpsc::UnboundedReceiver<Completion>) {
        let (completions, completions_rx) = mpsc::unbounded_channel();
        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        let config = TranslationConfig::load(deps.preferences.as_ref());
        let detector = ChangeDetector::new(Arc::clone(&deps.clipboard));

        let mut orchestrator = Self {
            config,
            preferences: deps.preferences,
            clipboard: deps.clipboard,
            translator: deps.translator,
            paste: deps.paste,
            detector,
            log: ActivityLog::new(),
            status: String::new(),
            last_translated_source: None,
            in_flight: None,
            next_ticket: 0,
            completions,
            events,
        };

        orchestrator.set_status("Ready. Copy some text to translate it.");
        orchestrator.record("Application started.");

        (orchestrator, completions_rx)
    }

    pub const fn config(&self) -> &TranslationConfig {
        &self.config
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub const fn log(&self) -> &ActivityLog {
        &self.log
    }

    pub fn last_translated_source(&self) -> Option<&str> {
        self.last_translated_source.as_deref()
    }

    pub const fn is_translating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Ticket of the translation currently in flight.
    pub fn in_flight_ticket(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|task| task.ticket)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    pub(crate) fn event_sender(&self) -> broadcast::Sender<EngineEvent> {
        self.events.clone()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            config: self.config.clone(),
            status: self.status.clone(),
            log: self.log.entries().cloned().collect(),
            translating: self.is_translating(),
            last_translated_source: self.last_translated_source.clone(),
        }
    }

    /// One poll of the clipboard.
    pub fn tick(&mut self) {
        if let Some(text) = self.detector.poll() {
            self.handle_clipboard_text(text);
        }
    }

    /// Reacts to new clipboard text reported by the detector.
    pub fn handle_clipboard_text(&mut self, text: String) {
        if !self.config.auto_translate {
            return;
        }
        if self.last_translated_source.as_deref() == Some(text.as_str()) {
            tracing::debug!("skipping text that was already translated");
            return;
        }

        self.record(format!(
            "New clipboard text detected ({} characters).",
            char_count(&text).min(DETECTED_LENGTH_CAP)
        ));
        self.dispatch(text, Trigger::Auto);
    }

    /// Translates whatever text is on the clipboard right now.
    pub fn translate_now(&mut self) {
        let text = match self.clipboard.read_text() {
            Ok(text) => text.map(|t| t.trim().to_string()).unwrap_or_default(),
            Err(err) => {
                tracing::debug!("clipboard read failed: {err:#}");
                String::new()
            }
        };

        if text.is_empty() {
            let message = "No text on the clipboard.";
            self.set_status(message);
            self.record(message);
            self.finish(CycleOutcome::Skipped(message.to_string()));
            return;
        }

        self.dispatch(text, Trigger::Manual);
    }

    fn dispatch(&mut self, text: String, trigger: Trigger) {
        self.cancel_in_flight();

        let request = match TranslationRequest::from_config(&self.config, text) {
            Ok(request) => request,
            Err(too_long) => {
                self.set_status(too_long.to_string());
                self.record(format!(
                    "Not translated: text is too long ({} characters).",
                    too_long.chars
                ));
                self.finish(CycleOutcome::Skipped(too_long.to_string()));
                return;
            }
        };

        self.set_status(match trigger {
            Trigger::Manual => "Translating clipboard text...",
            Trigger::Auto => "Translating copied text...",
        });
        self.record(format!(
            "Translation started. provider={}, source={}, target={}.",
            request.provider(),
            request.source,
            request.target
        ));

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let translator = Arc::clone(&self.translator);
        let completions = self.completions.clone();

        let handle = tokio::spawn(async move {
            let result = translator.translate(&request).await;
            let _ = completions.send(Completion {
                ticket,
                source: request.text,
                result,
            });
        });

        tracing::info!(ticket, ?trigger, "translation dispatched");
        self.in_flight = Some(InFlightTask { ticket, handle });
    }

    /// Aborts the translation in flight, if any. Its result will never be applied.
    pub fn cancel_in_flight(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.handle.abort();
            tracing::debug!(ticket = task.ticket, "cancelled superseded translation");
        }
    }

    /// Applies a finished provider call, unless it has been superseded.
    pub fn apply_completion(&mut self, completion: Completion) {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|task| task.ticket == completion.ticket);
        if !is_current {
            tracing::debug!(
                ticket = completion.ticket,
                "discarding stale translation result"
            );
            return;
        }
        self.in_flight = None;

        let translated = completion
            .result
            .map(|text| text.trim().to_string())
            .and_then(|text| {
                if text.is_empty() {
                    Err(TranslationError::UnparsableResponse)
                } else {
                    Ok(text)
                }
            });

        match translated {
            Ok(translated) => self.complete(completion.source, translated),
            Err(err) => {
                let message = err.to_string();
                tracing::info!(ticket = completion.ticket, "translation failed: {message}");
                self.set_status(message.clone());
                self.record(format!("ERROR: {message}"));
                self.finish(CycleOutcome::Failed(message));
            }
        }
    }

    fn complete(&mut self, source: String, translated: String) {
        self.last_translated_source = Some(source);

        self.detector.mark_self_written(translated.clone());
        if let Err(err) = self.clipboard.write_text(&translated) {
            self.detector.clear_self_written();
            let message = "Could not write the translation to the clipboard.";
            tracing::warn!("clipboard write failed: {err:#}");
            self.set_status(message);
            self.record(format!("ERROR: {message} ({err})"));
            self.finish(CycleOutcome::Failed(message.to_string()));
            return;
        }

        self.set_status("Translation complete. Written to clipboard.");
        self.record(format!(
            "Translation complete. Result is {} characters.",
            char_count(&translated)
        ));

        if self.config.auto_paste {
            match self.paste.paste_into_foreground() {
                Ok(()) => {
                    self.set_status("Translation complete and pasted.");
                    self.record("Auto-paste attempted (needs the accessibility permission).");
                }
                Err(err) => {
                    tracing::warn!("auto-paste failed: {err:#}");
                    self.record(format!("Auto-paste failed: {err}"));
                }
            }
        }

        self.finish(CycleOutcome::Completed { translated });
    }

    /// Changes one setting and persists it.
    pub fn apply_setting(&mut self, setting: Setting) {
        let key = setting.key();
        if let Err(err) = self.config.set_field(setting, self.preferences.as_mut()) {
            tracing::warn!("{err:#}");
            self.record(format!("Could not save setting '{key}': {err:#}"));
        } else {
            tracing::info!(key, "setting updated");
        }
    }

    /// Changes one setting for this session only.
    pub fn apply_override(&mut self, setting: Setting) {
        self.config.apply(setting);
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    /// Writes the log, oldest first, to the clipboard.
    pub fn copy_log(&mut self) {
        let text = self.log.render();
        if text.is_empty() {
            self.set_status("No log to copy.");
            return;
        }

        self.detector.mark_self_written(text.trim());
        match self.clipboard.write_text(&text) {
            Ok(()) => {
                self.set_status("Log copied to clipboard.");
                self.record("Log copied to clipboard.");
            }
            Err(err) => {
                self.detector.clear_self_written();
                tracing::warn!("clipboard write failed: {err:#}");
                self.set_status("Could not copy the log to the clipboard.");
            }
        }
    }

    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
        let _ = self.events.send(EngineEvent::Status(self.status.clone()));
    }

    fn record(&mut self, message: impl Into<String>) {
        let entry = self.log.push(message);
        tracing::debug!("activity: {}", entry.message);
        let _ = self.events.send(EngineEvent::Log(entry));
    }

    fn finish(&self, outcome: CycleOutcome) {
        let _ = self.events.send(EngineEvent::Finished(outcome));
    }
}

impl Drop for Orchestrator {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clipboard::{MemoryClipboard, NoopPaste};
    use crate::config::MemoryPreferences;
    use async_trait::async_trait;

    struct EchoTranslator;

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(&self, request: &TranslationRequest) -> Result<String, TranslationError> {
            Ok(format!("  {}!  ", request.text.to_uppercase()))
        }
    }

    fn orchestrator(
        clipboard: &Arc<MemoryClipboard>,
    ) -> (Orchestrator, mpsc::UnboundedReceiver<Completion>) {
        Orchestrator::new(Dependencies {
            clipboard: Arc::clone(clipboard) as Arc<dyn ClipboardStore>,
            translator: Arc::new(EchoTranslator),
            paste: Arc::new(NoopPaste),
            preferences: Box::new(MemoryPreferences::new()),
        })
    }

    #[tokio::test]
    async fn test_starts_idle_with_ready_status() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let (orchestrator, _rx) = orchestrator(&clipboard);

        assert!(!orchestrator.is_translating());
        assert!(orchestrator.status().starts_with("Ready."));
        assert_eq!(orchestrator.log().len(), 1);
    }

    #[tokio::test]
    async fn test_result_is_trimmed_before_writing() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let (mut orchestrator, mut rx) = orchestrator(&clipboard);

        clipboard.copy("hello");
        orchestrator.tick();
        let completion = rx.recv().await.unwrap();
        orchestrator.apply_completion(completion);

        assert_eq!(clipboard.text(), Some("HELLO!".to_string()));
        assert_eq!(orchestrator.last_translated_source(), Some("hello"));
        assert!(!orchestrator.is_translating());
    }

    #[tokio::test]
    async fn test_own_write_is_not_retranslated() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let (mut orchestrator, mut rx) = orchestrator(&clipboard);

        clipboard.copy("hello");
        orchestrator.tick();
        orchestrator.apply_completion(rx.recv().await.unwrap());

        orchestrator.tick();
        assert!(!orchestrator.is_translating());
    }

    #[tokio::test]
    async fn test_blank_result_is_a_failure() {
        let clipboard = Arc::new(MemoryClipboard::with_text("hello"));
        let (mut orchestrator, _rx) = orchestrator(&clipboard);

        orchestrator.translate_now();
        let ticket = orchestrator.in_flight_ticket().unwrap();
        orchestrator.apply_completion(Completion {
            ticket,
            source: "hello".to_string(),
            result: Ok("   ".to_string()),
        });

        assert_eq!(clipboard.writes(), Vec::<String>::new());
        assert_eq!(
            orchestrator.status(),
            TranslationError::UnparsableResponse.to_string()
        );
    }

    #[tokio::test]
    async fn test_copy_log_is_not_retranslated() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let (mut orchestrator, _rx) = orchestrator(&clipboard);

        orchestrator.copy_log();
        assert!(clipboard.text().unwrap().contains("Application started."));

        orchestrator.tick();
        assert!(!orchestrator.is_translating());
        assert_eq!(orchestrator.status(), "Log copied to clipboard.");
    }

    #[tokio::test]
    async fn test_copy_empty_log() {
        let clipboard = Arc::new(MemoryClipboard::new());
        let (mut orchestrator, _rx) = orchestrator(&clipboard);

        orchestrator.clear_log();
        orchestrator.copy_log();

        assert_eq!(orchestrator.status(), "No log to copy.");
        assert_eq!(clipboard.text(), None);
    }

    /// Reads and counts like a [`MemoryClipboard`] but refuses every write.
    struct ReadOnlyClipboard(MemoryClipboard);

    impl ClipboardStore for ReadOnlyClipboard {
        fn change_count(&self) -> anyhow::Result<u64> {
            self.0.change_count()
        }

        fn read_text(&self) -> anyhow::Result<Option<String>> {
            self.0.read_text()
        }

        fn write_text(&self, _text: &str) -> anyhow::Result<()> {
            anyhow::bail!("clipboard is locked")
        }
    }

    #[tokio::test]
    async fn test_failed_write_does_not_swallow_next_copy() {
        let clipboard = Arc::new(ReadOnlyClipboard(MemoryClipboard::new()));
        let (mut orchestrator, mut rx) = Orchestrator::new(Dependencies {
            clipboard: Arc::clone(&clipboard) as Arc<dyn ClipboardStore>,
            translator: Arc::new(EchoTranslator),
            paste: Arc::new(NoopPaste),
            preferences: Box::new(MemoryPreferences::new()),
        });

        clipboard.0.copy("hello");
        orchestrator.tick();
        orchestrator.apply_completion(rx.recv().await.unwrap());
        assert_eq!(
            orchestrator.status(),
            "Could not write the translation to the clipboard."
        );

        // The user copies the exact text that failed to land
        clipboard.0.copy("HELLO!");
        orchestrator.tick();
        assert!(orchestrator.is_translating());
    }

    #[tokio::test]
    async fn test_failed_log_copy_does_not_swallow_next_copy() {
        let clipboard = Arc::new(ReadOnlyClipboard(MemoryClipboard::new()));
        let (mut orchestrator, _rx) = Orchestrator::new(Dependencies {
            clipboard: Arc::clone(&clipboard) as Arc<dyn ClipboardStore>,
            translator: Arc::new(EchoTranslator),
            paste: Arc::new(NoopPaste),
            preferences: Box::new(MemoryPreferences::new()),
        });

        let log = orchestrator.log().render();
        orchestrator.copy_log();
        assert_eq!(
            orchestrator.status(),
            "Could not copy the log to the clipboard."
        );

        clipboard.0.copy(&log);
        orchestrator.tick();
        assert!(orchestrator.is_translating());
    }
}
