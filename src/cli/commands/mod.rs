//! Subcommand implementations.

/// Configure and set command handlers.
pub mod configure;

/// Provider listing command handler.
pub mod providers;

/// Engine wiring shared by `watch` and `translate`.
pub mod session;

/// One-shot translation command handler.
pub mod translate;

/// Clipboard watcher command handler.
pub mod watch;
