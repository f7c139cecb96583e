//! # pluggo - Clipboard Translator
//!
//! `pluggo` watches the system clipboard. When new text is copied it is sent
//! to a translation provider (OpenAI, Groq or a LibreTranslate server) and the
//! translation is written back to the clipboard, optionally pasted into the
//! focused application.
//!
//! ## Quick Start
//!
//! ```bash
//! # Watch the clipboard, translating into the configured target language
//! pluggo
//!
//! # Override languages and provider for this run only
//! pluggo --from en --to de --provider openai
//!
//! # Translate whatever is on the clipboard right now
//! pluggo translate
//!
//! # Store a setting
//! pluggo set groq_api_key gsk_...
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/pluggo/config.toml`:
//!
//! ```toml
//! auto_translate = true
//! auto_paste = false
//! source_language = "auto"
//! target_language = "tr"
//! provider = "groq"
//! groq_model = "llama-3.1-8b-instant"
//! ```
//!
//! A blank API key falls back to `OPENAI_API_KEY`, `GROQ_API_KEY` or
//! `LIBRETRANSLATE_API_KEY`.

/// Bounded activity log shown to the user.
pub mod activity;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Clipboard access, change detection, and paste injection.
pub mod clipboard;

/// Translation settings and their persistence.
pub mod config;

/// The orchestrator and the task that drives it.
pub mod engine;

/// File system utilities.
pub mod fs;

/// Diagnostic tracing setup.
pub mod logging;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Provider clients and translation requests.
pub mod translation;

/// Terminal UI components (spinner, colors, prompts).
pub mod ui;
