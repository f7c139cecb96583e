//! Color helpers for terminal output.
//!
//! Every helper falls back to plain text when colors are disabled.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::output;

fn styled<T: Display>(text: T, paint: impl FnOnce(&T) -> String) -> String {
    if output::is_no_color() {
        text.to_string()
    } else {
        paint(&text)
    }
}

/// Styles for different semantic elements.
pub struct Style;

impl Style {
    /// Section headers ("Current settings", "Providers")
    pub fn header<T: Display>(text: T) -> String {
        styled(text, |t| t.bold().to_string())
    }

    /// Setting keys
    pub fn label<T: Display>(text: T) -> String {
        styled(text, |t| t.dimmed().to_string())
    }

    /// Provider names, languages, models
    pub fn value<T: Display>(text: T) -> String {
        styled(text, |t| t.cyan().to_string())
    }

    /// Endpoints, descriptions, log lines
    pub fn secondary<T: Display>(text: T) -> String {
        styled(text, |t| t.dimmed().to_string())
    }

    pub fn success<T: Display>(text: T) -> String {
        styled(text, |t| t.green().to_string())
    }

    pub fn error<T: Display>(text: T) -> String {
        styled(text, |t| t.red().bold().to_string())
    }

    pub fn warning<T: Display>(text: T) -> String {
        styled(text, |t| t.yellow().to_string())
    }

    /// Language codes
    pub fn code<T: Display>(text: T) -> String {
        styled(text, |t| t.yellow().to_string())
    }

    pub fn hint<T: Display>(text: T) -> String {
        styled(text, |t| t.dimmed().italic().to_string())
    }

    /// Marker for the active provider.
    pub fn active_marker() -> String {
        styled("(active)", |t| t.green().to_string())
    }
}
