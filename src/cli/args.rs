use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "pluggo")]
#[command(about = "Clipboard translator: copy text, get the translation back on the clipboard")]
#[command(version)]
pub struct Args {
    #[command(flatten)]
    pub watch: WatchArgs,

    /// Suppress status output
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print debug diagnostics to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Settings that apply to a single run and are never saved.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct OverrideArgs {
    /// Source language code, or "auto" to detect it
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// Target language code (tr, en, de, fr, es, it, ar, ru)
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// Translation provider (openai, groq, libretranslate)
    #[arg(short = 'p', long)]
    pub provider: Option<String>,
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct WatchArgs {
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Never send a paste keystroke, even when auto-paste is on
    #[arg(long)]
    pub no_paste: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Watch the clipboard and translate new text (default)
    Watch(WatchArgs),
    /// Translate the current clipboard text once and print the result
    Translate(OverrideArgs),
    /// Save a single setting
    Set {
        /// Setting name (run `pluggo configure --show` to list them)
        key: String,
        /// New value
        value: String,
    },
    /// Edit settings interactively
    Configure {
        /// Show current settings
        #[arg(long)]
        show: bool,
    },
    /// List supported language codes
    Languages,
    /// List translation providers
    Providers,
}
