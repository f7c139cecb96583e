use anyhow::Result;
use clap::Parser;

use pluggo::cli::commands::{configure, providers, translate, watch};
use pluggo::cli::{Args, Command, OverrideArgs};
use pluggo::logging;
use pluggo::output::{self, OutputConfig};
use pluggo::translation::{print_languages, validate_language};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig::from_flags(args.quiet, args.no_color));
    logging::init(args.verbose);

    match args.command {
        Some(Command::Languages) => {
            print_languages();
        }
        Some(Command::Providers) => {
            providers::print_providers()?;
        }
        Some(Command::Configure { show }) => {
            if show {
                configure::print_config()?;
            } else {
                configure::run_configure()?;
            }
        }
        Some(Command::Set { key, value }) => {
            configure::run_set(&key, &value)?;
        }
        Some(Command::Translate(overrides)) => {
            validate_overrides(&overrides)?;
            let code = translate::run_translate(overrides).await?;
            if code != exitcode::OK {
                std::process::exit(code);
            }
        }
        Some(Command::Watch(watch_args)) => {
            validate_overrides(&watch_args.overrides)?;
            watch::run_watch(watch_args).await?;
        }
        None => {
            validate_overrides(&args.watch.overrides)?;
            watch::run_watch(args.watch).await?;
        }
    }

    Ok(())
}

fn validate_overrides(overrides: &OverrideArgs) -> Result<()> {
    if let Some(ref lang) = overrides.from {
        validate_language(lang)?;
    }
    if let Some(ref lang) = overrides.to {
        validate_language(lang)?;
    }
    Ok(())
}
