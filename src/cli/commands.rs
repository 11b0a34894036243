//! Command handlers

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::{OutputFormat, VisualizeService};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::CliResult;
use crate::config::{global_config_path, BuildMode, KeyKind, Settings};

pub fn execute_command(cli: &Cli, command: &Commands) -> CliResult<()> {
    let load_settings = || -> CliResult<Settings> {
        let settings = Settings::load(cli.config.as_deref())?;
        debug!("settings: {:?}", settings);
        Ok(settings)
    };

    match command {
        Commands::LevelOrder { values, format } => {
            _render(load_settings()?, BuildMode::LevelOrder, values, *format)
        }
        Commands::Balanced {
            keys,
            text,
            heights,
            format,
        } => {
            let mut settings = load_settings()?;
            if *text {
                settings.key_kind = KeyKind::Text;
            }
            if *heights {
                settings.show_heights = true;
            }
            _render(settings, BuildMode::Balanced, keys, *format)
        }
        Commands::Show {
            input,
            mode,
            format,
        } => {
            let settings = load_settings()?;
            let mode = mode.unwrap_or(settings.mode);
            _render(settings, mode, input, *format)
        }
        Commands::Config { command } => _config(&load_settings()?, command),
        Commands::Completion { shell } => {
            _completion(*shell);
            Ok(())
        }
    }
}

fn _completion(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}

#[instrument(skip(settings))]
fn _render(settings: Settings, mode: BuildMode, input: &str, format: OutputFormat) -> CliResult<()> {
    let service = VisualizeService::new(settings);
    let rendered = service.render(mode, input, format)?;
    output::info(rendered.trim_end());
    Ok(())
}

#[instrument(skip(settings))]
fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => match global_config_path() {
            Some(path) => {
                let state = if path.exists() { "found" } else { "not found" };
                output::action("global", &format!("{} ({})", path.display(), state));
            }
            None => output::action("global", "no config directory on this platform"),
        },
    }
    Ok(())
}
