use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::{error, header, success, warning};
use std::process::Command;

/// Handle the `config` subcommand
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Config {
        print_config,
        edit_config,
        editor,
    } = &cli.command
    {
        let path = cli.config.clone().unwrap_or_else(Config::config_file);

        if *print_config {
            header(format!("Configuration ({})", path.display()));
            println!("{}", serde_yaml::to_string(&cfg.redacted())?);
        }

        if *edit_config {
            let default_editor = std::env::var("EDITOR")
                .or_else(|_| std::env::var("VISUAL"))
                .unwrap_or_else(|_| {
                    if cfg!(target_os = "windows") {
                        "notepad".to_string()
                    } else {
                        "nano".to_string()
                    }
                });
            let requested = editor.clone().unwrap_or_else(|| default_editor.clone());

            if run_editor(&requested, &path) {
                success(format!("Configuration edited with '{requested}'"));
            } else if requested != default_editor {
                warning(format!(
                    "Editor '{requested}' not available, falling back to '{default_editor}'"
                ));
                if run_editor(&default_editor, &path) {
                    success(format!("Configuration edited with '{default_editor}'"));
                } else {
                    error(format!("Failed to edit configuration with '{default_editor}'"));
                }
            } else {
                error(format!("Failed to edit configuration with '{requested}'"));
            }
        }
    }

    Ok(())
}

fn run_editor(editor: &str, path: &std::path::Path) -> bool {
    matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
}
