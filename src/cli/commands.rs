//! CLI command implementations

use anyhow::Result;
use chrono::Utc;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;
use std::path::PathBuf;

use crate::artifacts::{render_json, render_text, write_artifacts, RunReport, TranscriptSource};
use crate::cli::args::{Cli, ConfigCommand, OutputFormat};
use crate::config::Settings;
use crate::llm::{build_client, CompletionClient};
use crate::pipeline::TranscriptPipeline;

/// Summarize a transcript and extract its action items
pub async fn process_transcript(
    settings: &Settings,
    source: TranscriptSource,
    format: OutputFormat,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let transcript = source.read()?;

    let client = build_client(settings)?;
    let pipeline = TranscriptPipeline::from_settings(client, settings);

    let run_id = uuid::Uuid::new_v4();
    let result = pipeline
        .process_with_id(run_id, &transcript)
        .await
        .map_err(|e| anyhow::anyhow!("Error processing transcript: {}", e))?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&result)),
        OutputFormat::Json => {
            let report = RunReport {
                run_id,
                processed_at: Utc::now(),
                provider: pipeline.client().provider(),
                model: pipeline.client().model(),
                result: &result,
            };
            println!("{}", render_json(&report)?);
        }
    }

    if let Some(dir) = output_dir {
        let paths = write_artifacts(&dir, &result)?;
        match format {
            OutputFormat::Text => {
                println!();
                println!("Summary saved to: {}", paths.summary.display());
                println!("Action items saved to: {}", paths.action_items.display());
            }
            OutputFormat::Json => {
                tracing::info!(
                    "Artifacts saved to {} and {}",
                    paths.summary.display(),
                    paths.action_items.display()
                );
            }
        }
    }

    Ok(())
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let mut shown = settings.clone();
            if !shown.llm.api_key.is_empty() {
                shown.llm.api_key = "********".to_string();
            }
            let toml = toml::to_string_pretty(&shown)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => {
            let path = Settings::config_path()?;
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at {}. Use --force to overwrite.",
                    path.display()
                );
            }
            Settings::write_default(&path)?;
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// Print completion script for the requested shell.
pub fn print_completions(shell: Shell, out: &mut impl Write) {
    let mut cmd = Cli::command();
    let command_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, command_name, out);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completions_reference_subcommands() {
        let mut out = Vec::new();
        print_completions(Shell::Bash, &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("recap"));
        assert!(script.contains("process"));
    }
}
