//! Sketch replay: drive the editor from a command script

use std::fs;
use std::path::{Path as FsPath, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use sk_cad::{CommandOutcome, Editor, EditorConfig, EngineCommand};
use sk_core::export::document_to_dxf;
use sk_core::{ExportOptions, Scene, export_scene};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// DXF R2000 (AC1015) text
    Dxf,
    /// Interchange document as JSON
    Json,
}

#[derive(Parser)]
#[command(name = "sketch-replay")]
#[command(about = "Replay profile sketch commands and export the resulting scene")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a RON list of engine commands
    Run {
        /// Command script
        script: PathBuf,

        /// Editor configuration (RON); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Scene to start from (RON); starts empty when omitted
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "dxf")]
        format: OutputFormat,

        /// Layer written on every entity
        #[arg(long)]
        layer: Option<String>,

        /// Also write the final scene as RON
        #[arg(long)]
        save_scene: Option<PathBuf>,
    },
    /// Print the default editor configuration as RON
    Config,
}

fn main() -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sk_cli=info,sk_cad=info,sk_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Run {
            script,
            config,
            scene,
            output,
            format,
            layer,
            save_scene,
        } => {
            let config = match config {
                Some(path) => EditorConfig::load(&path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => EditorConfig::default(),
            };
            let scene = match scene {
                Some(path) => load_scene(&path)?,
                None => Scene::new(),
            };
            let commands = load_script(&script)?;

            let mut editor = Editor::with_scene(scene, config);
            let committed = replay(&mut editor, &commands)?;
            tracing::info!(
                "Replayed {} commands, {} committed, {} paths in scene",
                commands.len(),
                committed,
                editor.scene().len()
            );

            if let Some(path) = save_scene {
                let text = editor.scene().to_ron()?;
                fs::write(&path, text)
                    .with_context(|| format!("Failed to write scene {}", path.display()))?;
            }

            let mut options = ExportOptions::default();
            if let Some(layer) = layer {
                options.layer = layer;
            }
            let document = export_scene(editor.scene(), &options);
            let fallbacks = document.outcomes.iter().filter(|o| o.fallback).count();
            if fallbacks > 0 {
                tracing::warn!("{} path(s) exported through the sampled fallback", fallbacks);
            }
            let text = match format {
                OutputFormat::Dxf => document_to_dxf(&document, &options),
                OutputFormat::Json => document.to_json()?,
            };

            match output {
                Some(path) => {
                    fs::write(&path, text)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    tracing::info!(
                        "Wrote {} primitives to {}",
                        document.primitives.len(),
                        path.display()
                    );
                }
                None => print!("{text}"),
            }
        }
        Command::Config => {
            print!("{}", EditorConfig::default().to_ron_string()?);
        }
    }
    Ok(())
}

fn load_script(path: &FsPath) -> Result<Vec<EngineCommand>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    ron::from_str(&text).with_context(|| format!("Failed to parse script {}", path.display()))
}

fn load_scene(path: &FsPath) -> Result<Scene> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene {}", path.display()))?;
    Ok(Scene::from_ron(&text)?)
}

/// Apply every command; a failing command is reported and skipped
///
/// Returns the number of committed outcomes.
fn replay(editor: &mut Editor, commands: &[EngineCommand]) -> Result<usize> {
    let mut committed = 0;
    let mut failures = 0;
    for (index, command) in commands.iter().enumerate() {
        match editor.handle(*command) {
            Ok(outcome) => {
                if matches!(outcome, CommandOutcome::Committed { .. }) {
                    committed += 1;
                }
            }
            Err(e) => {
                failures += 1;
                tracing::warn!("Command {} ({:?}) failed: {}", index, command, e);
            }
        }
    }
    if failures == commands.len() && !commands.is_empty() {
        bail!("Every command in the script failed");
    }
    Ok(committed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_counts_commits_and_skips_failures() {
        let script = r#"[
            SwitchTool(Circle),
            Click(point: (0.0, 0.0)),
            NumericOverride(field: Radius, value: -1.0),
            NumericOverride(field: Radius, value: 5.0),
        ]"#;
        let commands: Vec<EngineCommand> = ron::from_str(script).unwrap();
        let mut editor = Editor::default();

        assert_eq!(replay(&mut editor, &commands).unwrap(), 1);
        assert_eq!(editor.scene().len(), 1);
    }

    #[test]
    fn test_ignored_commands_are_not_failures() {
        let commands = vec![EngineCommand::NumericOverride {
            field: sk_cad::NumericField::Radius,
            value: 3.0,
        }];
        let mut editor = Editor::default();
        editor.handle(EngineCommand::SwitchTool(sk_cad::ToolKind::Fillet)).unwrap();
        assert_eq!(replay(&mut editor, &commands).unwrap(), 0);
    }
}
