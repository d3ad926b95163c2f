mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use civic_compass::CompassConfig;

use crate::cli::{Cli, Commands, SnapshotCommands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civic_compass=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CompassConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Political { reading, format } => {
            cli::political(&reading, &config, &format)?;
        }
        Commands::Sphere {
            reading,
            yaw,
            pitch,
            width,
            height,
            format,
        } => {
            cli::sphere(&reading, &config, yaw, pitch, width, height, &format)?;
        }
        Commands::Animate {
            reading,
            frames,
            fps,
            width,
        } => {
            cli::animate(&reading, &config, frames, fps, width)?;
        }
        Commands::Confidence { reading, format } => {
            cli::confidence(&reading, &config, &format)?;
        }
        Commands::Diff { from, to, format } => {
            cli::diff_readings(&from, &to, &format)?;
        }
        Commands::Snapshot { command } => match command {
            SnapshotCommands::Save {
                reading,
                name,
                questionnaire,
            } => {
                cli::snapshot_save(&cli.store, &reading, name, questionnaire)?;
            }
            SnapshotCommands::List {
                questionnaire,
                format,
            } => {
                cli::snapshot_list(&cli.store, questionnaire.as_deref(), &format)?;
            }
            SnapshotCommands::Show { id, format } => {
                cli::snapshot_show(&cli.store, &id, &format)?;
            }
            SnapshotCommands::Diff { from, to, format } => {
                cli::snapshot_diff(&cli.store, &from, &to, &format)?;
            }
            SnapshotCommands::Delete { id } => {
                cli::snapshot_delete(&cli.store, &id)?;
            }
        },
    }

    Ok(())
}
