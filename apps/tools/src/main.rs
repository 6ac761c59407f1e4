mod simulate;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use shared::domain::NotificationRequest;
use tracing_subscriber::EnvFilter;
use valentine_core::{deliver, load_settings, InteractionController};

use crate::simulate::Scenario;

#[derive(Parser, Debug)]
struct Cli {
    /// Settings file; defaults to ./valentine.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the question headlessly and print every step.
    Simulate {
        #[arg(long, default_value_t = 0)]
        declines: u64,
        #[arg(long)]
        accept: bool,
        #[arg(long)]
        fail_notification: bool,
    },
    /// List the decline phrases in display order.
    Phrases,
    /// Send one real notification through the configured provider.
    SendTest {
        #[arg(long, default_value_t = 0)]
        declines: u64,
    },
    /// Print effective settings with credentials redacted.
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;

    match cli.command {
        Command::Simulate {
            declines,
            accept,
            fail_notification,
        } => {
            let controller = InteractionController::new(
                settings.presentation.clone(),
                settings.notification.message.clone(),
            );
            let lines = simulate::run(
                controller,
                Scenario {
                    declines,
                    accept,
                    fail_notification,
                },
            )
            .await?;
            for line in lines {
                println!("{line}");
            }
        }
        Command::Phrases => {
            for (index, phrase) in settings.presentation.decline_phrases.iter().enumerate() {
                println!("{index:>2}  {phrase}");
            }
        }
        Command::SendTest { declines } => {
            let collaborator = emailjs_integration::build_collaborator(&settings.notification);
            let request = NotificationRequest::new(settings.notification.message.clone(), declines);
            tracing::info!(
                collaborator = collaborator.name(),
                rejection_count = declines,
                "sending test notification"
            );
            match deliver(collaborator.as_ref(), &request).await {
                Ok(()) => println!("sent via {}", collaborator.name()),
                Err(err) => bail!("send via {} failed: {err}", collaborator.name()),
            }
        }
        Command::ShowConfig => {
            let rendered = toml::to_string_pretty(&settings.redacted())
                .context("failed to render settings")?;
            print!("{rendered}");
        }
    }

    Ok(())
}
