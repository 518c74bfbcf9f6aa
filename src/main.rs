use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mailgate::configuration::get_configuration;
use mailgate::startup::Application;
use mailgate::telemetry::{get_subscriber, init_subscriber};

#[derive(Parser)]
#[command(name = "mailgate", version, about = "Mailchimp subscription proxy")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST server
    Server {
        /// Path to the TOML configuration file
        config_path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let subscriber = get_subscriber("mailgate".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    match cli.command {
        Command::Server { config_path } => {
            let configuration =
                get_configuration(&config_path).context("Failed to read configuration")?;
            let application =
                Application::build(configuration).context("Failed to build application")?;
            tracing::info!("listening on port {}", application.port());
            application.run_until_stopped().await?;
        }
    }

    Ok(())
}
