//! RiskLens CLI - Command-line interface for the RiskLens analysis engine.

use clap::Parser;
use risklens_analysis::Analyzer;
use risklens_cli::commands;
use risklens_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize tracing (log to stderr so stdout stays parseable)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> risklens_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load config from the given path or the default location
    let path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };
    let mut config = Config::load_from(&path)?;

    // Apply threshold preset if specified
    if let Some(preset) = cli.preset {
        preset.apply(&mut config.analysis);
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);
    let analyzer = Analyzer::new(config.analysis.clone())?;

    // Handle commands
    match cli.command {
        Command::Similar(args) => commands::execute_similar(args, &analyzer, &formatter).await?,
        Command::Network(args) => commands::execute_network(args, &analyzer, &formatter).await?,
        Command::Cascades(args) => commands::execute_cascades(args, &analyzer, &formatter).await?,
        Command::Sentiment(args) => commands::execute_sentiment(args, &analyzer, &formatter).await?,
        Command::Summary(args) => {
            commands::execute_summary(args, config.settings.top, &formatter).await?;
        }
        Command::Layout(args) => {
            commands::execute_layout(args, &analyzer, &config.layout, &formatter).await?;
        }
        Command::Classify(args) => commands::execute_classify(args, &analyzer, &formatter).await?,
        Command::Alerts(args) => commands::execute_alerts(args, &analyzer, &formatter).await?,
        Command::Escalate(args) => {
            commands::execute_escalate(args, &analyzer, &config.settings.escalated_by, &formatter).await?;
        }
        Command::Interview(args) => commands::execute_interview(args, &formatter).await?,
        Command::Config(args) => commands::execute_config(args, &config, &path, &formatter).await?,
    }

    Ok(())
}
