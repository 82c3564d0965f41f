mod app;
mod cli;
mod component;
mod components;
mod event;
mod theme;
mod widgets;

use anyhow::Context;
use clap::Parser;

use contact_proto::action::ActionFile;
use contact_proto::config::Config;

use crate::app::Outcome;
use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = contact_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("quickcontact.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; stdout carries the pick, so logs go to a file.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    tracing::info!("quickcontact starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_default();

    let actions_path = cli.actions.unwrap_or_else(|| config.paths.actions_file.clone());
    let file = ActionFile::load(&actions_path)
        .with_context(|| format!("cannot open actions from {}", actions_path.display()))?;

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(file.actions, &config.ui);
    match app.run().await? {
        Outcome::Picked(pick) => {
            if cli.json {
                println!("{}", serde_json::to_string(&pick)?);
            } else {
                println!("{}", pick.target());
            }
            Ok(())
        }
        Outcome::Dismissed | Outcome::Quit => {
            tracing::info!("no action picked");
            std::process::exit(1);
        }
    }
}
