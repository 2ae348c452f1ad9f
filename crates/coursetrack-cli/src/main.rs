mod config;
mod display;

use anyhow::Context;
use chrono::{Datelike, Local};
use clap::Parser;
use coursetrack_client::{AggregateError, Aggregator, HttpClient};
use coursetrack_core::{MonthGrid, sort_for_display};
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("coursetrack v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    let client = HttpClient::with_timeout(cli.base_url.clone(), cli.auth(), cli.timeout())
        .context("building HTTP client")?;
    let aggregator = Aggregator::new(client, cli.role).with_max_concurrent_courses(cli.max_concurrent);

    match cli.command {
        Command::Status => {
            let mut resolution = aggregator.load_dashboard().await.map_err(session_hint)?;
            sort_for_display(&mut resolution.items);
            print!("{}", display::render_status(&resolution.items, &Local));
            eprint!("{}", display::render_failures(&resolution.failures));
        }
        Command::Calendar { year, month } => {
            let resolution = aggregator.load_calendar().await.map_err(session_hint)?;
            let now = Local::now();
            let grid = MonthGrid::build(
                year.unwrap_or(now.year()),
                month.unwrap_or(now.month()),
                &resolution.items,
                &now,
            )
            .context("building month grid")?;
            print!("{}", display::render_month(&grid, &Local));
            eprint!("{}", display::render_failures(&resolution.failures));
        }
    }
    Ok(())
}

fn session_hint(err: AggregateError) -> anyhow::Error {
    match err {
        AggregateError::AuthRequired => {
            anyhow::Error::new(err).context("session rejected; check COURSETRACK_TOKEN")
        }
        other => anyhow::Error::new(other).context("loading courses"),
    }
}
