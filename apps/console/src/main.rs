use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{EmployeeDirectory, HttpEmployeeStore};
use shared::domain::SortKey;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;
mod shell;

use commands::EmployeeFields;
use config::{load_settings, Settings};

#[derive(Parser, Debug)]
#[command(name = "employees", about = "Browse and edit records of a remote employee store")]
struct Cli {
    /// Base URL of the employee store, e.g. http://localhost:3003
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Settings file (defaults to ./employees.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    page_size: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print one page of the employee list
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, default_value = "name")]
        sort: SortKey,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Create an employee
    Add(EmployeeFields),
    /// Update an employee; omitted fields keep their current value
    Edit {
        id: String,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Delete an employee
    Delete { id: String },
    /// Interactive list/search/sort/edit session
    Shell,
}

impl Cli {
    fn apply_overrides(&self, settings: &mut Settings) {
        if let Some(url) = &self.api_url {
            settings.api_base_url = url.clone();
        }
        if let Some(size) = self.page_size.filter(|size| *size > 0) {
            settings.page_size = size;
        }
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (mut settings, warnings) = load_settings(cli.config.as_deref());
    cli.apply_overrides(&mut settings);

    init_tracing(&settings.log_filter);
    for warning in warnings {
        warn!("settings: {warning}");
    }

    let store = HttpEmployeeStore::with_timeout(
        &settings.api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .context("failed to set up the employee store client")?;
    info!(url = store.base_url(), "using employee store");
    let directory = EmployeeDirectory::new(Arc::new(store));
    let page_size = settings.page_size;

    match cli.command {
        Command::List { search, sort, page } => {
            commands::list(&directory, page_size, search, sort, page).await
        }
        Command::Add(fields) => commands::add(&directory, page_size, &fields).await,
        Command::Edit { id, fields } => commands::edit(&directory, page_size, &id, &fields).await,
        Command::Delete { id } => commands::delete(&directory, &id).await,
        Command::Shell => shell::Shell::new(&directory, page_size).run().await,
    }
}
