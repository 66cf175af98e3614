//! Deskwatch CLI entry point.
//!
//! Lists, inspects and marks help-desk notifications as read.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;

use deskwatch::api::http::HttpNotificationApi;
use deskwatch::api::Credential;
use deskwatch::config::Config;
use deskwatch::inbox::Inbox;
use deskwatch::notifications::presentation::{present, NotificationView};
use deskwatch::notifications::{enrich, RawNotification, Role};

/// Help-desk notification client.
#[derive(Parser)]
#[command(name = "deskwatch", version, about)]
struct Cli {
    /// Config file (defaults to `$DESKWATCH_CONFIG` or `~/.deskwatch/config.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Portal role whose classification rules apply.
    #[arg(long, global = true)]
    role: Option<Role>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Command {
    /// Fetch and show notifications.
    List {
        /// Only unread notifications.
        #[arg(long)]
        unread: bool,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Mark one notification as read.
    MarkRead {
        /// Notification id.
        id: i64,
        /// Update the local view before the server confirms.
        #[arg(long)]
        optimistic: bool,
    },
    /// Mark every unread notification as read.
    MarkAllRead,
    /// Interpret a message offline without calling the API.
    Inspect {
        /// Raw notification text.
        message: String,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            config.apply_overrides(|key| std::env::var(key).ok());
            config
        }
        None => Config::load().context("failed to load configuration")?,
    };
    if let Some(role) = cli.role {
        config.portal.role = role;
    }

    let _logging_guard = match &config.logging.dir {
        Some(dir) => Some(deskwatch::logging::init_file(dir, &config.logging.level)?),
        None => {
            deskwatch::logging::init_cli(&config.logging.level);
            None
        }
    };
    debug!(role = ?config.portal.role, base_url = %config.api.base_url, "configuration resolved");

    match cli.command {
        Command::Inspect { message, json } => handle_inspect(&config, message, json),
        Command::List { unread, json } => handle_list(&config, unread, json).await,
        Command::MarkRead { id, optimistic } => handle_mark_read(&config, id, optimistic).await,
        Command::MarkAllRead => handle_mark_all_read(&config).await,
    }
}

/// Enrich a single message locally and print its view.
fn handle_inspect(config: &Config, message: String, json: bool) -> anyhow::Result<()> {
    let now = chrono::Utc::now();
    let raw = RawNotification {
        id: 0,
        message,
        is_read: false,
        created_at: now,
    };
    let enriched = enrich(raw, config.portal.role);
    if json {
        println!("{}", serde_json::to_string_pretty(&enriched)?);
    } else {
        println!("category: {}", enriched.category);
        print_view(&present(&enriched, now));
    }
    Ok(())
}

/// Fetch the list and print it.
async fn handle_list(config: &Config, unread_only: bool, json: bool) -> anyhow::Result<()> {
    let (api, credential) = connect(config)?;
    let mut inbox = Inbox::new(config.portal.role);
    inbox
        .load(&*api, &credential)
        .await
        .context("failed to load notifications")?;

    let now = chrono::Utc::now();
    let selected: Vec<_> = inbox
        .notifications()
        .iter()
        .filter(|n| !unread_only || !n.raw.is_read)
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&selected)?);
        return Ok(());
    }

    println!(
        "{} notifications, {} unread",
        inbox.notifications().len(),
        inbox.unread_count()
    );
    for n in selected {
        print_view(&present(n, now));
    }
    Ok(())
}

/// Mark one notification as read.
async fn handle_mark_read(config: &Config, id: i64, optimistic: bool) -> anyhow::Result<()> {
    let (api, credential) = connect(config)?;
    let mut inbox = Inbox::new(config.portal.role);
    inbox
        .load(&*api, &credential)
        .await
        .context("failed to load notifications")?;

    let result = if optimistic {
        inbox
            .mark_read_optimistic(&*api, id, &credential)
            .await
    } else {
        inbox.mark_read(&*api, id, &credential).await
    };
    result.with_context(|| format!("failed to mark notification {id} as read"))?;

    println!("notification {id} marked as read");
    Ok(())
}

/// Mark all unread notifications as read.
async fn handle_mark_all_read(config: &Config) -> anyhow::Result<()> {
    let (api, credential) = connect(config)?;
    let mut inbox = Inbox::new(config.portal.role);
    inbox
        .load(&*api, &credential)
        .await
        .context("failed to load notifications")?;

    let marked = inbox
        .mark_all_read(Arc::clone(&api), &credential)
        .await
        .context("failed to mark notifications as read")?;
    println!("{marked} notifications marked as read");
    Ok(())
}

/// Build the API client and read the bearer token from the environment.
///
/// This is the only place the token is read; everything downstream takes it
/// as a parameter.
fn connect(config: &Config) -> anyhow::Result<(Arc<HttpNotificationApi>, Credential)> {
    // A local .env is optional.
    let _ = dotenvy::dotenv();
    let token = std::env::var(&config.api.token_env)
        .with_context(|| format!("missing bearer token in ${}", config.api.token_env))?;
    let api = HttpNotificationApi::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )
    .context("failed to create API client")?;
    Ok((Arc::new(api), Credential::bearer(token)))
}

fn print_view(view: &NotificationView) {
    let marker = if view.is_read { " " } else { "*" };
    println!("{marker} [{}] {} ({}) · {}", view.id, view.label, view.icon, view.age);
    println!("    {}", view.text);
    for line in &view.details {
        println!("    {}: {}", line.label, line.value);
    }
}
