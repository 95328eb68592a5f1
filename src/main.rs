// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account page (terminal front end).
//!
//! Renders the login form or the account dashboard and feeds key presses
//! to the session controller.

use account_session::{
    config::Config,
    store::{FileStorage, PersistentStore},
    view, AccountSession,
};
use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok(); // so RUST_LOG from .env applies
    init_logging()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        api = %config.api_base_url,
        storage = %config.storage_dir.display(),
        "Starting account page"
    );

    let store = PersistentStore::new(FileStorage::new(&config.storage_dir));
    let mut session =
        AccountSession::from_config(&config, store).context("Failed to create session")?;
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    loop {
        println!("\n{}", view::render(&session));
        let Some(line) = prompt(&mut input, "> ").await? else {
            break;
        };
        let command = line.trim();

        if command == "q" {
            break;
        }
        if session.is_logged_in() {
            match command {
                "a" => {
                    session.purchase_tokens();
                }
                "p" => {
                    session.upgrade_subscription();
                }
                "d" => session.logout(),
                _ => {}
            }
            continue;
        }

        if command == "t" {
            session.toggle_mode();
            continue;
        }

        let email = match command {
            "" => prompt(&mut input, "Email : ").await?,
            other => Some(other.to_string()),
        };
        let Some(email) = email else { break };
        let Some(password) = prompt(&mut input, "Mot de passe : ").await? else {
            break;
        };
        session.set_email(email.trim());
        session.set_password(password);

        if let Err(e) = session.submit().await {
            alert(&mut input, &e.alert_message()).await?;
        }
    }

    Ok(())
}

/// Print `label` and read one line; `None` at end of input.
async fn prompt(input: &mut Input, label: &str) -> anyhow::Result<Option<String>> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(label.as_bytes()).await?;
    stdout.flush().await?;
    Ok(input.next_line().await?)
}

/// Show a message and wait for the user to acknowledge it.
async fn alert(input: &mut Input, message: &str) -> anyhow::Result<()> {
    println!("\n/!\\ {}", message);
    prompt(input, "[Entrée] OK").await?;
    Ok(())
}

/// Initialize logging to stderr; `LOG_FORMAT=json` switches to JSON lines.
fn init_logging() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("account_session=info,warn"))?;
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json");

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}
