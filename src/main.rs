// src/main.rs
// =============================================================================
// Entry point of the igdb-chat CLI.
//
// What happens here:
// 1. Load .env, set up logging (stderr, RUST_LOG, default "warn")
// 2. Parse arguments with clap and build Settings (env + flag overrides)
// 3. Run the requested command through IgdbApp
// 4. Print the message (text or JSON) and exit
//    (0 = success, 1 = the command replied with an error, 2 = unexpected error)
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use igdb_chat::commands::usage::help_message;
use igdb_chat::commands::{IgdbApp, Reply};
use igdb_chat::config::Settings;
use igdb_chat::message::{render_message, render_preview};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Logs go to stderr so stdout stays clean for messages and --json.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let settings = cli.apply_overrides(Settings::from_env());
    debug!(base_url = %settings.base_url, has_key = settings.api_key().is_some(), "settings loaded");

    execute(cli.command, cli.json, settings).await
}

// The help card needs no HTTP client, so it is answered before one is built.
async fn execute(command: Commands, json: bool, settings: Settings) -> Result<i32> {
    if let Commands::Igdb = command {
        return print_reply(Reply::ok(help_message(&settings)), json, render_message);
    }

    let app = IgdbApp::new(settings)?;

    match command {
        Commands::Igdb => print_reply(app.help(), json, render_message),
        Commands::Games { query } => print_reply(app.games(&query).await, json, render_message),
        Commands::Game { id_or_slug, scope } => {
            let args: Vec<String> = id_or_slug.into_iter().chain(scope).collect();
            print_reply(app.game(&args).await, json, render_message)
        }
        Commands::GameSearch { select: Some(id), .. } => {
            print_reply(app.game_search_select(&id).await, json, render_message)
        }
        Commands::GameSearch { query, select: None } => print_reply(
            app.game_search_preview(&query).await,
            json,
            render_preview,
        ),
    }
}

// Prints a reply and turns it into the exit code.
fn print_reply<T, F>(reply: Reply<T>, json: bool, render: F) -> Result<i32>
where
    T: Serialize,
    F: Fn(&T) -> String,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&reply.body)?);
    } else {
        println!("{}", render(&reply.body));
    }

    Ok(if reply.failed { 1 } else { 0 })
}
