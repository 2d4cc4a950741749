//! # Moodfacts
//!
//! Terminal front end. The browser parts of the flow map onto the terminal
//! like this:
//!
//! - the page is printed after each run instead of drawn
//! - "navigating" to the authorization URL prints it
//! - the URL the browser lands on after login is passed back with
//!   `run --redirect-url`
//! - local storage is a SQLite file in the data directory
//!
//! ## Usage
//!
//! ```bash
//! moodfacts login
//! moodfacts run --redirect-url 'https://aaes250.github.io/test-app/#access_token=...'
//! moodfacts run
//! moodfacts logout
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info};
use moodfacts::api::SpotifyClient;
use moodfacts::cli::{self, Command};
use moodfacts::completion;
use moodfacts::config::{self, Config};
use moodfacts::facts::{self, ThreadRandom};
use moodfacts::flow::FlowController;
use moodfacts::mood;
use moodfacts::page::{Location, Page};
use moodfacts::token_store::SqliteTokenStore;
use std::path::Path;

type TerminalController = FlowController<SqliteTokenStore, SpotifyClient, Page, Location>;

/// Loads config and opens storage, ready for a fresh page load.
fn open_controller(config_path: Option<&Path>, data_dir: Option<&Path>) -> Result<TerminalController> {
    let data_dir = config::get_data_dir(data_dir)?;
    let config = Config::load(config_path, &data_dir)?;

    let storage = config::storage_path(&data_dir);
    debug!("Using credential storage at {}", storage.display());

    let store = SqliteTokenStore::open(&storage, &config.origin(), &config.storage_key)?;
    let api = SpotifyClient::new(&config.api_base, config.recently_played_limit)
        .context("Failed to build HTTP client")?;
    let location = Location::new(config.redirect_uri.clone());

    Ok(FlowController::new(
        config,
        store,
        api,
        Page::default(),
        location,
        Box::new(ThreadRandom),
    ))
}

/// Main entry point.
///
/// Logging is controlled via `RUST_LOG`:
/// - `RUST_LOG=debug moodfacts run` - Enable debug logging
/// - `RUST_LOG=moodfacts::flow=trace moodfacts run` - Module-specific logging
fn main() -> Result<()> {
    env_logger::init();

    let args = cli::Args::parse();
    let config_path = args.config.as_deref();
    let data_dir = args.data_dir.as_deref();

    match args.command {
        Command::Run { redirect_url } => {
            let mut controller = open_controller(config_path, data_dir)?;
            let location = redirect_url.unwrap_or_else(|| controller.config().redirect_uri.clone());
            controller.start(&location)?;
            print!("{}", controller.renderer());
        }
        Command::Login => {
            let mut controller = open_controller(config_path, data_dir)?;
            controller.login()?;
            if let Some(url) = controller.navigator().last_navigation() {
                println!("Open this URL in your browser to log in:");
                println!("{url}");
                println!();
                println!("Then run: moodfacts run --redirect-url '<the URL you were sent back to>'");
            }
        }
        Command::Logout => {
            let mut controller = open_controller(config_path, data_dir)?;
            controller.logout()?;
            info!("Stored credential cleared");
            print!("{}", controller.renderer());
        }
        Command::Classify { valence, energy } => {
            println!("{}", mood::classify(valence, energy));
        }
        Command::Fact { mood } => {
            println!("{}", facts::pick_fact_for_label(&mood, &mut ThreadRandom));
        }
        Command::Completion { shell } => {
            let mut cmd = cli::Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
    }

    Ok(())
}
