//! Mood facts from your listening history.
//!
//! Logs in to the streaming service with the OAuth implicit grant, reads the
//! user's 20 most recently played tracks, averages their valence and energy,
//! maps the average to one of five moods and shows a trivia fact for it.
//!
//! Core modules:
//! - [`mood`] - Classification and averaging
//! - [`facts`] - Fact table and random selection
//! - [`flow`] - State machine and controller tying everything together
//! - [`api`] - Streaming API client
//! - [`token_store`] - Persisted credential
//!
//! ### Supporting Modules
//!
//! - [`auth`] - Authorization URL and redirect fragment parsing
//! - [`page`] - Renderer and navigator capabilities, terminal page model
//! - [`config`] - Configuration and data directory management
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//! - [`error`] - Error taxonomy
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use moodfacts::api::SpotifyClient;
//! use moodfacts::config::{self, Config};
//! use moodfacts::facts::ThreadRandom;
//! use moodfacts::flow::FlowController;
//! use moodfacts::page::{Location, Page};
//! use moodfacts::token_store::SqliteTokenStore;
//!
//! let config = Config::default();
//! let data_dir = config::get_data_dir(None)?;
//! let store = SqliteTokenStore::open(&config::storage_path(&data_dir), &config.origin(), &config.storage_key)?;
//! let api = SpotifyClient::new(&config.api_base, config.recently_played_limit)?;
//! let location = Location::new(config.redirect_uri.clone());
//!
//! let mut controller = FlowController::new(config, store, api, Page::default(), location, Box::new(ThreadRandom));
//! controller.start("https://aaes250.github.io/test-app/#access_token=...")?;
//! print!("{}", controller.renderer());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Failures of the loading sequence are [`error::MoodError`] values and end
//! up as text in the page's error region. Infrastructure failures (storage,
//! config files) are `anyhow::Error`s returned to the caller.

pub mod api;
pub mod auth;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod facts;
pub mod flow;
pub mod mood;
pub mod page;
pub mod token_store;
