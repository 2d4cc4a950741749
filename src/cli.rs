//! # Command-Line Interface Module
//!
//! Clap derive definitions for the `moodfacts` binary.
//!
//! ## Commands
//!
//! - `run`: Load the credential (stored, or from a redirect URL) and show the mood
//! - `login`: Print the authorization URL to open in a browser
//! - `logout`: Forget the stored credential
//! - `classify`: Classify a valence/energy pair offline
//! - `fact`: Pick a fact for a mood offline
//!
//! ## Examples
//!
//! ```bash
//! moodfacts login
//! moodfacts run --redirect-url 'https://aaes250.github.io/test-app/#access_token=...'
//! moodfacts run
//! moodfacts classify 0.8 0.7
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser)]
#[command(name = "moodfacts")]
#[command(about = "Guess your mood from recently played tracks and get a matching fact")]
#[command(version)]
pub struct Args {
    /// JSON config file overriding client id, redirect URI, endpoints...
    #[arg(long, global = true, env = "MOODFACTS_CONFIG", value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Directory holding the credential store (defaults to the platform data dir)
    #[arg(long, global = true, env = "MOODFACTS_DATA_DIR", value_hint = clap::ValueHint::DirPath)]
    pub data_dir: Option<PathBuf>,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the mood of your recently played tracks
    ///
    /// Uses the stored credential if there is one. Otherwise the credential
    /// is read from the `access_token` fragment of --redirect-url, stored,
    /// and the fragment dropped.
    Run {
        /// URL the browser was redirected to after login
        #[arg(long, env = "MOODFACTS_REDIRECT_URL", value_hint = clap::ValueHint::Url)]
        redirect_url: Option<String>,
    },

    /// Print the authorization URL
    ///
    /// Open it in a browser, approve access, then pass the URL you land on
    /// to `moodfacts run --redirect-url`.
    Login,

    /// Forget the stored credential
    Logout,

    /// Classify a valence/energy pair without calling the API
    Classify {
        /// Musical positiveness, 0.0 to 1.0
        #[arg(allow_negative_numbers = true)]
        valence: f64,

        /// Perceived intensity, 0.0 to 1.0
        #[arg(allow_negative_numbers = true)]
        energy: f64,
    },

    /// Print a random fact for a mood
    ///
    /// Unknown moods get a Curious fact.
    Fact {
        #[arg(value_hint = clap::ValueHint::Other)]
        mood: String,
    },

    /// Generate shell completions
    ///
    /// Usage: moodfacts completion bash > ~/.local/share/bash-completion/completions/moodfacts
    Completion {
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_redirect() {
        let args = Args::try_parse_from([
            "moodfacts",
            "run",
            "--redirect-url",
            "https://x/#access_token=abc",
        ])
        .unwrap();

        match args.command {
            Command::Run { redirect_url } => {
                assert_eq!(redirect_url.as_deref(), Some("https://x/#access_token=abc"));
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_classify() {
        let args = Args::try_parse_from(["moodfacts", "classify", "0.8", "-0.1"]).unwrap();
        match args.command {
            Command::Classify { valence, energy } => {
                assert_eq!(valence, 0.8);
                assert_eq!(energy, -0.1);
            }
            _ => panic!("expected classify"),
        }
    }

    #[test]
    fn test_global_data_dir_after_subcommand() {
        let args = Args::try_parse_from(["moodfacts", "logout", "--data-dir", "/tmp/mf"]).unwrap();
        assert_eq!(args.data_dir, Some(PathBuf::from("/tmp/mf")));
    }

    #[test]
    fn test_no_hidden_subcommands() {
        let cmd = Args::command();
        let names: Vec<&str> = cmd
            .get_subcommands()
            .filter(|sub| !sub.is_hide_set())
            .map(|sub| sub.get_name())
            .collect();

        assert_eq!(names, ["run", "login", "logout", "classify", "fact", "completion"]);
        assert_eq!(cmd.get_subcommands().count(), names.len());
        assert!(Args::try_parse_from(["moodfacts", "complete-moods"]).is_err());
    }
}
