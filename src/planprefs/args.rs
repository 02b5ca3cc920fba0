use clap::{Parser, Subcommand};
use planprefs::matcher::MatchMode;
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    " ",
    env!("GIT_COMMIT_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "planprefs")]
#[command(about = "Plan viewer display preferences and custom-node matching", long_about = None)]
#[command(version, long_version = LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Preference directory (defaults to $PLANPREFS_HOME, then the user data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a stored preference (cookie name or alias, e.g. custom)
    Get { key: String },

    /// Store a preference
    Set {
        key: String,

        value: String,

        /// Days until the value expires (defaults to expiry-days)
        #[arg(long)]
        days: Option<i64>,
    },

    /// Remove a preference
    #[command(alias = "rm")]
    Delete { key: String },

    /// List live preferences
    #[command(alias = "ls")]
    List,

    /// Show resolved display preferences, writing first-read defaults
    Show,

    /// Save the timeline layout
    Layout {
        /// Pixels per time increment
        #[arg(allow_negative_numbers = true)]
        pixels: i64,
        /// Token height
        #[arg(allow_negative_numbers = true)]
        height: i64,
        /// Scaling
        #[arg(allow_negative_numbers = true)]
        scale: i64,
    },

    /// Check whether a node is a custom node (prints true or false)
    #[command(alias = "m")]
    Match {
        /// Candidate strings, e.g. node id, label and type
        #[arg(required = true, num_args = 1..=3)]
        candidates: Vec<String>,

        /// Override the configured match mode
        #[arg(long, value_parser = parse_mode)]
        mode: Option<MatchMode>,
    },

    /// Show the parsed custom-node patterns
    Patterns,

    /// Print the first-load plan controls markup
    Controls {
        /// Text placed before the controls
        #[arg(long, default_value = "")]
        banner: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (expiry-days, match-mode)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

fn parse_mode(s: &str) -> Result<MatchMode, String> {
    s.parse()
}
