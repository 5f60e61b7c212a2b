//! Command-line interface definition.
//!
//! Lives in the library so `xtask` can render the man page from it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(name = "lipcue")]
#[command(about = "Lip-sync cue points: inspect, query and replay mouth cue files")]
#[command(
    long_about = "lipcue works with Rhubarb-style mouth cue files \
({ \"mouthCues\": [{ \"start\", \"value\" }] }).\n\n\
It lists cues, answers nearest-cue and highlight queries, simulates \
waveform clicks, and replays a full playback through a headless session \
to show which cue cards would light up and when."
)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "LIPCUE_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the cues in a cue file
    #[command(long_about = "List every cue in a cue file with its time, id, \
label and mouth-shape image index (A-H map to 0-7, anything else to 8).")]
    Cues {
        /// Path to the cue file
        file: String,
    },

    /// Print the cue nearest to a time
    Nearest {
        /// Path to the cue file
        file: String,
        /// Time in seconds
        time: f64,
        /// Window in seconds (defaults to sync.nearest_threshold)
        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Print the cues that would be highlighted at a time
    Active {
        /// Path to the cue file
        file: String,
        /// Time in seconds
        time: f64,
    },

    /// Simulate a click on the waveform
    Click(ClickArgs),

    /// Replay a full playback through a headless session
    #[command(long_about = "Drive a headless session through play, \
periodic time updates and the final pause, printing highlight \
transitions and the current mouth shape. With --from, play a single \
cue and stop where the next one starts. Ctrl-C stops the replay.")]
    Replay(ReplayArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct ClickArgs {
    /// Path to the cue file
    pub file: String,
    /// Horizontal click position in pixels
    #[arg(long)]
    pub x: f64,
    /// Width of the waveform view in pixels
    #[arg(long)]
    pub width: f64,
    /// Audio duration in seconds
    #[arg(long)]
    pub duration: f64,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// Path to the cue file
    pub file: String,
    /// Audio duration in seconds
    #[arg(long)]
    pub duration: f64,
    /// Seconds between time updates
    #[arg(long, default_value_t = 0.25)]
    pub step: f64,
    /// Sleep between time updates as real playback would
    #[arg(long)]
    pub realtime: bool,
    /// Play only the cue with this id, stopping where the next cue starts
    #[arg(long, value_name = "CUE_ID")]
    pub from: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
