//! Command-line configuration for the terminal runner.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::term::Theme;

#[derive(Parser, Debug, Clone)]
#[command(name = "blockfall", version, about = "Falling-block puzzle game for the terminal")]
pub struct Args {
    /// Seed for the piece sequence (defaults to the clock)
    #[arg(long)]
    pub seed: Option<u32>,

    /// Start the game paused
    #[arg(long)]
    pub paused: bool,

    /// Preferences file [default: $HOME/.config/blockfall/prefs.json]
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub prefs: Option<PathBuf>,

    /// Colour theme for this session (default, purple, blue, red, orange)
    #[arg(long, value_name = "NAME", value_parser = parse_theme)]
    pub theme: Option<Theme>,

    /// Write logs to this file; filter with RUST_LOG
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,
}

fn parse_theme(name: &str) -> Result<Theme, String> {
    Theme::from_name(name).ok_or_else(|| {
        format!("unknown theme '{name}' (expected one of: default, purple, blue, red, orange)")
    })
}

impl Args {
    /// Preference file to use, if one can be located.
    pub fn prefs_path(&self) -> Option<PathBuf> {
        self.prefs.clone().or_else(default_prefs_path)
    }

    /// Explicit seed, or one derived from the wall clock.
    pub fn seed_or_clock(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(1, |d| d.subsec_nanos() ^ (d.as_secs() as u32))
        })
    }
}

/// `$HOME/.config/blockfall/prefs.json`
pub fn default_prefs_path() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".config")
            .join("blockfall")
            .join("prefs.json")
    })
}
