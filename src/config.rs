//! Command-line configuration

use crate::playback::Speed;
use clap::Parser;
use std::path::PathBuf;

/// Step-through animations of programming concepts
#[derive(Debug, Clone, Parser)]
#[command(name = "conceptty", version, about)]
pub struct Config {
    /// Topic to open
    #[arg(default_value = "event-loop")]
    pub topic: String,

    /// Extra topic documents (JSON) to add to the catalog
    #[arg(long = "topic-file", value_name = "FILE")]
    pub topic_files: Vec<PathBuf>,

    /// Initial playback speed: 0.5, 1, 1.5 or 2
    #[arg(long, default_value = "1")]
    pub speed: Speed,

    /// Start playing immediately
    #[arg(long)]
    pub autoplay: bool,

    /// Print the available topics and exit
    #[arg(long)]
    pub list: bool,

    /// Write logs to this file (filtered by RUST_LOG, default `info`)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_args() -> Self {
        Config::parse()
    }
}
