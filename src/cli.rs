use std::path::PathBuf;

use clap::Parser;
use clap::builder::FalseyValueParser;

use crate::render::RenderMode;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Probe a list of URLs concurrently and show their response latency live in the terminal."
)]
pub struct Cli {
    /// Path to the configuration file (.json, .yml or .yaml)
    #[arg(short = 'c', long = "config", env = "CONFIG_FILE", default_value = "config.json")]
    pub config: PathBuf,

    /// How results are presented
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = RenderMode::Auto)]
    pub mode: RenderMode,

    /// Disable colored output. Any non-empty NO_COLOR other than a
    /// false-like value ("0", "false", "no", "off") also disables it.
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = FalseyValueParser::new()
    )]
    pub no_color: bool,

    /// Wait for Enter before exiting
    #[arg(long = "pause")]
    pub pause: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
