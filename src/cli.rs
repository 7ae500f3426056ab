use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "add-license",
    about = "Pick an open-source license and write it to your project's LICENSE file",
    version
)]
pub struct Cli {
    /// Workspace root that receives the LICENSE file
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// License key to use instead of choosing interactively (e.g. mit, apache-2.0)
    #[arg(short, long, value_name = "KEY")]
    pub license: Option<String>,

    /// Print the available licenses and exit
    #[arg(long)]
    pub list: bool,

    /// Output format for --list
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub format: ListFormat,

    /// Overwrite an existing LICENSE without asking
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Always query the API, ignoring the configured cache
    #[arg(long)]
    pub no_cache: bool,

    /// Config file [default: ./.add-license/config.toml, fallback ~/.config/add-license/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log requests and cache activity to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ListFormat {
    Terminal,
    Json,
}
