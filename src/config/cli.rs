use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the postboard binary.
#[derive(Debug, Parser)]
#[command(
    name = "postboard",
    version,
    about = "Session client for a remote REST posts service"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "POSTBOARD_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run an interactive session reading commands from stdin.
    Shell(ShellArgs),
    /// Fetch one batch of posts, print it and exit.
    Fetch(FetchArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the base URL of the posts service.
    #[arg(long = "api-base-url", value_name = "URL", global = true)]
    pub api_base_url: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ShellArgs {
    /// Skip the batch fetched when the session starts.
    #[arg(long = "no-initial-fetch", action = clap::ArgAction::SetTrue)]
    pub no_initial_fetch: bool,

    /// Number of posts fetched when the session starts.
    #[arg(long = "initial-count", value_name = "COUNT")]
    pub initial_count: Option<u32>,
}

#[derive(Debug, Args, Clone)]
pub struct FetchArgs {
    /// Number of posts to fetch (1-100).
    #[arg(value_name = "COUNT")]
    pub count: u32,

    /// Fixed offset of the first post instead of a random one.
    #[arg(long = "start", value_name = "OFFSET")]
    pub start: Option<u32>,

    /// Also write the rendered posts as an HTML document.
    #[arg(long = "html", value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub html: Option<PathBuf>,
}
