use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "scandeck", version, about = "Authenticated HTTP API for allow-listed security scans")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP REST API server
    Serve(ServeArgs),
    /// Check a target against the scan allow-list
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Bind address (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides the config file)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Deployment mode: production or development (overrides the config file)
    #[arg(long)]
    pub mode: Option<String>,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Target host to check
    pub target: String,
}
