mod api;
mod cli;
mod config;
mod errors;
mod scan;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    let result = match cli.command {
        cli::Commands::Serve(args) => cli::serve::handle_serve(args).await,
        cli::Commands::Validate(args) => handle_validate(args),
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                errors::ScandeckError::Config(_) => 2,
                errors::ScandeckError::Authentication(_) => 4,
                errors::ScandeckError::InvalidTarget(_) => 5,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

fn handle_validate(args: cli::commands::ValidateArgs) -> Result<(), errors::ScandeckError> {
    let target = scan::ScanTarget::parse(&args.target)?;
    println!("Target is allowed: {}", target);
    Ok(())
}
