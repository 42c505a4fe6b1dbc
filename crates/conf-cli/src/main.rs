//! confctl
//!
//! Command-line front end for typed configuration resolution.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use conf_core::ExportOptions;
use serde_json::Value;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .expect("Failed to set tracing subscriber");
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Get(args) => {
            let mut config = context::load_resolver(&cli.sources)?;
            let value = commands::run_get(&mut config, &args)?;
            print_json(&value)
        }
        Commands::Keys { prefix, suffix } => {
            let config = context::load_resolver(&cli.sources)?;
            for key in commands::run_keys(&config, prefix.as_deref(), suffix.as_deref()) {
                println!("{key}");
            }
            Ok(())
        }
        Commands::Export {
            keys,
            secrets,
            locals,
            include_secrets,
            include_locals,
            as_strings,
        } => {
            let export = ExportOptions {
                include_secrets,
                include_locals,
                as_strings,
            };
            let mut config = context::load_resolver(&cli.sources)?;
            let params = commands::run_export(&mut config, &keys, &secrets, &locals, export)?;
            print_json(&serde_json::to_value(params)?)
        }
        Commands::Encode { value } => {
            println!("{}", commands::run_encode(&value));
            Ok(())
        }
        Commands::Decode { value, iterations } => {
            let mut config = context::load_resolver(&cli.sources)?;
            println!("{}", commands::run_decode(&mut config, &value, iterations)?);
            Ok(())
        }
    }
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
