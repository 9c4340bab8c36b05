// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # XRPL Signing Preview
//!
//! Entry point for the `xrpl-preview` binary. Parses CLI arguments,
//! initializes logging, and runs one subcommand:
//!
//! - `sample` — encode the built-in payment before and after signing
//!   (the default)
//! - `encode` — encode a JSON transaction from a file
//! - `decode` — decode hex back to JSON
//! - `hash`   — transaction ID or signing hash of a JSON transaction

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Commands, PreviewCli};

fn main() -> Result<()> {
    let cli = PreviewCli::parse();
    logging::init_logging(logging::DEFAULT_FILTER, cli.log_format);

    let output = match cli.command.unwrap_or(Commands::Sample) {
        Commands::Sample => commands::sample()?,
        Commands::Encode(args) => commands::encode_file(&args)?,
        Commands::Decode(args) => commands::decode_hex(&args)?,
        Commands::Hash(args) => commands::hash_file(&args)?,
    };

    println!("{}", output);
    Ok(())
}
