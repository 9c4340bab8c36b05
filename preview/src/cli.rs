//! # CLI Interface
//!
//! Command-line structure for `xrpl-preview`, defined with `clap` derive.
//! Running the binary with no subcommand is the same as `sample`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Previews XRP Ledger signing blobs.
///
/// Builds transactions, prints their signing blob before and after a
/// signature is attached, and encodes or decodes arbitrary records.
#[derive(Parser, Debug)]
#[command(
    name = "xrpl-preview",
    about = "Preview XRP Ledger signing blobs",
    version,
    propagate_version = true
)]
pub struct PreviewCli {
    /// Log output format.
    #[arg(
        long,
        global = true,
        value_enum,
        env = "XRPL_PREVIEW_LOG_FORMAT",
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    /// Subcommand to execute. Defaults to `sample`.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encode the built-in 10 USD payment before and after signing.
    Sample,
    /// Encode a JSON transaction read from a file.
    Encode(EncodeArgs),
    /// Decode a hex-encoded transaction to JSON.
    Decode(DecodeArgs),
    /// Print the transaction ID or signing hash of a JSON transaction.
    Hash(HashArgs),
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Path to the transaction in ledger JSON form.
    pub file: PathBuf,

    /// Print the single-signer signing blob instead of the full encoding.
    #[arg(long, conflicts_with = "multisign")]
    pub signing: bool,

    /// Print the multi-signing blob for this signer address.
    #[arg(long, value_name = "ACCOUNT")]
    pub multisign: Option<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Hex produced by a full encoding (no hash prefix).
    pub hex: String,
}

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Path to the transaction in ledger JSON form.
    pub file: PathBuf,

    /// Print the signing hash instead of the transaction ID.
    #[arg(long)]
    pub signing: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        PreviewCli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_sample() {
        let cli = PreviewCli::try_parse_from(["xrpl-preview"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn log_format_is_global() {
        let cli =
            PreviewCli::try_parse_from(["xrpl-preview", "decode", "AB", "--log-format", "json"])
                .unwrap();
        assert_eq!(cli.log_format, LogFormat::Json);
        assert!(matches!(cli.command, Some(Commands::Decode(ref args)) if args.hex == "AB"));
    }

    #[test]
    fn signing_conflicts_with_multisign() {
        let result = PreviewCli::try_parse_from([
            "xrpl-preview",
            "encode",
            "tx.json",
            "--signing",
            "--multisign",
            "rf1BiGeXwwQoi8Z2ueFYTEXSwuJYfV2Jpn",
        ]);
        assert!(result.is_err());
    }
}
