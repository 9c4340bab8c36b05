//! Subcommand implementations.
//!
//! Each command returns the text it wants printed; `main` does the
//! printing. Logging goes through `tracing` and never reaches stdout.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use xrpl_codec::{
    decode, encode, encode_for_multisigning, encode_for_signing, preview, sample_payment,
    signing_hash, transaction_id, AccountId, Transaction,
};

use crate::cli::{DecodeArgs, EncodeArgs, HashArgs};

/// Builds the sample payment and prints both encodings and the signed
/// record.
pub fn sample() -> Result<String> {
    let tx = sample_payment().context("failed to build the sample payment")?;
    tracing::info!(tx_type = %tx.transaction_type(), "built sample payment");

    let result = preview(&tx).context("failed to encode the sample payment")?;
    tracing::info!(
        unsigned_bytes = result.unsigned.len() / 2,
        signed_bytes = result.signed.len() / 2,
        "encoded sample payment"
    );

    let signed_json = serde_json::to_string_pretty(&result.signed_tx)
        .context("failed to render the signed record")?;

    Ok(format!(
        "unsigned: {}\nsigned:   {}\n{}",
        result.unsigned, result.signed, signed_json
    ))
}

pub fn encode_file(args: &EncodeArgs) -> Result<String> {
    let tx = read_transaction(&args.file)?;

    let hex = if let Some(signer) = &args.multisign {
        let signer: AccountId = signer
            .parse()
            .with_context(|| format!("invalid signer address {:?}", signer))?;
        encode_for_multisigning(&tx, &signer)?
    } else if args.signing {
        encode_for_signing(&tx)?
    } else {
        encode(&tx)?
    };

    tracing::info!(bytes = hex.len() / 2, "encoded transaction");
    Ok(hex)
}

pub fn decode_hex(args: &DecodeArgs) -> Result<String> {
    let json = decode(&args.hex).context("failed to decode transaction")?;
    Ok(serde_json::to_string_pretty(&json)?)
}

pub fn hash_file(args: &HashArgs) -> Result<String> {
    let tx = read_transaction(&args.file)?;
    let hash = if args.signing {
        signing_hash(&tx)?
    } else {
        transaction_id(&tx)?
    };
    Ok(hex::encode_upper(hash))
}

fn read_transaction(path: &Path) -> Result<Transaction> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let tx = Transaction::from_json(&raw)
        .with_context(|| format!("failed to parse transaction in {}", path.display()))?;
    tracing::debug!(path = %path.display(), tx_type = %tx.transaction_type(), "loaded transaction");
    Ok(tx)
}
