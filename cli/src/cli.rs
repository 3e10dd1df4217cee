//! # CLI Interface
//!
//! Argument structure for `vochain-txtool`, via `clap` derive. Every build
//! command encodes one payload variant, signs it for the configured chain,
//! and prints the envelope.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::logging::LogFormat;

/// Build, sign and inspect Vochain transactions.
#[derive(Parser, Debug)]
#[command(
    name = "vochain-txtool",
    about = "Build, sign and inspect Vochain transactions",
    version,
    propagate_version = true
)]
pub struct TxToolCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Chain id signatures are bound to. Overrides `chainId` in the config file.
    #[arg(long, global = true, env = "VOCHAIN_CHAIN_ID")]
    pub chain_id: Option<String>,

    /// Hex-encoded Ed25519 secret key of the signing account.
    ///
    /// Prefer the environment variable over the flag so the key does not end
    /// up in shell history.
    #[arg(long, global = true, env = "VOCHAIN_SIGNER_KEY", hide_env_values = true)]
    pub signer_key: Option<String>,

    /// Client configuration file (JSON).
    #[arg(long, global = true, env = "VOCHAIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log output format.
    #[arg(long, global = true, env = "VOCHAIN_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// Debug-level logging for the tool and the transaction core.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh signing key and print it with its address.
    Keygen,
    /// Print the address of the signing key.
    Address,
    /// Transfer tokens from the signing account.
    SendTokens(SendTokensArgs),
    /// Redeem a faucet grant.
    CollectFaucet(CollectFaucetArgs),
    /// Create the signing account.
    CreateAccount(CreateAccountArgs),
    /// Point the signing account at a new metadata document.
    SetAccountInfo(SetAccountInfoArgs),
    /// Register a privacy key for an election using a census proof.
    RegisterSik(RegisterSikArgs),
    /// Decode a base64 envelope and optionally check its signature.
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
pub struct SendTokensArgs {
    /// Account sequence number.
    #[arg(long)]
    pub nonce: u32,

    /// Recipient address (hex).
    #[arg(long)]
    pub to: String,

    /// Amount to transfer, a positive whole number.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
}

/// A faucet package in its base64 boundary form.
#[derive(Args, Debug)]
pub struct FaucetArgs {
    /// Faucet package payload (base64).
    #[arg(long, requires = "faucet_signature")]
    pub faucet_payload: Option<String>,

    /// Faucet operator signature (base64).
    #[arg(long, requires = "faucet_payload")]
    pub faucet_signature: Option<String>,
}

#[derive(Args, Debug)]
pub struct CollectFaucetArgs {
    #[arg(long)]
    pub nonce: u32,

    #[command(flatten)]
    pub faucet: FaucetArgs,
}

/// Metadata document fields.
#[derive(Args, Debug)]
pub struct MetadataArgs {
    /// Account display name.
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub description: Option<String>,

    /// Avatar URL or content id.
    #[arg(long)]
    pub avatar: Option<String>,

    /// Content id under which the metadata document is published.
    #[arg(long)]
    pub info_uri: String,
}

#[derive(Args, Debug)]
pub struct CreateAccountArgs {
    #[command(flatten)]
    pub metadata: MetadataArgs,

    #[command(flatten)]
    pub faucet: FaucetArgs,

    /// Privacy key to register with the account (32 bytes, hex).
    #[arg(long)]
    pub sik: Option<String>,
}

#[derive(Args, Debug)]
pub struct SetAccountInfoArgs {
    #[arg(long)]
    pub nonce: u32,

    #[command(flatten)]
    pub metadata: MetadataArgs,
}

#[derive(Args, Debug)]
pub struct RegisterSikArgs {
    /// Election id (32 bytes, hex).
    #[arg(long)]
    pub election_id: String,

    /// Privacy key (32 bytes, hex).
    #[arg(long)]
    pub sik: String,

    /// Census service proof response (JSON file).
    #[arg(long)]
    pub proof: PathBuf,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Base64 envelope as printed by the build commands.
    pub envelope: String,

    /// Public key (hex) to verify the signature against. Needs a chain id.
    #[arg(long)]
    pub public_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        TxToolCli::command().debug_assert();
    }

    #[test]
    fn parses_send_tokens_with_global_flags() {
        let cli = TxToolCli::try_parse_from([
            "vochain-txtool",
            "send-tokens",
            "--nonce",
            "3",
            "--to",
            "0x2222222222222222222222222222222222222222",
            "--amount",
            "100",
            "--chain-id",
            "vocdoni/DEV/1",
        ])
        .unwrap();

        assert_eq!(cli.global.chain_id.as_deref(), Some("vocdoni/DEV/1"));
        match cli.command {
            Commands::SendTokens(args) => {
                assert_eq!(args.nonce, 3);
                assert_eq!(args.amount, "100");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn faucet_payload_requires_signature() {
        let result = TxToolCli::try_parse_from([
            "vochain-txtool",
            "collect-faucet",
            "--nonce",
            "1",
            "--faucet-payload",
            "cGF5",
        ]);
        assert!(result.is_err());
    }
}
