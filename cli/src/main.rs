// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # vochain-txtool
//!
//! Entry point for the `vochain-txtool` binary. Parses CLI arguments,
//! initializes logging, builds and signs the requested transaction, and
//! prints the result as JSON on stdout.
//!
//! - `keygen`, `address`: key utilities
//! - `send-tokens`, `collect-faucet`, `create-account`, `set-account-info`,
//!   `register-sik`: build and sign one payload variant
//! - `decode`: inspect an envelope

mod cli;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use vochain_tx::census::{CensusProof, CensusProofResponse};
use vochain_tx::config::{ClientConfig, SIGNING_ALGORITHM};
use vochain_tx::codec::decode_hex;
use vochain_tx::crypto::keys::TxKeypair;
use vochain_tx::crypto::signatures::verify_raw;
use vochain_tx::transaction::{
    self, sign_envelope, signing_message, AccountMetadata, EncodedFaucetPackage, EncodedTx,
    LocalSigner, SignedEnvelope,
};

use cli::{Commands, FaucetArgs, GlobalArgs, MetadataArgs, TxToolCli};

/// What the build commands print.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignedOutput {
    kind: String,
    chain_id: String,
    /// Base64 envelope, ready for submission.
    tx: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<String>,
    hash: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyOutput {
    algorithm: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_key: Option<String>,
    public_key: String,
    address: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = TxToolCli::parse();

    let filter = if cli.global.verbose {
        logging::VERBOSE_FILTER
    } else {
        logging::DEFAULT_FILTER
    };
    logging::init_logging(filter, cli.global.log_format);

    match cli.command {
        Commands::Keygen => keygen(),
        Commands::Address => show_address(&cli.global),
        Commands::Decode(args) => decode(&cli.global, args),
        command => build_and_sign(&cli.global, command).await,
    }
}

fn keygen() -> Result<()> {
    let keypair = TxKeypair::generate();
    tracing::info!(address = %keypair.address(), "generated signing key");
    print_json(&KeyOutput {
        algorithm: SIGNING_ALGORITHM,
        secret_key: Some(keypair.secret_key_hex()),
        public_key: keypair.public_key().to_hex(),
        address: keypair.address().to_hex(),
    })
}

fn show_address(global: &GlobalArgs) -> Result<()> {
    let keypair = load_keypair(global)?;
    print_json(&KeyOutput {
        algorithm: SIGNING_ALGORITHM,
        secret_key: None,
        public_key: keypair.public_key().to_hex(),
        address: keypair.address().to_hex(),
    })
}

/// Encodes the payload for `command`, signs it, and prints the envelope.
async fn build_and_sign(global: &GlobalArgs, command: Commands) -> Result<()> {
    let chain_id = resolve_chain_id(global)?;
    let signer = LocalSigner::new(load_keypair(global)?);
    let own_address = signer.keypair().address().to_hex();

    let encoded: EncodedTx = match command {
        Commands::SendTokens(args) => {
            transaction::send_tokens(args.nonce, &own_address, &args.to, args.amount.as_str())
                .context("building SendTokens")?
        }
        Commands::CollectFaucet(args) => {
            let package = faucet_package(args.faucet)?
                .context("collect-faucet needs --faucet-payload and --faucet-signature")?;
            transaction::collect_faucet(args.nonce, &package).context("building CollectFaucet")?
        }
        Commands::CreateAccount(args) => {
            let package = faucet_package(args.faucet)?;
            transaction::create_account(
                &own_address,
                &metadata(&args.metadata),
                &args.metadata.info_uri,
                package.as_ref(),
                args.sik.as_deref(),
            )
            .context("building CreateAccount")?
        }
        Commands::SetAccountInfo(args) => transaction::set_account_info(
            &own_address,
            args.nonce,
            &metadata(&args.metadata),
            &args.metadata.info_uri,
        )
        .context("building SetAccountInfo")?,
        Commands::RegisterSik(args) => {
            let raw = std::fs::read_to_string(&args.proof)
                .with_context(|| format!("failed to read census proof {}", args.proof.display()))?;
            let response: CensusProofResponse =
                serde_json::from_str(&raw).context("census proof is not valid JSON")?;
            let proof = CensusProof::from_response(&response).context("parsing census proof")?;
            transaction::register_privacy_key(&args.election_id, &args.sik, &proof)
                .context("building RegisterPrivacyKey")?
        }
        Commands::Keygen | Commands::Address | Commands::Decode(_) => {
            bail!("not a transaction-building command")
        }
    };

    let envelope = sign_envelope(&encoded.tx, &chain_id, &signer)
        .await
        .context("signing transaction")?;

    tracing::info!(kind = %encoded.kind, chain_id = %chain_id, "transaction signed");

    print_json(&SignedOutput {
        kind: encoded.kind.to_string(),
        chain_id,
        tx: envelope.to_base64(),
        metadata: encoded.metadata,
        hash: hex::encode(envelope.hash()),
    })
}

fn decode(global: &GlobalArgs, args: cli::DecodeArgs) -> Result<()> {
    let envelope =
        SignedEnvelope::from_base64(&args.envelope).context("envelope is not a SignedTx")?;
    let payload = envelope.payload().context("decoding embedded transaction")?;

    println!("{payload:#?}");
    println!("signature: {}", envelope.signature().to_hex());

    if let Some(pk_hex) = args.public_key {
        let chain_id = resolve_chain_id(global)?;
        let public_key = decode_hex("publicKey", &pk_hex).context("invalid --public-key")?;
        let message = signing_message(envelope.tx(), &chain_id)?;
        verify_raw(&public_key, &message, envelope.signature().as_bytes())
            .with_context(|| format!("signature does not verify for chain {chain_id}"))?;
        println!("valid for {chain_id}: true");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn resolve_chain_id(global: &GlobalArgs) -> Result<String> {
    if let Some(id) = &global.chain_id {
        return Ok(id.clone());
    }
    let config = load_config(global)?;
    config
        .chain_id
        .context("no chain id: pass --chain-id, set VOCHAIN_CHAIN_ID, or set chainId in --config")
}

fn load_config(global: &GlobalArgs) -> Result<ClientConfig> {
    let Some(path) = &global.config else {
        return Ok(ClientConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    ClientConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}

fn load_keypair(global: &GlobalArgs) -> Result<TxKeypair> {
    let hex_key = global
        .signer_key
        .as_deref()
        .context("no signing key: pass --signer-key or set VOCHAIN_SIGNER_KEY")?;
    TxKeypair::from_hex(hex_key).context("invalid signing key")
}

fn faucet_package(args: FaucetArgs) -> Result<Option<EncodedFaucetPackage>> {
    match (args.faucet_payload, args.faucet_signature) {
        (Some(payload), Some(signature)) => Ok(Some(EncodedFaucetPackage { payload, signature })),
        (None, None) => Ok(None),
        _ => bail!("--faucet-payload and --faucet-signature go together"),
    }
}

fn metadata(args: &MetadataArgs) -> AccountMetadata {
    let mut doc = AccountMetadata::new(args.name.clone());
    if let Some(description) = &args.description {
        doc = doc.with_description(description.clone());
    }
    if let Some(avatar) = &args.avatar {
        doc = doc.with_avatar(avatar.clone());
    }
    doc
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{text}");
    Ok(())
}
