//! Mina keyring CLI
//!
//! Derives Mina private keys from a mnemonic or a host-exported key node,
//! lists the supported networks and requests faucet funds.

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mina_keyring::account::{EntropyProvider, SeedEntropyProvider, StaticNodeProvider};
use mina_keyring::config::KeyringConfig;
use mina_keyring::faucet::{FaucetService, HttpFaucetClient};
use mina_keyring::{AccountIndex, KeyDerivationEngine, Network, NetworkRegistry};

#[derive(Debug, Parser)]
#[command(name = "mina-keyring", version, about = "Mina HD key derivation")]
struct Cli {
    /// Network to work on (mainnet, berkeley, devnet, testworld)
    #[arg(long, global = true)]
    network: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List supported networks
    Networks,
    /// Derive the private key of an account
    Derive {
        /// Account index, defaults to MINA_ACCOUNT_INDEX or 0
        #[arg(long)]
        account: Option<u32>,
        /// JSON key node scoped to m/44'/12586' exported by a wallet host
        #[arg(long)]
        node_file: Option<PathBuf>,
        /// BIP39 mnemonic used when no node file is given
        #[arg(long, env = "MINA_MNEMONIC", hide_env_values = true)]
        mnemonic: Option<String>,
        /// Optional BIP39 passphrase
        #[arg(long, env = "MINA_PASSPHRASE", hide_env_values = true)]
        passphrase: Option<String>,
    },
    /// Request faucet funds for an address
    Faucet {
        address: String,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<KeyringConfig> {
    let mut config = KeyringConfig::from_env().context("Failed to load configuration")?;
    if let Some(network) = &cli.network {
        config.network = network.parse::<Network>()?;
    }
    Ok(config)
}

async fn derive(
    config: &KeyringConfig,
    account: Option<u32>,
    node_file: Option<PathBuf>,
    mnemonic: Option<String>,
    passphrase: Option<String>,
) -> anyhow::Result<()> {
    let network = NetworkRegistry::descriptor(config.network);
    let account = match account {
        Some(index) => AccountIndex::try_from(index)?,
        None => config.account()?,
    };

    let node = match (node_file, mnemonic) {
        (Some(path), _) => {
            let json = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            StaticNodeProvider::from_json(network.coin_type, &json)?
                .bip44_node(network.coin_type)
                .await?
        }
        (None, Some(phrase)) => {
            SeedEntropyProvider::from_mnemonic(&phrase, passphrase.as_deref())?
                .bip44_node(network.coin_type)
                .await?
        }
        (None, None) => bail!("Provide --node-file or set MINA_MNEMONIC"),
    };

    let private_key = KeyDerivationEngine::derive_private_key(&node, account)?;
    tracing::info!(network = %network.name, account = account.value(), "derived private key");

    let output = serde_json::json!({
        "network": network.name,
        "curveVariant": network.curve_variant,
        "path": format!("m/44'/{}'/{}'", network.coin_type, account),
        "privateKey": private_key,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match cli.command {
        Command::Networks => {
            println!("{}", serde_json::to_string_pretty(&NetworkRegistry::all())?);
        }
        Command::Derive { account, node_file, mnemonic, passphrase } => {
            derive(&config, account, node_file, mnemonic, passphrase).await?;
        }
        Command::Faucet { address } => {
            let network = NetworkRegistry::descriptor(config.network);
            let client = HttpFaucetClient::new(config.faucet.clone())?;
            let receipt = client
                .request_funds(&address, &network)
                .await
                .context("Faucet request failed")?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
    }

    Ok(())
}
