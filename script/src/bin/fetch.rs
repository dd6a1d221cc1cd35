//! Transaction fetcher for the Merkle proof diagram
//!
//! Looks up a `joinTournament` transaction on an Ethereum node, decodes its
//! proof and prints (or renders) the recomputed path.
//!
//! Usage:
//! RUST_LOG=info cargo run --bin fetch -- --tx 0x.. --svg diagram.svg

use std::path::PathBuf;
use std::str::FromStr;

use alloy::primitives::{Bytes, B256};
use alloy::providers::{Provider, ProviderBuilder};
use clap::Parser;
use merkle_viz_lib::{Height, OrientationPattern, ProofPayload, Session, Zoom, DEFAULT_ZOOM};
use merkle_viz_script::{apply_edits, emit, print_tree, setup_logger};
use serde::Deserialize;
use tracing::info;
use url::Url;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Transaction hash
    #[arg(long)]
    tx: String,

    /// JSON-RPC endpoint of the source chain
    #[arg(long, env = "SOURCE_RPC_URL", default_value = "https://ethereum-sepolia-rpc.publicnode.com")]
    rpc_url: Url,

    /// Sibling sides, leaf step first; defaults to all left
    #[arg(long)]
    pattern: Option<String>,

    /// Node edit, repeatable, e.g. `sib-1=0x..`
    #[arg(long = "edit", value_name = "NODE=DIGEST")]
    edits: Vec<String>,

    #[arg(long, env = "MERKLE_VIZ_ZOOM", default_value_t = DEFAULT_ZOOM)]
    zoom: f64,

    #[arg(long)]
    svg: Option<PathBuf>,

    #[arg(long)]
    json: bool,
}

/// The part of `eth_getTransactionByHash` we need.
#[derive(Debug, Deserialize)]
struct RpcTransaction {
    input: Bytes,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup logging
    setup_logger();
    dotenv::dotenv().ok();

    let args = Args::parse();
    let hash = B256::from_str(&args.tx)?;

    println!("Fetching transaction {}", hash);

    let provider = ProviderBuilder::new().on_http(args.rpc_url);
    let tx: Option<RpcTransaction> = provider
        .raw_request("eth_getTransactionByHash".into(), (hash,))
        .await?;
    let tx = tx.ok_or("transaction not found")?;
    info!(bytes = tx.input.len(), "fetched transaction input");

    let payload = ProofPayload::decode_calldata(&tx.input)?;
    println!("Decoded joinTournament call:");
    println!("  Final State: 0x{}", hex::encode(payload.final_state));
    println!("  Proof Length: {}", payload.proof.len());
    println!("  Left Node: 0x{}", hex::encode(payload.left_node));
    println!("  Right Node: 0x{}", hex::encode(payload.right_node));

    let mut session = Session::new(Height::default())?;
    session.load_payload(payload)?;

    if let Some(pattern) = &args.pattern {
        let pattern: OrientationPattern = pattern
            .parse()
            .map_err(|c| format!("invalid pattern character '{}'", c))?;
        session.set_pattern(pattern)?;
    }

    apply_edits(&mut session, &args.edits);
    session.set_zoom(Zoom::new(args.zoom));

    println!();
    print_tree(&session);
    emit(&session, args.svg.as_deref(), args.json)
}
