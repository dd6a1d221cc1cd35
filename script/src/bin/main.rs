//! Offline Merkle proof diagram
//!
//! You can run this script using the following command:
//! ```shell
//! RUST_LOG=info cargo run --release -- --zeros --svg diagram.svg
//! ```
//! or, with explicit values (proof entries bottom-up, pattern leaf step first)
//! ```shell
//! cargo run --release -- --leaf 0x.. --proof 0x.. --proof 0x.. --pattern LR --edit sib-1=0x.. --json
//! ```

use std::path::PathBuf;

use clap::Parser;
use merkle_viz_lib::{
    parse_digest, Height, OrientationPattern, ProofPayload, Session, Zoom, DEFAULT_HEIGHT,
    DEFAULT_ZOOM, ZERO_DIGEST,
};
use merkle_viz_script::{apply_edits, emit, print_tree, setup_logger};

/// The arguments for the command.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Tree height when no proof is supplied
    #[arg(long, env = "MERKLE_VIZ_HEIGHT", default_value_t = DEFAULT_HEIGHT)]
    height: u32,

    /// Sibling sides, leaf step first, e.g. `LRRL`
    #[arg(long)]
    pattern: Option<String>,

    /// Leaf digest (final state)
    #[arg(long)]
    leaf: Option<String>,

    /// Proof entry, repeatable, bottom-up
    #[arg(long = "proof", requires = "leaf")]
    proof: Vec<String>,

    /// Hex-encoded joinTournament call data
    #[arg(long, conflicts_with_all = ["leaf", "zeros"])]
    calldata: Option<String>,

    /// Load the all-zero proof at maximum height
    #[arg(long, conflicts_with_all = ["leaf", "proof"])]
    zeros: bool,

    /// Node edit, repeatable, e.g. `sib-1=0x..`
    #[arg(long = "edit", value_name = "NODE=DIGEST")]
    edits: Vec<String>,

    #[arg(long, env = "MERKLE_VIZ_ZOOM", default_value_t = DEFAULT_ZOOM)]
    zoom: f64,

    /// Write the diagram as SVG
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Print the layout and call arguments as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup the logger.
    setup_logger();
    dotenv::dotenv().ok();

    // Parse the command line arguments.
    let args = Args::parse();

    let mut session = Session::new(Height::new(args.height))?;

    if args.zeros {
        session.load_zeroed()?;
    } else if let Some(calldata) = &args.calldata {
        let data = hex::decode(calldata.trim_start_matches("0x"))?;
        session.load_payload(ProofPayload::decode_calldata(&data)?)?;
    } else if !args.proof.is_empty() {
        let proof = args
            .proof
            .iter()
            .map(|p| parse_digest(p))
            .collect::<Result<Vec<_>, _>>()?;
        let leaf = args.leaf.as_deref().map(parse_digest).transpose()?;
        session.load_payload(ProofPayload {
            final_state: leaf.unwrap_or(ZERO_DIGEST),
            proof,
            left_node: ZERO_DIGEST,
            right_node: ZERO_DIGEST,
        })?;
    }

    // pattern changes rebuild the tree, so they go before any edit
    if let Some(pattern) = &args.pattern {
        let pattern: OrientationPattern = pattern
            .parse()
            .map_err(|c| format!("invalid pattern character '{}'", c))?;
        session.set_pattern(pattern)?;
    }

    let has_payload = session.payload().is_some();
    if let (Some(leaf), false) = (&args.leaf, has_payload) {
        let leaf_id = format!("path-{}", session.height());
        session.edit_text(&leaf_id, leaf)?;
    }

    apply_edits(&mut session, &args.edits);
    session.set_zoom(Zoom::new(args.zoom));

    print_tree(&session);
    emit(&session, args.svg.as_deref(), args.json)
}
