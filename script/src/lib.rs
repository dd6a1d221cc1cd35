//! Shared plumbing for the `merkle-viz` and `fetch` binaries.

use std::path::Path;

use merkle_viz_lib::{encode_digest, Label, Layout, NodeId, ProofPayload, Session};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Install the `tracing` subscriber, honouring `RUST_LOG` (default `info`).
pub fn setup_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Apply `NODE=DIGEST` edits in order. Malformed or rejected edits are
/// logged and skipped; the tree keeps its previous state for them.
pub fn apply_edits(session: &mut Session, edits: &[String]) -> usize {
    let mut applied = 0;
    for edit in edits {
        let Some((id, label)) = edit.split_once('=') else {
            warn!(edit = %edit, "ignoring edit without NODE=DIGEST form");
            continue;
        };
        match session.edit_text(id, label) {
            Ok(outcome) => {
                println!("Edited {} ({} path nodes recomputed)", outcome.edited, outcome.recomputed.len());
                applied += 1;
            }
            Err(e) => warn!(edit = %edit, "edit rejected: {}", e),
        }
    }
    applied
}

/// Machine-readable view of a session: what a renderer needs plus the
/// arguments of the outgoing call when every value is known.
#[derive(Serialize)]
pub struct Report<'a> {
    pub height: u32,
    pub pattern: String,
    pub zoom: f64,
    pub layout: &'a Layout,
    pub join_args: Option<ProofPayload>,
    pub calldata: Option<String>,
}

impl<'a> Report<'a> {
    pub fn new(session: &Session, layout: &'a Layout) -> Self {
        let join_args = session.join_args().ok();
        let calldata = join_args
            .as_ref()
            .map(|args| format!("0x{}", hex::encode(args.encode_calldata())));
        Self {
            height: session.height(),
            pattern: session.pattern().to_string(),
            zoom: session.zoom().get(),
            layout,
            join_args,
            calldata,
        }
    }
}

/// Print the tree level by level, root first.
pub fn print_tree(session: &Session) {
    let tree = session.tree();
    println!("Merkle Proof Diagram:");
    println!("  Height: {}", tree.height());
    println!("  Pattern (leaf step first): {}", tree.pattern());
    for level in 0..=tree.height() {
        let path = tree.label(NodeId::Path(level)).map(display).unwrap_or_default();
        if level == 0 {
            println!("  [{:>2}] path-{:<3} {}", level, level, path);
            continue;
        }
        let sibling = tree.label(NodeId::Sibling(level)).map(display).unwrap_or_default();
        let side = if tree.sibling_is_left(level) { "L" } else { "R" };
        println!(
            "  [{:>2}] path-{:<3} {}  | sib-{:<3} ({}) {}",
            level, level, path, level, side, sibling
        );
    }

    match session.join_args() {
        Ok(args) => {
            println!("\njoinTournament arguments:");
            println!("  Final State: {}", encode_digest(&args.final_state));
            println!("  Left Node (sib-1): {}", encode_digest(&args.left_node));
            println!("  Right Node (path-1): {}", encode_digest(&args.right_node));
            println!("  Proof Length: {}", args.proof.len());
        }
        Err(e) => println!("\njoinTournament arguments unavailable: {}", e),
    }
}

fn display(label: &Label) -> String {
    match label {
        Label::Empty => "-".to_string(),
        other => other.to_string(),
    }
}

/// Write the SVG and/or print the JSON report as requested.
pub fn emit(session: &Session, svg: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let layout = session.layout();
    if let Some(path) = svg {
        std::fs::write(path, session.render_svg())?;
        println!("Wrote diagram to {}", path.display());
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&Report::new(session, &layout))?);
    }
    Ok(())
}
