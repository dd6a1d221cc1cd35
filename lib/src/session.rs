//! View state of one diagram: the controls, the decoded proof and the tree
//! built from them. Owns no hashing or layout logic of its own.

use tracing::{debug, info};

use crate::config::{Height, Zoom, MAX_HEIGHT};
use crate::engine::EditOutcome;
use crate::error::{EditError, PayloadError, TreeError};
use crate::layout::{project, Layout};
use crate::pattern::OrientationPattern;
use crate::payload::ProofPayload;
use crate::render::render_svg;
use crate::tree::ProofTree;
use crate::types::{parse_digest, NodeId, H256};

#[derive(Clone, Debug)]
pub struct Session {
    height: u32,
    pattern: OrientationPattern,
    zoom: Zoom,
    payload: Option<ProofPayload>,
    tree: ProofTree,
}

impl Session {
    pub fn new(height: Height) -> Result<Self, TreeError> {
        let height = height.get();
        let pattern = OrientationPattern::all_left(height);
        let tree = ProofTree::build(height, pattern.clone(), &[], None)?;
        Ok(Self {
            height,
            pattern,
            zoom: Zoom::default(),
            payload: None,
            tree,
        })
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pattern(&self) -> &OrientationPattern {
        &self.pattern
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    pub fn payload(&self) -> Option<&ProofPayload> {
        self.payload.as_ref()
    }

    pub fn tree(&self) -> &ProofTree {
        &self.tree
    }

    /// Resize the tree. The pattern keeps its leading entries and gains an
    /// alternating tail; edits made so far are discarded.
    pub fn set_height(&mut self, height: Height) -> Result<(), TreeError> {
        let height = height.get();
        let pattern = self.pattern.resized(height);
        self.rebuild(height, pattern)
    }

    /// Replace the orientation pattern, normalised to the current height.
    pub fn set_pattern(&mut self, pattern: OrientationPattern) -> Result<(), TreeError> {
        let pattern = pattern.resized(self.height);
        self.rebuild(self.height, pattern)
    }

    /// Flip one step of the pattern (bottom-up index). Returns `Ok(false)`
    /// if the index is out of range.
    pub fn toggle_orientation(&mut self, index: usize) -> Result<bool, TreeError> {
        let mut pattern = self.pattern.clone();
        if !pattern.toggle(index) {
            return Ok(false);
        }
        self.rebuild(self.height, pattern)?;
        Ok(true)
    }

    pub fn set_zoom(&mut self, zoom: Zoom) {
        self.zoom = zoom;
    }

    /// Adopt a decoded transaction: the height follows the proof length and
    /// every sibling is placed on the left.
    pub fn load_payload(&mut self, payload: ProofPayload) -> Result<(), PayloadError> {
        if payload.proof.is_empty() {
            return Err(PayloadError::EmptyProof);
        }
        let height = payload.height();
        let pattern = OrientationPattern::all_left(height);
        let tree = payload.to_tree(pattern.clone())?;

        info!(height, root = %tree.root(), "loaded proof payload");
        self.height = height;
        self.pattern = pattern;
        self.payload = Some(payload);
        self.tree = tree;
        Ok(())
    }

    /// All-zero leaf and proof at the maximum height.
    pub fn load_zeroed(&mut self) -> Result<(), PayloadError> {
        self.load_payload(ProofPayload::zeroed(MAX_HEIGHT))
    }

    pub fn edit(&mut self, id: NodeId, label: H256) -> Result<EditOutcome, EditError> {
        self.tree.apply_edit(id, label)
    }

    /// Validate raw user input, then apply it. Nothing changes on error.
    pub fn edit_text(&mut self, id: &str, label: &str) -> Result<EditOutcome, EditError> {
        let id: NodeId = id.parse()?;
        let label = parse_digest(label)?;
        self.edit(id, label)
    }

    pub fn layout(&self) -> Layout {
        project(&self.tree)
    }

    pub fn render_svg(&self) -> String {
        render_svg(&self.layout(), self.zoom)
    }

    /// Arguments for submitting the current tree as a `joinTournament` call.
    pub fn join_args(&self) -> Result<ProofPayload, PayloadError> {
        ProofPayload::from_tree(&self.tree)
    }

    fn rebuild(&mut self, height: u32, pattern: OrientationPattern) -> Result<(), TreeError> {
        let tree = match &self.payload {
            Some(payload) => {
                let mut proof = payload.proof_sequence();
                proof.truncate(height as usize);
                ProofTree::derive(height, pattern.clone(), &proof, Some(payload.final_state))?
            }
            None => ProofTree::build(height, pattern.clone(), &[], None)?,
        };

        debug!(height, pattern = %pattern, "rebuilt session tree");
        self.height = height;
        self.pattern = pattern;
        self.tree = tree;
        Ok(())
    }
}
