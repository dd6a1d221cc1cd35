//! Propagation of label edits up the spine.

use tracing::{debug, warn};

use crate::error::EditError;
use crate::hasher::combine_oriented;
use crate::tree::ProofTree;
use crate::types::{Label, NodeId, H256};

/// What an accepted edit touched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOutcome {
    pub edited: NodeId,
    /// Path nodes rewritten, nearest the leaf first. Empty only at height 0.
    pub recomputed: Vec<NodeId>,
}

impl ProofTree {
    /// Pure form of [`ProofTree::apply_edit`]: returns the updated tree, or an
    /// identical copy when the edit is rejected.
    pub fn on_edit(&self, id: NodeId, new_label: H256) -> ProofTree {
        let mut next = self.clone();
        // a rejected edit leaves `next` untouched
        let _ = next.apply_edit(id, new_label);
        next
    }

    /// Replace the label of the leaf or a sibling, then recompute the spine
    /// from the leaf up. Nodes deeper than the edit keep their labels.
    pub fn apply_edit(&mut self, id: NodeId, new_label: H256) -> Result<EditOutcome, EditError> {
        if self.index_of(id).is_none() {
            warn!(node = %id, height = self.height(), "edit rejected: no such node");
            return Err(EditError::UnknownNode(id, self.height()));
        }
        if !self.is_editable(id) {
            warn!(node = %id, "edit rejected: derived node");
            return Err(EditError::NotEditable(id));
        }

        if let Some(node) = self.node_mut(id) {
            node.label = Label::Digest(new_label);
        }
        let recomputed = self.recompute_all();
        debug!(node = %id, recomputed = recomputed.len(), "applied edit");

        Ok(EditOutcome {
            edited: id,
            recomputed,
        })
    }

    /// Walk from the leaf up to the root, writing `combine(sibling, path)` in
    /// pattern order into the parent path node at each step.
    pub fn recompute_all(&mut self) -> Vec<NodeId> {
        let height = self.height();
        let mut recomputed = Vec::with_capacity(height as usize);

        for level in (1..=height).rev() {
            let (current, sibling) = match (
                self.label(NodeId::Path(level)),
                self.label(NodeId::Sibling(level)),
            ) {
                (Some(current), Some(sibling)) => (current, sibling),
                // unreachable for a tree produced by `build`
                _ => break,
            };
            let sibling_is_left = self.sibling_is_left(level);
            let parent = combine_oriented(current.operand(), sibling.operand(), sibling_is_left);

            let parent_id = NodeId::Path(level - 1);
            if let Some(node) = self.node_mut(parent_id) {
                node.label = Label::Digest(parent);
            }
            recomputed.push(parent_id);
        }

        recomputed
    }
}
