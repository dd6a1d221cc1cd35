use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::TreeError;
use crate::pattern::OrientationPattern;
use crate::types::{Edge, Label, Node, NodeId, H256};

/// The binary path of a Merkle inclusion proof: one spine node per level
/// `0..=height` and one sibling per level `1..=height`.
///
/// Nodes are stored by index: path node `L` at `L`, sibling `L` at
/// `height + L`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTree")]
pub struct ProofTree {
    height: u32,
    pattern: OrientationPattern,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Wire form of [`ProofTree`], checked against a fresh build before use.
#[derive(Deserialize)]
struct RawTree {
    height: u32,
    pattern: OrientationPattern,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl TryFrom<RawTree> for ProofTree {
    type Error = TreeError;

    fn try_from(raw: RawTree) -> Result<Self, Self::Error> {
        let mut tree = ProofTree::build(raw.height, raw.pattern, &[], None)?;
        let same_ids = raw.nodes.len() == tree.nodes.len()
            && raw
                .nodes
                .iter()
                .zip(&tree.nodes)
                .all(|(got, want)| got.id == want.id && got.level == want.level);
        if !same_ids || raw.edges != tree.edges {
            return Err(TreeError::Shape(raw.height));
        }
        tree.nodes = raw.nodes;
        Ok(tree)
    }
}

impl ProofTree {
    /// Build the diagram with its initial labels.
    ///
    /// Derived path labels stay empty; see [`ProofTree::derive`] for a tree
    /// with every ancestor of the leaf computed.
    pub fn build(
        height: u32,
        pattern: OrientationPattern,
        proof: &[Option<H256>],
        leaf: Option<H256>,
    ) -> Result<Self, TreeError> {
        if pattern.len() != height as usize {
            return Err(TreeError::PatternLength {
                height,
                pattern: pattern.len(),
            });
        }
        if proof.len() > height as usize {
            return Err(TreeError::ProofLength {
                height,
                proof: proof.len(),
            });
        }

        let mut nodes = Vec::with_capacity(2 * height as usize + 1);
        let mut edges = Vec::with_capacity(2 * height as usize);

        for level in 0..=height {
            let label = if level == height && leaf.is_some() {
                Label::from(leaf)
            } else if level == 0 {
                Label::root_placeholder()
            } else {
                Label::Empty
            };
            nodes.push(Node::new(NodeId::Path(level), label));
        }

        for level in 1..=height {
            // proof is bottom-up, so the sibling nearest the root takes the last entry
            let index = (height - level) as usize;
            let label = match proof.get(index).copied().flatten() {
                Some(digest) => Label::Digest(digest),
                None => Label::proof_placeholder(index),
            };
            nodes.push(Node::new(NodeId::Sibling(level), label));

            edges.push(Edge {
                parent: NodeId::Path(level - 1),
                child: NodeId::Sibling(level),
            });
            edges.push(Edge {
                parent: NodeId::Path(level - 1),
                child: NodeId::Path(level),
            });
        }

        debug!(height, pattern = %pattern, nodes = nodes.len(), "built proof tree");

        Ok(Self {
            height,
            pattern,
            nodes,
            edges,
        })
    }

    /// Build and compute every path label from the leaf up.
    pub fn derive(
        height: u32,
        pattern: OrientationPattern,
        proof: &[Option<H256>],
        leaf: Option<H256>,
    ) -> Result<Self, TreeError> {
        let mut tree = Self::build(height, pattern, proof, leaf)?;
        tree.recompute_all();
        Ok(tree)
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pattern(&self) -> &OrientationPattern {
        &self.pattern
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn into_parts(self) -> (Vec<Node>, Vec<Edge>) {
        (self.nodes, self.edges)
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<usize> {
        match id {
            NodeId::Path(level) if level <= self.height => Some(level as usize),
            NodeId::Sibling(level) if (1..=self.height).contains(&level) => {
                Some((self.height + level) as usize)
            }
            _ => None,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index_of(id).map(|i| &self.nodes[i])
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.index_of(id).map(move |i| &mut self.nodes[i])
    }

    pub fn label(&self, id: NodeId) -> Option<&Label> {
        self.node(id).map(|n| &n.label)
    }

    pub fn root(&self) -> &Label {
        &self.nodes[0].label
    }

    pub fn leaf(&self) -> &Label {
        &self.nodes[self.height as usize].label
    }

    /// Sibling labels bottom-up, i.e. in proof order.
    pub fn proof_labels(&self) -> impl Iterator<Item = &Label> + '_ {
        (1..=self.height)
            .rev()
            .map(move |level| &self.nodes[(self.height + level) as usize].label)
    }

    /// Whether the sibling at `level` is the left operand. Shares the proof's
    /// bottom-up index, so the sibling at `level` reads entry `height - level`.
    pub fn sibling_is_left(&self, level: u32) -> bool {
        (1..=self.height).contains(&level) && self.pattern.is_left((self.height - level) as usize)
    }

    /// The leaf and every sibling can be edited; all other path nodes are derived.
    pub fn is_editable(&self, id: NodeId) -> bool {
        match id {
            NodeId::Path(level) => level == self.height,
            NodeId::Sibling(level) => (1..=self.height).contains(&level),
        }
    }

    /// Parent of `id` on the spine, `None` for the root.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.index_of(id)?;
        id.level().checked_sub(1).map(NodeId::Path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest(byte: u8) -> H256 {
        [byte; 32]
    }

    #[test]
    fn test_build_structure_counts() {
        let tree = ProofTree::build(4, OrientationPattern::alternating(4), &[], None).unwrap();
        let paths = tree.nodes().iter().filter(|n| !n.id.is_sibling()).count();
        let sibs = tree.nodes().iter().filter(|n| n.id.is_sibling()).count();
        assert_eq!(paths, 5);
        assert_eq!(sibs, 4);
        assert_eq!(tree.edges().len(), 8);
        for edge in tree.edges() {
            assert_eq!(edge.parent.level() + 1, edge.child.level());
            assert!(!edge.parent.is_sibling());
        }
    }

    #[test]
    fn test_build_initial_labels() {
        let tree = ProofTree::build(3, OrientationPattern::all_left(3), &[], Some(digest(9))).unwrap();
        assert_eq!(tree.root(), &Label::root_placeholder());
        assert_eq!(tree.leaf(), &Label::Digest(digest(9)));
        assert_eq!(tree.label(NodeId::Path(1)), Some(&Label::Empty));
        assert_eq!(tree.label(NodeId::Path(2)), Some(&Label::Empty));
        assert_eq!(tree.label(NodeId::Sibling(1)), Some(&Label::proof_placeholder(2)));
        assert_eq!(tree.label(NodeId::Sibling(3)), Some(&Label::proof_placeholder(0)));
    }

    #[test]
    fn test_proof_indexing_bottom_up() {
        let proof = [Some(digest(0xa0)), Some(digest(0xa1)), Some(digest(0xa2))];
        let tree = ProofTree::build(3, OrientationPattern::alternating(3), &proof, None).unwrap();
        assert_eq!(tree.label(NodeId::Sibling(3)), Some(&Label::Digest(digest(0xa0))));
        assert_eq!(tree.label(NodeId::Sibling(2)), Some(&Label::Digest(digest(0xa1))));
        assert_eq!(tree.label(NodeId::Sibling(1)), Some(&Label::Digest(digest(0xa2))));

        let back: Vec<_> = tree.proof_labels().cloned().collect();
        assert_eq!(back, proof.iter().map(|p| Label::from(*p)).collect::<Vec<_>>());
    }

    #[test]
    fn test_partial_proof_uses_placeholders() {
        let proof = [Some(digest(1)), None];
        let tree = ProofTree::build(3, OrientationPattern::alternating(3), &proof, None).unwrap();
        assert_eq!(tree.label(NodeId::Sibling(3)), Some(&Label::Digest(digest(1))));
        assert_eq!(tree.label(NodeId::Sibling(2)), Some(&Label::proof_placeholder(1)));
        assert_eq!(tree.label(NodeId::Sibling(1)), Some(&Label::proof_placeholder(2)));
    }

    #[test]
    fn test_build_is_deterministic() {
        let proof = [Some(digest(1)), Some(digest(2))];
        let a = ProofTree::derive(2, OrientationPattern::alternating(2), &proof, Some(digest(3))).unwrap();
        let b = ProofTree::derive(2, OrientationPattern::alternating(2), &proof, Some(digest(3))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pattern_length_mismatch_is_rejected() {
        let err = ProofTree::build(3, OrientationPattern::all_left(2), &[], None).unwrap_err();
        assert_eq!(err, TreeError::PatternLength { height: 3, pattern: 2 });
    }

    #[test]
    fn test_oversized_proof_is_rejected() {
        let proof = vec![None; 3];
        let err = ProofTree::build(2, OrientationPattern::all_left(2), &proof, None).unwrap_err();
        assert_eq!(err, TreeError::ProofLength { height: 2, proof: 3 });
    }

    #[test]
    fn test_height_zero_tree() {
        let tree = ProofTree::build(0, OrientationPattern::default(), &[], Some(digest(7))).unwrap();
        assert_eq!(tree.nodes().len(), 1);
        assert!(tree.edges().is_empty());
        assert_eq!(tree.root(), &Label::Digest(digest(7)));
        assert!(tree.is_editable(NodeId::ROOT));
    }

    #[test]
    fn test_lookup_bounds() {
        let tree = ProofTree::build(2, OrientationPattern::all_left(2), &[], None).unwrap();
        assert!(tree.node(NodeId::Path(3)).is_none());
        assert!(tree.node(NodeId::Sibling(0)).is_none());
        assert!(tree.node(NodeId::Sibling(3)).is_none());
        assert_eq!(tree.parent_of(NodeId::Sibling(2)), Some(NodeId::Path(1)));
        assert_eq!(tree.parent_of(NodeId::ROOT), None);
        assert!(!tree.is_editable(NodeId::Path(1)));
        assert!(!tree.is_editable(NodeId::ROOT));
        assert!(tree.is_editable(NodeId::Path(2)));
    }

    #[test]
    fn test_deserialize_checks_structure() {
        let tree = ProofTree::derive(2, OrientationPattern::all_left(2), &[Some(digest(1))], Some(digest(2)))
            .unwrap();
        let json = serde_json::to_value(&tree).unwrap();
        let back: ProofTree = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(back, tree);

        let mut truncated = json.clone();
        truncated["nodes"].as_array_mut().unwrap().truncate(1);
        assert!(serde_json::from_value::<ProofTree>(truncated).is_err());

        let mut taller = json;
        taller["height"] = serde_json::json!(3);
        assert!(serde_json::from_value::<ProofTree>(taller).is_err());
    }

    #[test]
    fn test_sibling_orientation_follows_proof_index() {
        let tree = ProofTree::build(3, OrientationPattern::new(vec![true, false, false]), &[], None).unwrap();
        assert!(tree.sibling_is_left(3));
        assert!(!tree.sibling_is_left(2));
        assert!(!tree.sibling_is_left(1));
        assert!(!tree.sibling_is_left(0));
    }
}
