use serde::{Deserialize, Serialize};

use crate::config::Zoom;
use crate::tree::ProofTree;
use crate::types::{Edge, Label, NodeId};

/// Horizontal distance between levels along the spine
pub const X_STEP: f64 = 90.0;
/// Vertical distance between levels
pub const Y_STEP: f64 = 120.0;
/// Lateral offset of a sibling from the spine
pub const X_SIBLING: f64 = 180.0;
pub const NODE_W: f64 = 116.0;
pub const NODE_H: f64 = 54.0;
pub const RADIUS: f64 = 12.0;
/// Padding around the outermost node centres
pub const MARGIN_X: f64 = NODE_W + 40.0;
pub const MARGIN_Y: f64 = NODE_H + 40.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionedNode {
    pub id: NodeId,
    pub level: u32,
    pub label: Label,
    pub x: f64,
    pub y: f64,
}

/// SVG viewBox covering every node plus the margin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewBounds {
    /// Outer pixel size of the diagram at the given zoom.
    pub fn scaled(&self, zoom: Zoom) -> (f64, f64) {
        (self.width * zoom.get(), self.height * zoom.get())
    }

    pub fn view_box(&self) -> String {
        format!("{} {} {} {}", self.min_x, self.min_y, self.width, self.height)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
    pub bounds: ViewBounds,
}

impl Layout {
    pub fn node(&self, id: NodeId) -> Option<&PositionedNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Place the spine on a diagonal and each sibling beside its path node, on
/// the same side it takes when hashing.
pub fn project(tree: &ProofTree) -> Layout {
    let nodes: Vec<PositionedNode> = tree
        .nodes()
        .iter()
        .map(|node| {
            let level = node.level as f64;
            let offset = match node.id {
                NodeId::Path(_) => 0.0,
                NodeId::Sibling(level) if tree.sibling_is_left(level) => -X_SIBLING,
                NodeId::Sibling(_) => X_SIBLING,
            };
            PositionedNode {
                id: node.id,
                level: node.level,
                label: node.label.clone(),
                x: level * X_STEP + offset,
                y: level * Y_STEP,
            }
        })
        .collect();

    let bounds = bounds_of(&nodes);

    Layout {
        nodes,
        edges: tree.edges().to_vec(),
        bounds,
    }
}

fn bounds_of(nodes: &[PositionedNode]) -> ViewBounds {
    let (mut lo_x, mut hi_x, mut lo_y, mut hi_y) = (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for node in nodes {
        lo_x = lo_x.min(node.x);
        hi_x = hi_x.max(node.x);
        lo_y = lo_y.min(node.y);
        hi_y = hi_y.max(node.y);
    }

    let min_x = lo_x - MARGIN_X;
    let min_y = lo_y - MARGIN_Y;
    ViewBounds {
        min_x,
        min_y,
        width: hi_x + MARGIN_X - min_x,
        height: hi_y + MARGIN_Y - min_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::OrientationPattern;

    #[test]
    fn test_spine_positions() {
        let tree = ProofTree::build(3, OrientationPattern::alternating(3), &[], None).unwrap();
        let layout = project(&tree);
        for level in 0..=3 {
            let node = layout.node(NodeId::Path(level)).unwrap();
            assert_eq!(node.x, level as f64 * X_STEP);
            assert_eq!(node.y, level as f64 * Y_STEP);
        }
    }

    #[test]
    fn test_sibling_side_matches_hash_order() {
        let tree = ProofTree::build(2, OrientationPattern::new(vec![true, false]), &[], None).unwrap();
        let layout = project(&tree);

        let path2 = layout.node(NodeId::Path(2)).unwrap();
        let sib2 = layout.node(NodeId::Sibling(2)).unwrap();
        assert!(tree.sibling_is_left(2));
        assert_eq!(sib2.x, path2.x - X_SIBLING);
        assert_eq!(sib2.y, path2.y);

        let path1 = layout.node(NodeId::Path(1)).unwrap();
        let sib1 = layout.node(NodeId::Sibling(1)).unwrap();
        assert_eq!(sib1.x, path1.x + X_SIBLING);
    }

    #[test]
    fn test_bounds_cover_nodes_with_margin() {
        let tree = ProofTree::build(2, OrientationPattern::all_left(2), &[], None).unwrap();
        let layout = project(&tree);
        // siblings at x = 90 - 180 and 180 - 180, spine at 0, 90, 180
        assert_eq!(layout.bounds.min_x, -90.0 - MARGIN_X);
        assert_eq!(layout.bounds.width, 180.0 + 90.0 + 2.0 * MARGIN_X);
        assert_eq!(layout.bounds.min_y, -MARGIN_Y);
        assert_eq!(layout.bounds.height, 240.0 + 2.0 * MARGIN_Y);
    }

    #[test]
    fn test_height_zero_bounds() {
        let tree = ProofTree::build(0, OrientationPattern::default(), &[], None).unwrap();
        let layout = project(&tree);
        assert_eq!(layout.nodes.len(), 1);
        assert_eq!(layout.bounds.width, 2.0 * MARGIN_X);
        assert_eq!(layout.bounds.height, 2.0 * MARGIN_Y);
    }

    #[test]
    fn test_scaled_bounds() {
        let tree = ProofTree::build(1, OrientationPattern::all_left(1), &[], None).unwrap();
        let bounds = project(&tree).bounds;
        let (w, h) = bounds.scaled(Zoom::new(2.0));
        assert_eq!(w, bounds.width * 2.0);
        assert_eq!(h, bounds.height * 2.0);
    }
}
