use core::fmt::Write;

use crate::config::Zoom;
use crate::layout::{Layout, PositionedNode, NODE_W, RADIUS};
use crate::types::NodeId;

const BOX_H: f64 = 80.0;

/// Render a projected tree as a standalone SVG document.
pub fn render_svg(layout: &Layout, zoom: Zoom) -> String {
    let (width, height) = layout.bounds.scaled(zoom);
    let leaf_level = layout
        .nodes
        .iter()
        .filter(|n| !n.id.is_sibling())
        .map(|n| n.level)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    // writing into a String cannot fail
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{}">"#,
        width,
        height,
        layout.bounds.view_box()
    );

    for edge in &layout.edges {
        if let (Some(from), Some(to)) = (layout.node(edge.parent), layout.node(edge.child)) {
            let _ = writeln!(
                out,
                r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="black" stroke-width="1"/>"#,
                from.x, from.y, to.x, to.y
            );
        }
    }

    for node in &layout.nodes {
        render_node(&mut out, node, leaf_level);
    }

    out.push_str("</svg>\n");
    out
}

fn render_node(out: &mut String, node: &PositionedNode, leaf_level: u32) {
    let is_leaf = node.id == NodeId::Path(leaf_level);
    let fill = if node.id.is_sibling() || is_leaf {
        "white"
    } else {
        "whitesmoke"
    };

    let _ = writeln!(out, r#"  <g id="{}" transform="translate({}, {})">"#, node.id, node.x, node.y);
    let _ = writeln!(
        out,
        r#"    <rect x="{}" y="{}" width="{}" height="{}" rx="{}" fill="{}" stroke="lightgray"/>"#,
        -NODE_W / 2.0,
        -BOX_H / 2.0,
        NODE_W,
        BOX_H,
        RADIUS,
        fill
    );

    if node.label.is_digest() {
        if let Some(caption) = caption(node, leaf_level) {
            let _ = writeln!(
                out,
                r#"    <text text-anchor="middle" dominant-baseline="central" y="-10">{}</text>"#,
                caption
            );
        }
    }

    let full = node.label.to_string();
    if !full.is_empty() {
        let _ = writeln!(
            out,
            r#"    <text text-anchor="middle" dominant-baseline="central" y="15"><title>{}</title>{}</text>"#,
            escape(&full),
            escape(&node.label.truncated())
        );
    }
    out.push_str("  </g>\n");
}

fn caption(node: &PositionedNode, leaf_level: u32) -> Option<String> {
    match node.id {
        NodeId::Sibling(level) => Some(format!("proof[{}]", leaf_level - level)),
        NodeId::Path(level) if level == leaf_level => Some("final".to_string()),
        NodeId::Path(0) => Some("root".to_string()),
        NodeId::Path(_) => None,
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::project;
    use crate::pattern::OrientationPattern;
    use crate::tree::ProofTree;

    #[test]
    fn test_svg_contains_every_node_and_edge() {
        let tree = ProofTree::build(3, OrientationPattern::alternating(3), &[], None).unwrap();
        let layout = project(&tree);
        let svg = render_svg(&layout, Zoom::default());

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<g id=").count(), 7);
        assert_eq!(svg.matches("<line ").count(), 6);
        assert!(svg.contains(r#"id="sib-3""#));
        assert!(svg.contains(&format!(r#"viewBox="{}""#, layout.bounds.view_box())));
    }

    #[test]
    fn test_svg_captions_for_digests() {
        let proof = [Some([1u8; 32]), Some([2u8; 32])];
        let tree = ProofTree::derive(2, OrientationPattern::all_left(2), &proof, Some([0u8; 32])).unwrap();
        let svg = render_svg(&project(&tree), Zoom::new(0.5));

        assert!(svg.contains(">final<"));
        assert!(svg.contains(">proof[0]<"));
        assert!(svg.contains(">proof[1]<"));
        assert!(svg.contains("0x0101...0101"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("<a&b>"), "&lt;a&amp;b&gt;");
    }
}
