use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LabelError;

/// 32-byte hash type
pub type H256 = [u8; 32];

/// The all-zero digest used by the "blank input" proof.
pub const ZERO_DIGEST: H256 = [0u8; 32];

/// Identifier of a vertex in the proof diagram.
///
/// `Path(0)` is the root, `Path(height)` is the leaf. Siblings exist for
/// levels `1..=height` only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum NodeId {
    /// Node on the root-to-leaf spine
    Path(u32),
    /// Off-spine node supplied by the proof
    Sibling(u32),
}

impl NodeId {
    pub const ROOT: NodeId = NodeId::Path(0);

    pub fn level(&self) -> u32 {
        match self {
            NodeId::Path(level) | NodeId::Sibling(level) => *level,
        }
    }

    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }

    pub fn is_sibling(&self) -> bool {
        matches!(self, NodeId::Sibling(_))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Path(level) => write!(f, "path-{}", level),
            NodeId::Sibling(level) => write!(f, "sib-{}", level),
        }
    }
}

impl FromStr for NodeId {
    type Err = LabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "root" {
            return Ok(Self::ROOT);
        }
        let (kind, level) = s
            .split_once('-')
            .ok_or_else(|| LabelError::InvalidNodeId(s.to_string()))?;
        let level: u32 = level
            .parse()
            .map_err(|_| LabelError::InvalidNodeId(s.to_string()))?;
        match kind {
            "path" => Ok(NodeId::Path(level)),
            "sib" if level > 0 => Ok(NodeId::Sibling(level)),
            _ => Err(LabelError::InvalidNodeId(s.to_string())),
        }
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for NodeId {
    type Error = LabelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Text carried by a node.
///
/// Only `Digest` is a real hash. `Placeholder` marks display sentinels such as
/// `"root"` or `"proof[3]"`, `Empty` marks a value not derived yet.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Label {
    #[default]
    Empty,
    Placeholder(String),
    Digest(H256),
}

impl Label {
    pub fn root_placeholder() -> Self {
        Label::Placeholder("root".to_string())
    }

    pub fn proof_placeholder(index: usize) -> Self {
        Label::Placeholder(format!("proof[{}]", index))
    }

    pub fn digest(&self) -> Option<&H256> {
        match self {
            Label::Digest(d) => Some(d),
            _ => None,
        }
    }

    pub fn is_digest(&self) -> bool {
        self.digest().is_some()
    }

    /// Bytes fed to the hash combiner. Non-digest labels contribute nothing.
    pub fn operand(&self) -> &[u8] {
        match self {
            Label::Digest(d) => d.as_slice(),
            _ => &[],
        }
    }

    /// Shortened form for diagram boxes, e.g. `0x1234...cdef`.
    pub fn truncated(&self) -> String {
        let full = self.to_string();
        let chars: Vec<char> = full.chars().collect();
        if chars.len() > 15 {
            let head: String = chars[..6].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}...{}", head, tail)
        } else {
            full
        }
    }
}

impl From<H256> for Label {
    fn from(digest: H256) -> Self {
        Label::Digest(digest)
    }
}

impl From<Option<H256>> for Label {
    fn from(digest: Option<H256>) -> Self {
        digest.map(Label::Digest).unwrap_or_default()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Empty => Ok(()),
            Label::Placeholder(text) => f.write_str(text),
            Label::Digest(d) => write!(f, "{}", encode_digest(d)),
        }
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.to_string()
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        if text.is_empty() {
            return Label::Empty;
        }
        match parse_digest(&text) {
            Ok(d) => Label::Digest(d),
            Err(_) => Label::Placeholder(text),
        }
    }
}

/// Format a digest as `0x` followed by 64 lowercase hex digits.
pub fn encode_digest(digest: &H256) -> String {
    format!("0x{}", hex::encode(digest))
}

/// Parse a fixed-length hex digest. The `0x` prefix is optional.
pub fn parse_digest(text: &str) -> Result<H256, LabelError> {
    let text = text.trim();
    let body = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if body.len() != 64 {
        return Err(LabelError::Length(body.len()));
    }
    let mut out = [0u8; 32];
    hex::decode_to_slice(body, &mut out).map_err(|_| LabelError::NotHex(text.to_string()))?;
    Ok(out)
}

/// One vertex of the proof diagram.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub level: u32,
    pub label: Label,
}

impl Node {
    pub fn new(id: NodeId, label: Label) -> Self {
        Self {
            id,
            level: id.level(),
            label,
        }
    }
}

/// Directed parent -> child relation. The parent sits one level above the child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
}

/// Bottom-up proof entries: index 0 pairs with the leaf.
pub type ProofSequence = Vec<Option<H256>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_text_form() {
        assert_eq!(NodeId::Path(3).to_string(), "path-3");
        assert_eq!(NodeId::Sibling(1).to_string(), "sib-1");
        assert_eq!("root".parse::<NodeId>().unwrap(), NodeId::ROOT);
        assert_eq!("sib-7".parse::<NodeId>().unwrap(), NodeId::Sibling(7));
        assert!("sib-0".parse::<NodeId>().is_err());
        assert!("leaf-2".parse::<NodeId>().is_err());
        assert!("path-x".parse::<NodeId>().is_err());
    }

    #[test]
    fn test_parse_digest_shapes() {
        let hex64 = "ab".repeat(32);
        assert_eq!(parse_digest(&hex64).unwrap(), [0xab; 32]);
        assert_eq!(parse_digest(&format!("0x{}", hex64)).unwrap(), [0xab; 32]);
        assert_eq!(parse_digest("0x1234"), Err(LabelError::Length(4)));
        assert!(matches!(
            parse_digest(&format!("0x{}", "zz".repeat(32))),
            Err(LabelError::NotHex(_))
        ));
    }

    #[test]
    fn test_label_text_round_trip() {
        let digest = Label::Digest([0x11; 32]);
        let text = digest.to_string();
        assert!(text.starts_with("0x1111"));
        assert_eq!(Label::from(text), digest);
        assert_eq!(Label::from(String::new()), Label::Empty);
        assert_eq!(Label::from("proof[2]".to_string()), Label::proof_placeholder(2));
    }

    #[test]
    fn test_label_truncation() {
        assert_eq!(Label::root_placeholder().truncated(), "root");
        assert_eq!(Label::Digest([0xab; 32]).truncated(), "0xabab...abab");
    }

    #[test]
    fn test_truncation_keeps_multibyte_chars_whole() {
        let short = Label::from("€€€€€€".to_string());
        assert_eq!(short.truncated(), "€€€€€€");

        let long = Label::from("€".repeat(20));
        assert_eq!(long.truncated(), "€€€€€€...€€€€");
    }

    #[test]
    fn test_placeholder_operand_is_empty() {
        assert!(Label::root_placeholder().operand().is_empty());
        assert!(Label::Empty.operand().is_empty());
        assert_eq!(Label::Digest([1; 32]).operand().len(), 32);
    }

    #[test]
    fn test_node_serializes_as_text() {
        let node = Node::new(NodeId::Sibling(2), Label::proof_placeholder(0));
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"id":"sib-2","level":2,"label":"proof[0]"}"#);
    }
}
