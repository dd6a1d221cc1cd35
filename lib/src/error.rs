use thiserror::Error;

use crate::types::NodeId;

/// Rejections at the text input boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LabelError {
    #[error("digest must be 64 hex digits, got {0}")]
    Length(usize),

    #[error("digest is not valid hex: {0}")]
    NotHex(String),

    #[error("unknown node identifier: {0}")]
    InvalidNodeId(String),
}

/// Structural precondition violations of the tree builder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("orientation pattern has {pattern} entries but tree height is {height}")]
    PatternLength { height: u32, pattern: usize },

    #[error("proof has {proof} entries but tree height is {height}")]
    ProofLength { height: u32, proof: usize },

    #[error("node or edge list does not match a tree of height {0}")]
    Shape(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("{0} is derived and cannot be edited")]
    NotEditable(NodeId),

    #[error("{0} does not exist in a tree of height {1}")]
    UnknownNode(NodeId, u32),

    #[error(transparent)]
    Label(#[from] LabelError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadError {
    #[error("call data does not decode as joinTournament: {0}")]
    Decode(String),

    #[error("{0} does not hold a digest")]
    MissingValue(NodeId),

    #[error("payload carries an empty proof")]
    EmptyProof,

    #[error(transparent)]
    Tree(#[from] TreeError),
}
