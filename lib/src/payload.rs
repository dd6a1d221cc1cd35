use alloy_sol_types::SolCall;
use serde::{Deserialize, Serialize};

use crate::error::{PayloadError, TreeError};
use crate::joinTournamentCall;
use crate::pattern::OrientationPattern;
use crate::tree::ProofTree;
use crate::types::{Label, NodeId, ProofSequence, H256, ZERO_DIGEST};

/// Arguments of `joinTournament(bytes32,bytes32[],bytes32,bytes32)`.
///
/// Inbound it seeds the tree (leaf + bottom-up proof); outbound it is read
/// back off the tree's labels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofPayload {
    pub final_state: H256,
    pub proof: Vec<H256>,
    pub left_node: H256,
    pub right_node: H256,
}

impl ProofPayload {
    /// Decode transaction input (selector included).
    pub fn decode_calldata(data: &[u8]) -> Result<Self, PayloadError> {
        let call = joinTournamentCall::abi_decode(data)
            .map_err(|e| PayloadError::Decode(e.to_string()))?;
        Ok(Self {
            final_state: call.finalState.0,
            proof: call.proof.iter().map(|p| p.0).collect(),
            left_node: call.leftNode.0,
            right_node: call.rightNode.0,
        })
    }

    pub fn encode_calldata(&self) -> Vec<u8> {
        joinTournamentCall {
            finalState: self.final_state.into(),
            proof: self.proof.iter().map(|p| (*p).into()).collect(),
            leftNode: self.left_node.into(),
            rightNode: self.right_node.into(),
        }
        .abi_encode()
    }

    /// All-zero payload of the given height ("blank input").
    pub fn zeroed(height: u32) -> Self {
        Self {
            final_state: ZERO_DIGEST,
            proof: vec![ZERO_DIGEST; height as usize],
            left_node: ZERO_DIGEST,
            right_node: ZERO_DIGEST,
        }
    }

    pub fn height(&self) -> u32 {
        self.proof.len() as u32
    }

    pub fn proof_sequence(&self) -> ProofSequence {
        self.proof.iter().copied().map(Some).collect()
    }

    /// Build the tree this payload describes and derive every path label.
    pub fn to_tree(&self, pattern: OrientationPattern) -> Result<ProofTree, TreeError> {
        ProofTree::derive(
            self.height(),
            pattern,
            &self.proof_sequence(),
            Some(self.final_state),
        )
    }

    /// Read the call arguments off the tree: siblings bottom-up, the leaf,
    /// `sib-1` as the left node and `path-1` as the right node.
    pub fn from_tree(tree: &ProofTree) -> Result<Self, PayloadError> {
        let height = tree.height();
        if height == 0 {
            return Err(PayloadError::EmptyProof);
        }

        let digest_at = |id: NodeId| -> Result<H256, PayloadError> {
            tree.label(id)
                .and_then(Label::digest)
                .copied()
                .ok_or(PayloadError::MissingValue(id))
        };

        let proof = (1..=height)
            .rev()
            .map(|level| digest_at(NodeId::Sibling(level)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            final_state: digest_at(NodeId::Path(height))?,
            proof,
            left_node: digest_at(NodeId::Sibling(1))?,
            right_node: digest_at(NodeId::Path(1))?,
        })
    }
}
