use sha3::{Digest, Keccak256};

use crate::types::H256;

/// Compute Keccak256 hash
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash `left || right`. Operands may be shorter than 32 bytes when a
/// placeholder label takes part in the computation.
pub fn hash_pair(left: &[u8], right: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Combine two digests in the given order.
pub fn combine(left: &H256, right: &H256) -> H256 {
    hash_pair(left, right)
}

/// Combine the running path value with a sibling, placing the sibling on
/// the left when `sibling_is_left` is set.
pub fn combine_oriented(current: &[u8], sibling: &[u8], sibling_is_left: bool) -> H256 {
    if sibling_is_left {
        hash_pair(sibling, current)
    } else {
        hash_pair(current, sibling)
    }
}
