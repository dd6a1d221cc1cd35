use alloy_sol_types::sol;

pub mod types;
pub mod error;
pub mod config;
pub mod hasher;
pub mod pattern;
pub mod tree;
pub mod engine;
pub mod layout;
pub mod render;
pub mod payload;

#[cfg(feature = "std")]
pub mod session;

pub use types::*;
pub use error::*;
pub use config::*;
pub use hasher::*;
pub use pattern::*;
pub use tree::*;
pub use engine::*;
pub use layout::*;
pub use render::*;
pub use payload::*;

#[cfg(feature = "std")]
pub use session::*;

sol! {
    /// Entry point of the tournament contract that consumes the proof.
    function joinTournament(bytes32 finalState, bytes32[] proof, bytes32 leftNode, bytes32 rightNode) external payable;
}
