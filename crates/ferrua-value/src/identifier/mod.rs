//! Protocol identifiers: node ids and their cross-server expansion.

pub mod expanded;
pub mod node_id;

pub use expanded::ExpandedNodeId;
pub use node_id::{Identifier, NodeId};
