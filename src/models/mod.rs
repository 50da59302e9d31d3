//! 数据模型层

pub mod tree;

pub use tree::{NavigatorTree, NodeId, NodeKind, SnapshotNode, TreeError, TreeRow};
