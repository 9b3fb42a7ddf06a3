//! Scene arena: slotmap-backed drawable tree with spatial and name queries.

pub mod node;
pub mod tree;
pub mod query;

pub use node::{Drawable, InputState, NodeId, Transform};
pub use tree::Scene;
