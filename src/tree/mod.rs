//! The configuration tree: node storage, edits, and the mutation engine.

pub mod edit;
pub mod engine;
pub mod node;
pub mod store;
pub mod view;

pub use edit::{MAX_COUNT, ProposedEdit, RawFields, keys};
pub use engine::ConfigTree;
pub use node::ConfigNode;
pub use store::NodeStore;
pub use view::{NodeRole, TreeEntry};
