//! Collaborator seams for ksptree.

use crate::error::TreeError;
use crate::tree::view::TreeEntry;

/// Receives what the core pushes to the rendering collaborator.
pub trait TreeObserver {
    /// The committed tree changed and should be redrawn.
    fn tree_changed(&mut self, tree: &[TreeEntry]);
    /// An edit was rejected; show `error` as a blocking message.
    fn validation_error(&mut self, error: &TreeError);
}

/// Observer that ignores everything.
impl TreeObserver for () {
    fn tree_changed(&mut self, _tree: &[TreeEntry]) {}
    fn validation_error(&mut self, _error: &TreeError) {}
}
