//! Address-keyed storage for live configuration nodes.
//!
//! Removing a node tombstones it: the address stops resolving and a later
//! expansion may synthesize a brand-new node in the same position, but the old
//! node's settings are gone for good.

use std::collections::BTreeMap;
use std::ops::Bound;

use tracing::debug;

use crate::core::address::Address;
use crate::error::TreeError;
use crate::tree::node::ConfigNode;

#[derive(Clone, Debug, Default)]
pub struct NodeStore {
    nodes: BTreeMap<Address, ConfigNode>,
    tombstoned: usize,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Live node at `address`; tombstoned and never-created addresses are `NotFound`.
    pub fn get(&self, address: &Address) -> Result<&ConfigNode, TreeError> {
        self.nodes.get(address).ok_or_else(|| TreeError::NotFound(address.to_string()))
    }

    pub(crate) fn get_mut(&mut self, address: &Address) -> Result<&mut ConfigNode, TreeError> {
        self.nodes.get_mut(address).ok_or_else(|| TreeError::NotFound(address.to_string()))
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.nodes.contains_key(address)
    }

    /// Insert or replace the node at `node.address`.
    pub fn put(&mut self, node: ConfigNode) {
        self.nodes.insert(node.address.clone(), node);
    }

    pub fn child_address(&self, parent: &Address, index: usize) -> Address {
        parent.child(index)
    }

    pub fn parent_address(&self, address: &Address) -> Option<Address> {
        address.parent()
    }

    /// Live direct children of `address`, in index order.
    pub fn children(&self, address: &Address) -> impl Iterator<Item = &ConfigNode> + '_ {
        let depth = address.depth() + 1;
        self.descendants(address).filter(move |n| n.address.depth() == depth)
    }

    /// Number of live direct children. This is what exists, not the declared fan-out.
    pub fn child_count(&self, address: &Address) -> usize {
        self.children(address).count()
    }

    /// Every live node strictly below `address`, in pre-order.
    pub fn descendants(&self, address: &Address) -> impl Iterator<Item = &ConfigNode> + '_ {
        let base = address.clone();
        self.nodes
            .range((Bound::Excluded(address.clone()), Bound::Unbounded))
            .take_while(move |(a, _)| base.is_ancestor_of(a))
            .map(|(_, n)| n)
    }

    /// Live addresses in pre-order (parents before children, siblings by index).
    pub fn all_live_addresses(&self) -> Vec<Address> {
        self.nodes.keys().cloned().collect()
    }

    /// Live nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &ConfigNode> + '_ {
        self.nodes.values()
    }

    /// Remove `address` and its whole subtree; returns the removed addresses.
    pub fn tombstone_subtree(&mut self, address: &Address) -> Vec<Address> {
        let mut doomed: Vec<Address> = self.descendants(address).map(|n| n.address.clone()).collect();
        if self.contains(address) {
            doomed.insert(0, address.clone());
        }
        for a in &doomed {
            self.nodes.remove(a);
            debug!(address = %a, "tombstoned solver node");
        }
        self.tombstoned += doomed.len();
        doomed
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes removed over the lifetime of this store.
    pub fn tombstoned(&self) -> usize {
        self.tombstoned
    }
}
