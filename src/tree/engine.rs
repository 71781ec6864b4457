//! Validated edits over the configuration tree.
//!
//! `ConfigTree` owns the node store and the defaulting rules. The only way to
//! change a node is `apply_edit`, which validates the whole proposal before
//! touching anything and then reconciles the node's children with the fan-out
//! its new preconditioner declares:
//!
//! 1. a changed preconditioner type drops the entire previous subtree,
//! 2. children past the new fan-out are tombstoned with their subtrees,
//! 3. missing children are synthesized from the defaulting rules and expanded
//!    recursively until every branch ends in a terminal preconditioner.

use tracing::{debug, info, warn};

use crate::config::TreeOptions;
use crate::context::{KspType, PcParams, PcType};
use crate::core::address::Address;
use crate::core::props::MatProps;
use crate::error::TreeError;
use crate::rules::{DefaultRules, ParentContext, Recommendation};
use crate::tree::edit::ProposedEdit;
use crate::tree::node::ConfigNode;
use crate::tree::store::NodeStore;
use crate::tree::view::{NodeRole, TreeEntry};

#[derive(Clone, Debug)]
pub struct ConfigTree {
    store: NodeStore,
    rules: DefaultRules,
}

impl ConfigTree {
    /// Create the root from `options` and materialize its sub-solvers.
    pub fn new(options: &TreeOptions) -> Result<Self, TreeError> {
        options.validate()?;
        let rules = DefaultRules::new(&options.defaults)?;
        let props = options.root.props();
        let rec = rules.recommend(None, props);
        let pc_type = options.root.pc_type()?.unwrap_or(rec.pc_type);
        let ksp_type = options.root.ksp_type()?.unwrap_or(rec.ksp_type);

        let tree = Self::seeded(rules, props, ksp_type, pc_type);
        info!(pc = %pc_type, ksp = %ksp_type, nodes = tree.store.len(), "configuration tree created");
        Ok(tree)
    }

    /// A store holding just the root, with its sub-solvers synthesized.
    fn seeded(rules: DefaultRules, props: MatProps, ksp_type: KspType, pc_type: PcType) -> Self {
        let params = rules.params_for(pc_type);
        let ctx = ParentContext { pc_type, props };
        let fan_out = params.fan_out();
        let mut store = NodeStore::new();
        store.put(ConfigNode::new(Address::root(), props, ksp_type, params));
        let mut tree = Self { store, rules };
        tree.synthesize_children(&Address::root(), &ctx, fan_out);
        tree
    }

    /// Adopt an already populated store. No expansion is performed.
    pub fn from_parts(store: NodeStore, rules: DefaultRules) -> Self {
        Self { store, rules }
    }

    pub fn store(&self) -> &NodeStore {
        &self.store
    }

    pub fn rules(&self) -> &DefaultRules {
        &self.rules
    }

    pub fn get(&self, address: &Address) -> Result<&ConfigNode, TreeError> {
        self.store.get(address)
    }

    /// Context a sub-solver's defaults are derived from; `None` for the root.
    pub fn parent_context(&self, address: &Address) -> Result<Option<ParentContext>, TreeError> {
        address
            .parent()
            .map(|p| self.store.get(&p).map(|n| ParentContext { pc_type: n.pc_type(), props: n.props }))
            .transpose()
    }

    /// Defaults for the node at `address` if it had properties `props`.
    pub fn recommend_for(&self, address: &Address, props: MatProps) -> Result<Recommendation, TreeError> {
        self.store.get(address)?;
        let ctx = self.parent_context(address)?;
        Ok(self.rules.recommend(ctx.as_ref(), props))
    }

    pub fn role_of(&self, address: &Address) -> Result<NodeRole, TreeError> {
        let parent = self.parent_context(address)?.map(|c| c.pc_type);
        Ok(NodeRole::of(parent, address.last_index().unwrap_or(0)))
    }

    /// Run every validation rule for `edit` without writing anything.
    /// Returns the parsed preconditioner parameters.
    pub fn validate_edit(&self, address: &Address, edit: &ProposedEdit) -> Result<PcParams, TreeError> {
        self.store.get(address)?;
        if !edit.props.is_consistent() {
            return Err(TreeError::InvalidPropertyCombination);
        }
        if let Some(parent) = address.parent() {
            let parent = self.store.get(&parent)?;
            if let Some(property) = edit.props.missing_from_parent(parent.props) {
                return Err(TreeError::ParentChildPropertyMismatch { address: address.to_string(), property });
            }
        }
        let params = PcParams::from_fields(edit.pc_type, &edit.fields)?;
        if params.pc_type() == PcType::FieldSplit && !edit.props.block_structured() {
            return Err(TreeError::StructureRequired { address: address.to_string() });
        }
        Ok(params)
    }

    /// Validate and commit `edit` at `address`.
    ///
    /// On error nothing has been written.
    pub fn apply_edit(&mut self, address: &Address, edit: &ProposedEdit) -> Result<(), TreeError> {
        let params = self.validate_edit(address, edit).inspect_err(|e| {
            warn!(address = %address, error = %e, "edit rejected");
        })?;

        if self.store.get(address)?.pc_type() != params.pc_type() {
            let dropped = self.prune_children(address)?;
            debug!(address = %address, dropped = dropped.len(), "preconditioner type changed");
        }
        let node = self.store.get_mut(address)?;
        node.props = edit.props;
        node.ksp_type = edit.ksp_type;
        node.pc = params;

        self.strengthen_descendants(address)?;
        self.reconcile(address)?;
        info!(
            address = %address,
            pc = %edit.pc_type,
            ksp = %edit.ksp_type,
            nodes = self.store.len(),
            "edit committed"
        );
        Ok(())
    }

    /// Tombstone every child subtree of `address` and zero its fan-out parameter.
    fn prune_children(&mut self, address: &Address) -> Result<Vec<Address>, TreeError> {
        let children: Vec<Address> = self.store.children(address).map(|n| n.address.clone()).collect();
        let mut removed = Vec::new();
        for child in &children {
            removed.extend(self.store.tombstone_subtree(child));
        }
        self.store.get_mut(address)?.pc.clear_fan_out();
        Ok(removed)
    }

    /// Drop children beyond the declared fan-out, then create the missing ones.
    fn reconcile(&mut self, address: &Address) -> Result<(), TreeError> {
        let target = self.store.get(address)?.fan_out();
        let excess: Vec<Address> = self
            .store
            .children(address)
            .filter(|n| n.address.last_index().is_some_and(|i| i >= target))
            .map(|n| n.address.clone())
            .collect();
        for child in &excess {
            self.store.tombstone_subtree(child);
        }
        self.expand(address)
    }

    /// Synthesize every missing child of `address`, each fully expanded.
    fn expand(&mut self, address: &Address) -> Result<(), TreeError> {
        let node = self.store.get(address)?;
        let ctx = ParentContext { pc_type: node.pc_type(), props: node.props };
        let fan_out = node.fan_out();
        self.synthesize_children(address, &ctx, fan_out);
        Ok(())
    }

    /// Fill child slots `0..fan_out` of the node described by `ctx`.
    fn synthesize_children(&mut self, address: &Address, ctx: &ParentContext, fan_out: usize) {
        let child_props = ctx.props.inherited(ctx.pc_type.info().children_keep_block_structure);
        for index in 0..fan_out {
            let child = self.store.child_address(address, index);
            if self.store.contains(&child) {
                continue;
            }
            let rec = self.rules.recommend(Some(ctx), child_props);
            debug!(address = %child, pc = %rec.pc_type, ksp = %rec.ksp_type, "synthesized sub-solver");
            let child_ctx = ParentContext { pc_type: rec.pc_type, props: child_props };
            let child_fan_out = rec.params.fan_out();
            self.store.put(ConfigNode::new(child.clone(), child_props, rec.ksp_type, rec.params));
            self.synthesize_children(&child, &child_ctx, child_fan_out);
        }
    }

    /// Raise symmetric/positive-definite flags below `address` to match their parents.
    fn strengthen_descendants(&mut self, address: &Address) -> Result<(), TreeError> {
        let below: Vec<Address> = self.store.descendants(address).map(|n| n.address.clone()).collect();
        for a in below {
            let Some(parent) = a.parent() else { continue };
            let required = self.store.get(&parent)?.props;
            let node = self.store.get_mut(&a)?;
            let raised = node.props.strengthened_by(required);
            if raised != node.props {
                debug!(address = %a, "inherited stronger matrix properties");
                node.props = raised;
            }
        }
        Ok(())
    }

    /// Check property consistency, parent dominance, fan-out and prefix closure
    /// over every live node.
    pub fn check_invariants(&self) -> Result<(), TreeError> {
        let violated = |msg: String| Err(TreeError::InvariantViolated(msg));
        if !self.store.is_empty() && !self.store.contains(&Address::root()) {
            return violated("root is missing".into());
        }
        for node in self.store.iter() {
            let a = &node.address;
            if !node.props.is_consistent() {
                return violated(format!("{a}: positive definite but not symmetric"));
            }
            if let Some(p) = a.parent() {
                let Ok(parent) = self.store.get(&p) else {
                    return violated(format!("{a}: parent {p} is not live"));
                };
                if !node.props.satisfies_parent(parent.props) {
                    return violated(format!("{a}: weaker than parent {p}"));
                }
            }
            let fan_out = node.fan_out();
            let live = self.store.child_count(a);
            let stray = self.store.children(a).any(|c| c.address.last_index().is_some_and(|i| i >= fan_out));
            if live != fan_out || stray {
                return violated(format!("{a}: {live} live children, fan-out {fan_out}"));
            }
        }
        Ok(())
    }

    /// Pre-order snapshot for the renderer.
    pub fn current_tree(&self) -> Vec<TreeEntry> {
        self.store
            .iter()
            .map(|n| {
                let parent = n.address.parent();
                let parent_type = parent.as_ref().and_then(|p| self.store.get(p).ok()).map(|p| p.pc_type());
                TreeEntry {
                    address: n.address.clone(),
                    role: NodeRole::of(parent_type, n.address.last_index().unwrap_or(0)),
                    parent,
                    pc_type: n.pc_type(),
                    ksp_type: n.ksp_type,
                    props: n.props,
                }
            })
            .collect()
    }
}

impl Default for ConfigTree {
    /// The root-mode recommendation for a general matrix, with default parameters.
    fn default() -> Self {
        let rules = DefaultRules::default();
        let rec = rules.recommend(None, MatProps::empty());
        Self::seeded(rules, MatProps::empty(), rec.ksp_type, rec.pc_type)
    }
}
