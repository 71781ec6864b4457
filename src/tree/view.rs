//! What the renderer draws: one entry per live node, parents first.

use std::fmt;

use crate::context::{KspType, PcType};
use crate::core::address::Address;
use crate::core::props::MatProps;

/// The part a node plays for its parent, used for form headings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Root,
    BlockJacobiSub,
    AsmSub,
    RedundantSub,
    KspSub,
    FieldSplit(usize),
    /// Level 0 of mg/gamg.
    CoarseGrid,
    Smoothing(usize),
}

impl NodeRole {
    /// Role of child `index` under a parent of type `parent`, or root when `None`.
    pub fn of(parent: Option<PcType>, index: usize) -> NodeRole {
        match parent {
            None => NodeRole::Root,
            Some(PcType::BlockJacobi) => NodeRole::BlockJacobiSub,
            Some(PcType::Asm) => NodeRole::AsmSub,
            Some(PcType::Redundant) => NodeRole::RedundantSub,
            Some(PcType::FieldSplit) => NodeRole::FieldSplit(index),
            Some(PcType::Mg | PcType::Gamg) if index == 0 => NodeRole::CoarseGrid,
            Some(PcType::Mg | PcType::Gamg) => NodeRole::Smoothing(index),
            // ksp, and anything that should not own children
            Some(_) => NodeRole::KspSub,
        }
    }

    /// Whether a form for this node lets the user edit matrix properties.
    /// Other sub-solvers solve the same operator as their parent.
    pub fn props_editable(self) -> bool {
        matches!(self, NodeRole::Root | NodeRole::FieldSplit(_))
    }

    pub fn title(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Root => write!(f, "Root Solver Options"),
            NodeRole::BlockJacobiSub => write!(f, "Bjacobi Solver Options"),
            NodeRole::AsmSub => write!(f, "ASM Solver Options"),
            NodeRole::RedundantSub => write!(f, "Redundant Solver Options"),
            NodeRole::KspSub => write!(f, "KSP Solver Options"),
            NodeRole::FieldSplit(i) => write!(f, "Fieldsplit {i} Options"),
            NodeRole::CoarseGrid => write!(f, "Coarse Grid Solver (Level 0)"),
            NodeRole::Smoothing(l) => write!(f, "Smoothing (Level {l})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub address: Address,
    pub parent: Option<Address>,
    pub pc_type: PcType,
    pub ksp_type: KspType,
    pub props: MatProps,
    pub role: NodeRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multigrid_levels() {
        assert_eq!(NodeRole::of(Some(PcType::Gamg), 0), NodeRole::CoarseGrid);
        assert_eq!(NodeRole::of(Some(PcType::Mg), 2).title(), "Smoothing (Level 2)");
        assert_eq!(NodeRole::of(Some(PcType::FieldSplit), 1).title(), "Fieldsplit 1 Options");
    }

    #[test]
    fn only_root_and_splits_edit_props() {
        assert!(NodeRole::Root.props_editable());
        assert!(NodeRole::FieldSplit(0).props_editable());
        assert!(!NodeRole::CoarseGrid.props_editable());
        assert!(!NodeRole::BlockJacobiSub.props_editable());
    }
}
