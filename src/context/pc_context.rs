//! Preconditioner context and configuration for solver nodes.
//!
//! This module defines the `PcType` tag, which names every preconditioner a
//! node can select, and the `PcParams` enum, which carries the type-specific
//! parameters for that choice. Nested preconditioners (block Jacobi, additive
//! Schwarz, redundant, KSP-as-PC, field split, multigrid) own sub-solver nodes;
//! how many is decided by the per-type row of a static dispatch table.
//!
//! # Supported Preconditioners
//!
//! - Leaves: none, jacobi, sor, ilu, icc, lu, cholesky.
//! - One sub-solver: bjacobi, asm, redundant, ksp.
//! - One sub-solver per block: fieldsplit.
//! - One sub-solver per level: mg, gamg (level 0 is the coarse grid).
//!
//! # Example
//!
//! ```rust
//! use ksptree::context::pc_context::{PcParams, PcType, MgType};
//! let pc = PcParams::Mg { mg: MgType::Multiplicative, levels: 3 };
//! assert_eq!(pc.pc_type(), PcType::Mg);
//! assert_eq!(pc.fan_out(), 3);
//! ```

use crate::error::TreeError;
use crate::tree::edit::{RawFields, keys};

option_enum! {
    /// Preconditioner tag.
    ///
    /// Variant order must match `PC_TABLE`.
    pub enum PcType: "pc type" {
        /// No preconditioning
        None => "none",
        /// Diagonal (point) Jacobi
        Jacobi => "jacobi",
        /// Successive over-relaxation
        Sor => "sor",
        /// Incomplete LU factorization
        Ilu => "ilu",
        /// Incomplete Cholesky factorization (symmetric)
        Icc => "icc",
        /// Direct LU factorization
        Lu => "lu",
        /// Direct Cholesky factorization (SPD)
        Cholesky => "cholesky",
        /// Block Jacobi with one local sub-solver
        BlockJacobi => "bjacobi",
        /// Additive Schwarz with overlapping subdomains
        Asm => "asm",
        /// Redundant solve on process subsets
        Redundant => "redundant",
        /// A full Krylov solve used as the preconditioner
        Ksp => "ksp",
        /// One sub-solver per field block
        FieldSplit => "fieldsplit",
        /// Geometric multigrid, one sub-solver per level
        Mg => "mg",
        /// Algebraic multigrid, one sub-solver per level
        Gamg => "gamg",
    }
}

option_enum! {
    /// How field-split blocks are combined.
    pub enum FieldSplitType: "fieldsplit type" {
        Additive => "additive",
        Multiplicative => "multiplicative",
        SymmetricMultiplicative => "symmetric_multiplicative",
        Special => "special",
        Schur => "schur",
    }
}

option_enum! {
    /// Multigrid cycle form.
    pub enum MgType: "mg type" {
        Multiplicative => "multiplicative",
        Additive => "additive",
        Full => "full",
        Kaskade => "kaskade",
    }
}

option_enum! {
    /// Algebraic multigrid coarsening family.
    pub enum GamgType: "gamg type" {
        Agg => "agg",
        Geo => "geo",
        Classical => "classical",
    }
}

/// How many sub-solvers a preconditioner type owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Terminal: no sub-solvers.
    Leaf,
    /// Exactly one sub-solver regardless of parameters.
    Single,
    /// One sub-solver per configured block.
    Blocks,
    /// One sub-solver per multigrid level.
    Levels,
}

/// Static per-type behaviour, looked up by tag.
#[derive(Debug)]
pub struct PcTypeInfo {
    pub arity: Arity,
    /// Whether synthesized children keep the parent's block-structure flag.
    pub children_keep_block_structure: bool,
    /// Raw form fields this type reads, in display order.
    pub fields: &'static [&'static str],
}

const fn leaf() -> PcTypeInfo {
    PcTypeInfo { arity: Arity::Leaf, children_keep_block_structure: true, fields: &[] }
}

static PC_TABLE: [PcTypeInfo; 14] = [
    leaf(), // none
    leaf(), // jacobi
    leaf(), // sor
    leaf(), // ilu
    leaf(), // icc
    leaf(), // lu
    leaf(), // cholesky
    PcTypeInfo { arity: Arity::Single, children_keep_block_structure: true, fields: &[keys::BJACOBI_BLOCKS] },
    PcTypeInfo { arity: Arity::Single, children_keep_block_structure: true, fields: &[keys::ASM_BLOCKS, keys::ASM_OVERLAP] },
    PcTypeInfo { arity: Arity::Single, children_keep_block_structure: true, fields: &[keys::REDUNDANT_NUMBER] },
    PcTypeInfo { arity: Arity::Single, children_keep_block_structure: true, fields: &[] },
    // field-split children never inherit block structure, which bounds expansion
    PcTypeInfo { arity: Arity::Blocks, children_keep_block_structure: false, fields: &[keys::FIELDSPLIT_TYPE, keys::FIELDSPLIT_BLOCKS] },
    PcTypeInfo { arity: Arity::Levels, children_keep_block_structure: true, fields: &[keys::MG_TYPE, keys::MG_LEVELS] },
    PcTypeInfo { arity: Arity::Levels, children_keep_block_structure: true, fields: &[keys::GAMG_TYPE, keys::GAMG_LEVELS] },
];

impl PcType {
    pub fn info(self) -> &'static PcTypeInfo {
        &PC_TABLE[self as usize]
    }

    pub fn is_leaf(self) -> bool {
        self.info().arity == Arity::Leaf
    }
}

/// Preconditioner choice together with its type-specific parameters.
///
/// `Leaf` only ever wraps a terminal `PcType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcParams {
    Leaf(PcType),
    /// Block Jacobi; the block count does not change the single sub-solver.
    BlockJacobi { blocks: usize },
    /// Additive Schwarz with `overlap` layers.
    AdditiveSchwarz { blocks: usize, overlap: usize },
    /// Redundant solve on `number` process subsets.
    Redundant { number: usize },
    /// A full KSP used as the preconditioner.
    Ksp,
    FieldSplit { split: FieldSplitType, blocks: usize },
    Mg { mg: MgType, levels: usize },
    Gamg { gamg: GamgType, levels: usize },
}

impl PcParams {
    pub fn pc_type(&self) -> PcType {
        match self {
            PcParams::Leaf(t) => *t,
            PcParams::BlockJacobi { .. } => PcType::BlockJacobi,
            PcParams::AdditiveSchwarz { .. } => PcType::Asm,
            PcParams::Redundant { .. } => PcType::Redundant,
            PcParams::Ksp => PcType::Ksp,
            PcParams::FieldSplit { .. } => PcType::FieldSplit,
            PcParams::Mg { .. } => PcType::Mg,
            PcParams::Gamg { .. } => PcType::Gamg,
        }
    }

    /// Number of sub-solver nodes this configuration requires.
    pub fn fan_out(&self) -> usize {
        match self.pc_type().info().arity {
            Arity::Leaf => 0,
            Arity::Single => 1,
            Arity::Blocks | Arity::Levels => self.count(),
        }
    }

    /// Block or level count for the multi-child types, 0 otherwise.
    fn count(&self) -> usize {
        match self {
            PcParams::FieldSplit { blocks, .. } => *blocks,
            PcParams::Mg { levels, .. } | PcParams::Gamg { levels, .. } => *levels,
            _ => 0,
        }
    }

    /// Zero the parameter that defines fan-out (field-split blocks, mg/gamg levels).
    pub fn clear_fan_out(&mut self) {
        match self {
            PcParams::FieldSplit { blocks, .. } => *blocks = 0,
            PcParams::Mg { levels, .. } | PcParams::Gamg { levels, .. } => *levels = 0,
            _ => {}
        }
    }

    /// Parse the raw form fields for `pc_type`.
    ///
    /// Counts must be digits only and at least 1. Selector fields must name a
    /// known sub-type.
    pub fn from_fields(pc_type: PcType, fields: &RawFields) -> Result<Self, TreeError> {
        Ok(match pc_type {
            PcType::BlockJacobi => PcParams::BlockJacobi { blocks: fields.count(keys::BJACOBI_BLOCKS)? },
            PcType::Asm => PcParams::AdditiveSchwarz {
                blocks: fields.count(keys::ASM_BLOCKS)?,
                overlap: fields.count(keys::ASM_OVERLAP)?,
            },
            PcType::Redundant => PcParams::Redundant { number: fields.count(keys::REDUNDANT_NUMBER)? },
            PcType::Ksp => PcParams::Ksp,
            PcType::FieldSplit => {
                let blocks = fields.count(keys::FIELDSPLIT_BLOCKS)?;
                PcParams::FieldSplit { split: fields.choice(keys::FIELDSPLIT_TYPE)?, blocks }
            }
            PcType::Mg => {
                let levels = fields.count(keys::MG_LEVELS)?;
                PcParams::Mg { mg: fields.choice(keys::MG_TYPE)?, levels }
            }
            PcType::Gamg => {
                let levels = fields.count(keys::GAMG_LEVELS)?;
                PcParams::Gamg { gamg: fields.choice(keys::GAMG_TYPE)?, levels }
            }
            leaf => PcParams::Leaf(leaf),
        })
    }

    /// Render the parameters as the raw fields a form would submit.
    pub fn to_fields(&self) -> RawFields {
        let mut f = RawFields::new();
        match self {
            PcParams::Leaf(_) | PcParams::Ksp => {}
            PcParams::BlockJacobi { blocks } => f.set(keys::BJACOBI_BLOCKS, blocks),
            PcParams::AdditiveSchwarz { blocks, overlap } => {
                f.set(keys::ASM_BLOCKS, blocks);
                f.set(keys::ASM_OVERLAP, overlap);
            }
            PcParams::Redundant { number } => f.set(keys::REDUNDANT_NUMBER, number),
            PcParams::FieldSplit { split, blocks } => {
                f.set(keys::FIELDSPLIT_TYPE, split);
                f.set(keys::FIELDSPLIT_BLOCKS, blocks);
            }
            PcParams::Mg { mg, levels } => {
                f.set(keys::MG_TYPE, mg);
                f.set(keys::MG_LEVELS, levels);
            }
            PcParams::Gamg { gamg, levels } => {
                f.set(keys::GAMG_TYPE, gamg);
                f.set(keys::GAMG_LEVELS, levels);
            }
        }
        f
    }
}
