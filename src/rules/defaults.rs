//! Recommended preconditioner/Krylov pairs and parameter defaults.
//!
//! A root (or standalone) solver is recommended from the matrix properties
//! alone. A sub-solver is recommended from the preconditioner type of its
//! parent: smoothers under multigrid, local factorizations under block
//! Jacobi and additive Schwarz, direct solves under redundant, and so on.
//! The rules are pure lookups; they never see the node store.

use crate::config::ParamDefaults;
use crate::context::{FieldSplitType, GamgType, KspType, MgType, PcParams, PcType};
use crate::core::props::MatProps;
use crate::error::TreeError;
use crate::tree::edit::MAX_COUNT;

/// The parent a sub-solver is recommended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentContext {
    pub pc_type: PcType,
    pub props: MatProps,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub pc_type: PcType,
    pub ksp_type: KspType,
    /// Defaults for `pc_type`, identical to `DefaultRules::params_for(pc_type)`.
    pub params: PcParams,
}

type SubRule = fn(&ParentContext, MatProps) -> (PcType, KspType);

static SUB_RULES: &[(PcType, SubRule)] = &[
    (PcType::BlockJacobi, local_factorization),
    (PcType::Asm, local_factorization),
    (PcType::Redundant, redundant_direct),
    (PcType::Ksp, inner_krylov),
    (PcType::FieldSplit, split_field),
    (PcType::Mg, smoother),
    (PcType::Gamg, smoother),
];

fn local_factorization(_: &ParentContext, props: MatProps) -> (PcType, KspType) {
    if props.is_spd() { (PcType::Icc, KspType::Preonly) } else { (PcType::Ilu, KspType::Preonly) }
}

fn redundant_direct(_: &ParentContext, props: MatProps) -> (PcType, KspType) {
    if props.is_spd() { (PcType::Cholesky, KspType::Preonly) } else { (PcType::Lu, KspType::Preonly) }
}

fn inner_krylov(_: &ParentContext, props: MatProps) -> (PcType, KspType) {
    if props.is_spd() { (PcType::BlockJacobi, KspType::Cg) } else { (PcType::BlockJacobi, KspType::Gmres) }
}

fn split_field(_: &ParentContext, props: MatProps) -> (PcType, KspType) {
    if props.block_structured() {
        (PcType::FieldSplit, KspType::Gmres)
    } else if props.is_spd() {
        (PcType::Icc, KspType::Cg)
    } else if props.symmetric() {
        (PcType::Icc, KspType::Minres)
    } else {
        (PcType::Ilu, KspType::Gmres)
    }
}

fn smoother(_: &ParentContext, _: MatProps) -> (PcType, KspType) {
    (PcType::Sor, KspType::Chebyshev)
}

fn standalone(props: MatProps) -> (PcType, KspType) {
    if props.block_structured() {
        (PcType::FieldSplit, KspType::Gmres)
    } else if props.is_spd() {
        (PcType::Gamg, KspType::Cg)
    } else if props.symmetric() {
        (PcType::Icc, KspType::Minres)
    } else {
        (PcType::BlockJacobi, KspType::Gmres)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRules {
    fieldsplit_type: FieldSplitType,
    fieldsplit_blocks: usize,
    mg_type: MgType,
    mg_levels: usize,
    gamg_type: GamgType,
    gamg_levels: usize,
    bjacobi_blocks: usize,
    asm_blocks: usize,
    asm_overlap: usize,
    redundant_number: usize,
}

impl Default for DefaultRules {
    fn default() -> Self {
        Self {
            fieldsplit_type: FieldSplitType::Multiplicative,
            fieldsplit_blocks: 2,
            mg_type: MgType::Multiplicative,
            mg_levels: 2,
            gamg_type: GamgType::Agg,
            gamg_levels: 2,
            bjacobi_blocks: 1,
            asm_blocks: 2,
            asm_overlap: 1,
            redundant_number: 1,
        }
    }
}

impl DefaultRules {
    /// Typed rules from configured defaults. Every count must lie in
    /// `1..=MAX_COUNT` and every selector must name a known sub-type;
    /// violations are reported as `Config` errors.
    pub fn new(d: &ParamDefaults) -> Result<Self, TreeError> {
        let count = |n: usize, name: &str| {
            if (1..=MAX_COUNT).contains(&n) {
                Ok(n)
            } else {
                Err(TreeError::Config(format!("defaults.{name} must be between 1 and {MAX_COUNT}")))
            }
        };
        let config_err = |e: TreeError| TreeError::Config(e.to_string());
        Ok(Self {
            fieldsplit_type: d.fieldsplit_type.parse().map_err(config_err)?,
            fieldsplit_blocks: count(d.fieldsplit_blocks, "fieldsplit_blocks")?,
            mg_type: d.mg_type.parse().map_err(config_err)?,
            mg_levels: count(d.mg_levels, "mg_levels")?,
            gamg_type: d.gamg_type.parse().map_err(config_err)?,
            gamg_levels: count(d.gamg_levels, "gamg_levels")?,
            bjacobi_blocks: count(d.bjacobi_blocks, "bjacobi_blocks")?,
            asm_blocks: count(d.asm_blocks, "asm_blocks")?,
            asm_overlap: count(d.asm_overlap, "asm_overlap")?,
            redundant_number: count(d.redundant_number, "redundant_number")?,
        })
    }

    /// Recommend a solver for a node with properties `props`.
    ///
    /// Without a context this is root mode; with one it is sub-solver mode
    /// for a child of `context.pc_type`. Terminal parents own no sub-solvers,
    /// so asking on their behalf falls back to root mode.
    pub fn recommend(&self, context: Option<&ParentContext>, props: MatProps) -> Recommendation {
        let (pc_type, ksp_type) = context
            .and_then(|ctx| {
                SUB_RULES
                    .iter()
                    .find(|(t, _)| *t == ctx.pc_type)
                    .map(|(_, rule)| rule(ctx, props))
            })
            .unwrap_or_else(|| standalone(props));
        Recommendation { pc_type, ksp_type, params: self.params_for(pc_type) }
    }

    /// Type-specific defaults shown when `pc_type` is picked in a form.
    pub fn params_for(&self, pc_type: PcType) -> PcParams {
        match pc_type {
            PcType::FieldSplit => PcParams::FieldSplit { split: self.fieldsplit_type, blocks: self.fieldsplit_blocks },
            PcType::Mg => PcParams::Mg { mg: self.mg_type, levels: self.mg_levels },
            PcType::Gamg => PcParams::Gamg { gamg: self.gamg_type, levels: self.gamg_levels },
            PcType::BlockJacobi => PcParams::BlockJacobi { blocks: self.bjacobi_blocks },
            PcType::Asm => PcParams::AdditiveSchwarz { blocks: self.asm_blocks, overlap: self.asm_overlap },
            PcType::Redundant => PcParams::Redundant { number: self.redundant_number },
            PcType::Ksp => PcParams::Ksp,
            leaf => PcParams::Leaf(leaf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pc_type: PcType) -> ParentContext {
        ParentContext { pc_type, props: MatProps::empty() }
    }

    #[test]
    fn root_mode() {
        let r = DefaultRules::default();
        assert_eq!(r.recommend(None, MatProps::BLOCK_STRUCTURED).pc_type, PcType::FieldSplit);
        let spd = r.recommend(None, MatProps::SPD);
        assert_eq!((spd.pc_type, spd.ksp_type), (PcType::Gamg, KspType::Cg));
        assert_eq!(r.recommend(None, MatProps::SYMMETRIC).ksp_type, KspType::Minres);
        let general = r.recommend(None, MatProps::empty());
        assert_eq!((general.pc_type, general.ksp_type), (PcType::BlockJacobi, KspType::Gmres));
    }

    #[test]
    fn sub_solver_mode() {
        let r = DefaultRules::default();
        let smooth = r.recommend(Some(&ctx(PcType::Mg)), MatProps::SPD);
        assert_eq!((smooth.pc_type, smooth.ksp_type), (PcType::Sor, KspType::Chebyshev));
        assert_eq!(r.recommend(Some(&ctx(PcType::BlockJacobi)), MatProps::SPD).pc_type, PcType::Icc);
        assert_eq!(r.recommend(Some(&ctx(PcType::Redundant)), MatProps::empty()).pc_type, PcType::Lu);
        assert_eq!(r.recommend(Some(&ctx(PcType::Ksp)), MatProps::empty()).pc_type, PcType::BlockJacobi);
        assert_eq!(r.recommend(Some(&ctx(PcType::FieldSplit)), MatProps::empty()).pc_type, PcType::Ilu);
    }

    #[test]
    fn leaf_context_falls_back_to_root_mode() {
        let r = DefaultRules::default();
        assert_eq!(r.recommend(Some(&ctx(PcType::Ilu)), MatProps::SPD), r.recommend(None, MatProps::SPD));
    }

    #[test]
    fn recommendation_params_agree_with_params_for() {
        let r = DefaultRules::default();
        for bits in 0..8u8 {
            let props = MatProps::from_bits_truncate(bits);
            for &parent in PcType::ALL {
                let rec = r.recommend(Some(&ctx(parent)), props);
                assert_eq!(rec.params, r.params_for(rec.pc_type));
            }
        }
    }

    #[test]
    fn non_symmetric_never_gets_symmetric_krylov() {
        let r = DefaultRules::default();
        let props = MatProps::BLOCK_STRUCTURED;
        for &parent in PcType::ALL {
            assert!(!r.recommend(Some(&ctx(parent)), props).ksp_type.requires_symmetry());
        }
        assert!(!r.recommend(None, MatProps::empty()).ksp_type.requires_symmetry());
    }

    #[test]
    fn configured_counts_flow_through() {
        let d = ParamDefaults { mg_levels: 5, fieldsplit_type: "schur".into(), ..ParamDefaults::default() };
        let r = DefaultRules::new(&d).unwrap();
        assert_eq!(r.params_for(PcType::Mg), PcParams::Mg { mg: MgType::Multiplicative, levels: 5 });
        assert_eq!(r.params_for(PcType::FieldSplit), PcParams::FieldSplit { split: FieldSplitType::Schur, blocks: 2 });
        let bad = ParamDefaults { asm_blocks: 0, ..ParamDefaults::default() };
        assert!(matches!(DefaultRules::new(&bad), Err(TreeError::Config(_))));
        let huge = ParamDefaults { mg_levels: MAX_COUNT + 1, ..ParamDefaults::default() };
        assert!(matches!(DefaultRules::new(&huge), Err(TreeError::Config(_))));
        let unknown = ParamDefaults { gamg_type: "smoothed".into(), ..ParamDefaults::default() };
        assert!(matches!(DefaultRules::new(&unknown), Err(TreeError::Config(_))));
    }
}
