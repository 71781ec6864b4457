//! Property-based invariant tests for the configuration tree.
//!
//! These tests generate arbitrary edit sequences and verify that:
//!
//! 1. Positive definite without symmetric is always rejected, whatever else is proposed.
//! 2. A rejected edit leaves every node exactly as it was.
//! 3. After every edit, accepted or not, fan-out, prefix closure and
//!    parent dominance hold for the whole live tree.
//! 4. Recommendations are deterministic and agree with the parameter defaults.

use ksptree::{
    Address, ConfigNode, ConfigTree, DefaultRules, KspType, MatProps, ParentContext, PcType, ProposedEdit,
    RawFields, TreeError, keys,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn props_strategy() -> impl Strategy<Value = MatProps> {
    (0u8..8).prop_map(MatProps::from_bits_truncate)
}

fn pc_strategy() -> impl Strategy<Value = PcType> {
    proptest::sample::select(PcType::ALL.to_vec())
}

fn ksp_strategy() -> impl Strategy<Value = KspType> {
    proptest::sample::select(KspType::ALL.to_vec())
}

fn count_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        6 => (1usize..=3).prop_map(|n| n.to_string()),
        1 => Just("0".to_string()),
        1 => Just("".to_string()),
        1 => Just("2x".to_string()),
    ]
}

fn fields_strategy() -> impl Strategy<Value = RawFields> {
    (count_strategy(), count_strategy(), count_strategy()).prop_map(|(a, b, c)| {
        RawFields::new()
            .with(keys::FIELDSPLIT_TYPE, "additive")
            .with(keys::FIELDSPLIT_BLOCKS, &a)
            .with(keys::MG_TYPE, "multiplicative")
            .with(keys::MG_LEVELS, &b)
            .with(keys::GAMG_TYPE, "agg")
            .with(keys::GAMG_LEVELS, &c)
            .with(keys::BJACOBI_BLOCKS, &a)
            .with(keys::ASM_BLOCKS, &b)
            .with(keys::ASM_OVERLAP, &c)
            .with(keys::REDUNDANT_NUMBER, &a)
    })
}

/// (which live node, proposed edit)
fn step_strategy() -> impl Strategy<Value = (usize, ProposedEdit)> {
    (any::<usize>(), props_strategy(), ksp_strategy(), pc_strategy(), fields_strategy())
        .prop_map(|(pick, props, ksp, pc, fields)| (pick, ProposedEdit::new(props, ksp, pc, fields)))
}

fn snapshot(t: &ConfigTree) -> Vec<ConfigNode> {
    t.store().iter().cloned().collect()
}

fn pick_live(t: &ConfigTree, pick: usize) -> Address {
    let live = t.store().all_live_addresses();
    live[pick % live.len()].clone()
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Positive definite requires symmetric
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    /// Positive definite without symmetric is rejected whatever else is proposed.
    #[test]
    fn definite_without_symmetry_rejected(
        structured in any::<bool>(),
        ksp in ksp_strategy(),
        pc in pc_strategy(),
        fields in fields_strategy(),
    ) {
        let mut t = ConfigTree::default();
        let before = snapshot(&t);
        let props = MatProps::new(false, true, structured);
        let result = t.apply_edit(&Address::root(), &ProposedEdit::new(props, ksp, pc, fields));
        prop_assert_eq!(result, Err(TreeError::InvalidPropertyCombination));
        prop_assert_eq!(snapshot(&t), before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2–3. Arbitrary edit sequences keep the tree consistent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Random edit sequences keep the tree consistent and never partially commit.
    #[test]
    fn edits_preserve_invariants(steps in proptest::collection::vec(step_strategy(), 1..24)) {
        let mut t = ConfigTree::default();
        for (pick, edit) in steps {
            let target = pick_live(&t, pick);
            let before = snapshot(&t);
            match t.apply_edit(&target, &edit) {
                Ok(()) => {
                    let node = t.get(&target).unwrap();
                    prop_assert_eq!(node.pc_type(), edit.pc_type);
                    prop_assert_eq!(node.ksp_type, edit.ksp_type);
                }
                Err(e) => {
                    prop_assert!(e.is_validation(), "unexpected error {:?}", e);
                    prop_assert_eq!(snapshot(&t), before, "rejected edit wrote to the tree");
                }
            }
            if let Err(e) = t.check_invariants() {
                return Err(TestCaseError::fail(format!("{e} after editing {target}")));
            }
        }
    }
}

proptest! {
    /// Field-split children drop block structure but keep the other flags.
    #[test]
    fn fieldsplit_children_never_inherit_structure(blocks in 1usize..6, props in props_strategy()) {
        let props = props | MatProps::BLOCK_STRUCTURED;
        prop_assume!(props.is_consistent());
        let mut t = ConfigTree::default();
        let raw = RawFields::new()
            .with(keys::FIELDSPLIT_TYPE, "schur")
            .with(keys::FIELDSPLIT_BLOCKS, blocks);
        t.apply_edit(&Address::root(), &ProposedEdit::new(props, KspType::Gmres, PcType::FieldSplit, raw)).unwrap();
        prop_assert_eq!(t.store().child_count(&Address::root()), blocks);
        for child in t.store().children(&Address::root()) {
            prop_assert!(!child.props.block_structured());
            prop_assert_eq!(child.props, props - MatProps::BLOCK_STRUCTURED);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Defaulting rules are deterministic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    /// Recommending twice gives the same answer, with the type's default parameters.
    #[test]
    fn recommend_is_deterministic(parent in proptest::option::of(pc_strategy()), props in props_strategy()) {
        let rules = DefaultRules::default();
        let ctx = parent.map(|pc_type| ParentContext { pc_type, props: MatProps::empty() });
        let a = rules.recommend(ctx.as_ref(), props);
        let b = rules.recommend(ctx.as_ref(), props);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.params, rules.params_for(a.pc_type));
    }
}
