//! Property-based invariant tests for the mutation engine.
//!
//! Random sequences of structural operations run against the builtin
//! registry. After every step:
//!
//! 1. All tree invariants hold.
//! 2. A rejected operation leaves the tree untouched.
//! 3. Undo back to the start restores the initial tree exactly.

use pageblocks_editor::{check_invariants, BlockId, EngineConfig, Registry, TreeMutationEngine};
use proptest::prelude::*;
use std::sync::Arc;

const TYPES: &[&str] = &[
    "section",
    "columns",
    "column",
    "heading",
    "text",
    "image",
    "tabs",
    "tab-panel",
    "accordion",
    "accordion-item",
    "legacy-widget-v1",
];

#[derive(Debug, Clone)]
enum Op {
    Add { parent: usize, ty: usize, index: Option<usize> },
    Move { node: usize, parent: usize, index: usize },
    Up(usize),
    Down(usize),
    Delete(usize),
    Copy(usize),
    Paste { parent: usize, index: Option<usize> },
    Duplicate(usize),
    Lock(usize, bool),
}

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_op() -> impl Strategy<Value = Op> {
    let pick = 0usize..64;
    prop_oneof![
        4 => (pick.clone(), 0..TYPES.len(), prop::option::of(0usize..6))
            .prop_map(|(parent, ty, index)| Op::Add { parent, ty, index }),
        3 => (pick.clone(), pick.clone(), 0usize..6)
            .prop_map(|(node, parent, index)| Op::Move { node, parent, index }),
        1 => pick.clone().prop_map(Op::Up),
        1 => pick.clone().prop_map(Op::Down),
        1 => pick.clone().prop_map(Op::Delete),
        1 => pick.clone().prop_map(Op::Copy),
        1 => (pick.clone(), prop::option::of(0usize..6))
            .prop_map(|(parent, index)| Op::Paste { parent, index }),
        1 => pick.clone().prop_map(Op::Duplicate),
        1 => (pick, any::<bool>()).prop_map(|(node, locked)| Op::Lock(node, locked)),
    ]
}

fn nth_id(engine: &TreeMutationEngine, n: usize) -> BlockId {
    let ids: Vec<&BlockId> = engine.tree().ids().collect();
    ids[n % ids.len()].clone()
}

/// Apply `op`, reporting whether it was accepted
fn run(engine: &mut TreeMutationEngine, op: &Op) -> bool {
    match op {
        Op::Add { parent, ty, index } => {
            let parent = nth_id(engine, *parent);
            engine.add_block(&parent, TYPES[*ty], *index).is_ok()
        }
        Op::Move { node, parent, index } => {
            let node = nth_id(engine, *node);
            let parent = nth_id(engine, *parent);
            engine.move_block(&node, &parent, *index).is_ok()
        }
        Op::Up(node) => {
            let node = nth_id(engine, *node);
            engine.move_block_up(&node).is_ok()
        }
        Op::Down(node) => {
            let node = nth_id(engine, *node);
            engine.move_block_down(&node).is_ok()
        }
        Op::Delete(node) => {
            let node = nth_id(engine, *node);
            engine.delete_block(&node).is_ok()
        }
        Op::Copy(node) => {
            let node = nth_id(engine, *node);
            engine.copy_block(&node).is_ok()
        }
        Op::Paste { parent, index } => {
            let parent = nth_id(engine, *parent);
            engine.paste_block(&parent, *index).is_ok()
        }
        Op::Duplicate(node) => {
            let node = nth_id(engine, *node);
            engine.duplicate_block(&node).is_ok()
        }
        Op::Lock(node, locked) => {
            let node = nth_id(engine, *node);
            engine.set_locked(&node, *locked).is_ok()
        }
    }
}

fn fresh_engine() -> TreeMutationEngine {
    TreeMutationEngine::new_document(
        "proptest",
        Arc::new(Registry::builtin()),
        EngineConfig {
            history_limit: 0,
            ..EngineConfig::default()
        },
    )
}

proptest! {
    #[test]
    fn invariants_hold_after_every_operation(ops in prop::collection::vec(arb_op(), 1..60)) {
        let mut engine = fresh_engine();

        for op in &ops {
            let before = engine.tree().clone();
            let accepted = run(&mut engine, op);

            if let Err(err) = check_invariants(engine.tree(), engine.registry()) {
                prop_assert!(false, "invariant broken after {:?}: {}", op, err);
            }
            if !accepted {
                prop_assert_eq!(engine.tree(), &before, "rejected {:?} changed the tree", op);
            }
        }
    }
}

proptest! {
    #[test]
    fn undo_returns_to_initial_tree(ops in prop::collection::vec(arb_op(), 1..30)) {
        let mut engine = fresh_engine();
        let initial = engine.tree().clone();

        for (i, op) in ops.iter().enumerate() {
            if run(&mut engine, op) {
                engine.commit(format!("step {}", i));
            }
        }

        while engine.undo() {}
        prop_assert_eq!(engine.tree(), &initial);
    }
}
