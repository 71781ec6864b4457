//! Walk through a short configurator session and print the tree after each step.
//!
//! Run with `RUST_LOG=ksptree=debug` to see nodes being synthesized and pruned.
//! An optional first argument names a TOML options file.

use ksptree::{Address, KspType, MatProps, PcType, Session, TreeEntry, TreeError, TreeObserver, TreeOptions, keys};
use tracing_subscriber::EnvFilter;

struct Printer;

impl TreeObserver for Printer {
    fn tree_changed(&mut self, tree: &[TreeEntry]) {
        println!("--");
        for e in tree {
            let indent = "  ".repeat(e.address.depth());
            println!("{indent}{} [{}] -ksp_type {} -pc_type {}", e.address, e.role, e.ksp_type, e.pc_type);
        }
    }

    fn validation_error(&mut self, error: &TreeError) {
        println!("!! {error}");
    }
}

fn main() -> Result<(), TreeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = match std::env::args().nth(1) {
        Some(path) => TreeOptions::from_path(path)?,
        None => TreeOptions::default(),
    };
    let mut session = Session::from_options(&options, Printer)?;
    let root = Address::root();

    // block-structured root: recommended field split with two blocks
    session.node_selected(&root)?;
    session.flags_changed(MatProps::BLOCK_STRUCTURED)?;
    session.edit_submitted()?;

    // second block gets a three-level multigrid
    let block = root.child(1);
    session.node_selected(&block)?;
    session.preconditioner_type_changed(PcType::Mg)?;
    session.field_changed(keys::MG_LEVELS, "3")?;
    session.ksp_type_changed(KspType::Fgmres)?;
    session.edit_submitted()?;

    // a rejected edit leaves the tree alone
    session.node_selected(&block)?;
    session.field_changed(keys::MG_LEVELS, "0")?;
    let _ = session.edit_submitted();
    session.edit_cancelled();

    Ok(())
}
