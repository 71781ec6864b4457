//! ksptree: PETSc-style nested KSP/PC option trees
//!
//! This crate models the configuration of a hierarchical solver: a root Krylov
//! method and preconditioner whose nested preconditioners (block Jacobi,
//! additive Schwarz, redundant, field split, multigrid, KSP-as-PC) own
//! sub-solvers of their own. It keeps the tree consistent under edits:
//! validating matrix properties, recommending defaults, and growing or
//! pruning sub-solvers to match each node's declared fan-out. Nothing is ever
//! solved; rendering and forms belong to the caller.

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod rules;
pub mod session;
pub mod tree;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use self::core::*;
pub use error::*;
pub use rules::*;
pub use session::*;
pub use tree::*;
