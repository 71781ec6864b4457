//! Defaulting rules: which solver a node should start with.

pub mod defaults;
pub use defaults::{DefaultRules, ParentContext, Recommendation};
