//! File or API options for configuration trees.
//!
//! This module provides the `TreeOptions` struct, which sets the root solver a
//! fresh tree starts from and the parameter defaults the defaulting rules
//! hand out when a nested preconditioner is chosen. Options are usually read
//! from TOML:
//!
//! ```toml
//! [root]
//! symmetric = true
//! positive_definite = true
//! pc_type = "gamg"
//!
//! [defaults]
//! mg_levels = 3
//! fieldsplit_type = "schur"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::context::{FieldSplitType, GamgType, KspType, MgType, PcType};
use crate::core::props::MatProps;
use crate::error::TreeError;
use crate::rules::DefaultRules;

/// Root solver settings used when a tree is created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RootOptions {
    pub symmetric: bool,
    pub positive_definite: bool,
    pub block_structured: bool,
    /// Root preconditioner; the root-mode recommendation when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pc_type: Option<String>,
    /// Root Krylov method; the root-mode recommendation when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ksp_type: Option<String>,
}

impl RootOptions {
    pub fn props(&self) -> MatProps {
        MatProps::new(self.symmetric, self.positive_definite, self.block_structured)
    }

    pub fn pc_type(&self) -> Result<Option<PcType>, TreeError> {
        self.pc_type.as_deref().map(str::parse).transpose()
    }

    pub fn ksp_type(&self) -> Result<Option<KspType>, TreeError> {
        self.ksp_type.as_deref().map(str::parse).transpose()
    }
}

/// Type-specific parameter defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParamDefaults {
    pub fieldsplit_type: String,
    pub fieldsplit_blocks: usize,
    pub mg_type: String,
    pub mg_levels: usize,
    pub gamg_type: String,
    pub gamg_levels: usize,
    pub bjacobi_blocks: usize,
    pub asm_blocks: usize,
    pub asm_overlap: usize,
    pub redundant_number: usize,
}

impl Default for ParamDefaults {
    fn default() -> Self {
        Self {
            fieldsplit_type: FieldSplitType::Multiplicative.name().to_string(),
            fieldsplit_blocks: 2,
            mg_type: MgType::Multiplicative.name().to_string(),
            mg_levels: 2,
            gamg_type: GamgType::Agg.name().to_string(),
            gamg_levels: 2,
            bjacobi_blocks: 1,
            asm_blocks: 2,
            asm_overlap: 1,
            redundant_number: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeOptions {
    pub root: RootOptions,
    pub defaults: ParamDefaults,
}

impl TreeOptions {
    pub fn from_toml_str(s: &str) -> Result<Self, TreeError> {
        let opts: TreeOptions = toml::from_str(s).map_err(|e| TreeError::Config(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TreeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| TreeError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, TreeError> {
        toml::to_string(self).map_err(|e| TreeError::Config(e.to_string()))
    }

    /// Reject out-of-range counts, unknown type names, and inconsistent root flags.
    pub fn validate(&self) -> Result<(), TreeError> {
        DefaultRules::new(&self.defaults)?;
        let config_err = |e: TreeError| TreeError::Config(e.to_string());
        let root_pc = self.root.pc_type().map_err(config_err)?;
        self.root.ksp_type().map_err(config_err)?;

        let props = self.root.props();
        if !props.is_consistent() {
            return Err(config_err(TreeError::InvalidPropertyCombination));
        }
        if root_pc == Some(PcType::FieldSplit) && !props.block_structured() {
            return Err(TreeError::Config("root fieldsplit requires block_structured = true".into()));
        }
        Ok(())
    }
}
