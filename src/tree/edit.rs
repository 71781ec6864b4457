//! Proposed edits as they arrive from an edit form.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::context::{KspType, PcParams, PcType};
use crate::core::props::MatProps;
use crate::error::TreeError;

/// Raw form field names for type-specific parameters.
pub mod keys {
    pub const FIELDSPLIT_TYPE: &str = "pc_fieldsplit_type";
    pub const FIELDSPLIT_BLOCKS: &str = "pc_fieldsplit_blocks";
    pub const MG_TYPE: &str = "pc_mg_type";
    pub const MG_LEVELS: &str = "pc_mg_levels";
    pub const GAMG_TYPE: &str = "pc_gamg_type";
    pub const GAMG_LEVELS: &str = "pc_gamg_levels";
    pub const BJACOBI_BLOCKS: &str = "pc_bjacobi_blocks";
    pub const ASM_BLOCKS: &str = "pc_asm_blocks";
    pub const ASM_OVERLAP: &str = "pc_asm_overlap";
    pub const REDUNDANT_NUMBER: &str = "pc_redundant_number";
}

/// Widest count a form field accepts; every count is therefore at most 9999.
pub const MAX_COUNT_DIGITS: usize = 4;

/// Largest value a count field can hold.
pub const MAX_COUNT: usize = 9999;

/// Unvalidated field values keyed by form field name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawFields(BTreeMap<String, String>);

impl RawFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.0.insert(key.to_string(), value.to_string());
    }

    pub fn with(mut self, key: &str, value: impl ToString) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// A block, level, replica or overlap count: at most four digits, at least 1.
    pub fn count(&self, field: &'static str) -> Result<usize, TreeError> {
        let raw = self.get(field).unwrap_or("");
        let invalid = || TreeError::InvalidParameterValue { field, value: raw.to_string() };
        if raw.is_empty() || raw.len() > MAX_COUNT_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        match raw.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(n),
            _ => Err(invalid()),
        }
    }

    /// A sub-type selector such as the field-split or multigrid type.
    pub fn choice<T: FromStr<Err = TreeError>>(&self, field: &str) -> Result<T, TreeError> {
        self.get(field).unwrap_or("").parse()
    }
}

/// Everything a submitted form proposes for one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProposedEdit {
    pub props: MatProps,
    pub ksp_type: KspType,
    pub pc_type: PcType,
    pub fields: RawFields,
}

impl ProposedEdit {
    pub fn new(props: MatProps, ksp_type: KspType, pc_type: PcType, fields: RawFields) -> Self {
        Self { props, ksp_type, pc_type, fields }
    }

    /// Build an edit from already-typed parameters.
    pub fn from_params(props: MatProps, ksp_type: KspType, pc: &PcParams) -> Self {
        Self::new(props, ksp_type, pc.pc_type(), pc.to_fields())
    }
}
