use crate::context::{KspType, PcType};
use crate::core::address::Address;
use crate::core::props::MatProps;
use crate::rules::Recommendation;
use crate::tree::edit::{ProposedEdit, RawFields};
use crate::tree::node::ConfigNode;
use crate::tree::view::NodeRole;

/// Raw keys for the non-parameter form fields.
pub mod form_keys {
    pub const PC_TYPE: &str = "pc_type";
    pub const KSP_TYPE: &str = "ksp_type";
    pub const SYMMETRIC: &str = "symm";
    pub const POSITIVE_DEFINITE: &str = "posdef";
    pub const BLOCK_STRUCTURED: &str = "logstruc";
}

/// In-progress edit for one node. Nothing here reaches the tree until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub address: Address,
    pub role: NodeRole,
    pub props: MatProps,
    pub ksp_type: KspType,
    pub pc_type: PcType,
    pub fields: RawFields,
}

impl EditForm {
    /// Seed a form with the node's committed values.
    pub fn from_node(node: &ConfigNode, role: NodeRole) -> Self {
        Self {
            address: node.address.clone(),
            role,
            props: node.props,
            ksp_type: node.ksp_type,
            pc_type: node.pc_type(),
            fields: node.pc.to_fields(),
        }
    }

    /// Seed a form with recommended values.
    pub fn from_recommendation(address: Address, role: NodeRole, props: MatProps, rec: &Recommendation) -> Self {
        Self {
            address,
            role,
            props,
            ksp_type: rec.ksp_type,
            pc_type: rec.pc_type,
            fields: rec.params.to_fields(),
        }
    }

    pub fn props_editable(&self) -> bool {
        self.role.props_editable()
    }

    pub fn apply_recommendation(&mut self, rec: &Recommendation) {
        self.pc_type = rec.pc_type;
        self.ksp_type = rec.ksp_type;
        self.fields = rec.params.to_fields();
    }

    /// The proposal this form submits. Forms that hide the property
    /// checkboxes submit the node's current properties.
    pub fn to_edit(&self, committed: MatProps) -> ProposedEdit {
        let props = if self.props_editable() { self.props } else { committed };
        ProposedEdit::new(props, self.ksp_type, self.pc_type, self.fields.clone())
    }

    /// Flatten the form to the raw values a browser form would post.
    pub fn to_raw(&self) -> RawFields {
        let mut raw = self.fields.clone();
        raw.set(form_keys::PC_TYPE, self.pc_type);
        raw.set(form_keys::KSP_TYPE, self.ksp_type);
        if self.props_editable() {
            raw.set(form_keys::SYMMETRIC, self.props.symmetric());
            raw.set(form_keys::POSITIVE_DEFINITE, self.props.positive_definite());
            raw.set(form_keys::BLOCK_STRUCTURED, self.props.block_structured());
        }
        raw
    }
}

/// Checkbox semantics: present and truthy means checked.
pub(crate) fn checkbox(raw: &RawFields, key: &str) -> bool {
    matches!(raw.get(key), Some("true" | "on" | "1" | "checked"))
}
