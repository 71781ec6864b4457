//! Edit session: the event boundary between the tree and its user interface.
//!
//! A `Session` holds at most one open `EditForm`. Selecting a node opens its
//! form (selecting a different node replaces it, selecting the same node again
//! closes it), form events change only the form, and only a submit reaches
//! `ConfigTree::apply_edit`. Committed changes and rejections are pushed to a
//! [`TreeObserver`].

pub mod form;

pub use form::{EditForm, form_keys};

use tracing::{debug, info};

use crate::config::TreeOptions;
use crate::context::{KspType, PcType};
use crate::core::address::Address;
use crate::core::props::MatProps;
use crate::core::traits::TreeObserver;
use crate::error::TreeError;
use crate::tree::edit::{ProposedEdit, RawFields};
use crate::tree::engine::ConfigTree;
use crate::tree::view::TreeEntry;

pub struct Session<O: TreeObserver = ()> {
    tree: ConfigTree,
    observer: O,
    form: Option<EditForm>,
}

impl<O: TreeObserver> Session<O> {
    /// Start a session and push the initial tree to `observer`.
    pub fn new(tree: ConfigTree, observer: O) -> Self {
        let mut session = Self { tree, observer, form: None };
        session.refresh();
        session
    }

    pub fn from_options(options: &TreeOptions, observer: O) -> Result<Self, TreeError> {
        Ok(Self::new(ConfigTree::new(options)?, observer))
    }

    pub fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn form(&self) -> Option<&EditForm> {
        self.form.as_ref()
    }

    pub fn into_parts(self) -> (ConfigTree, O) {
        (self.tree, self.observer)
    }

    pub fn current_tree(&self) -> Vec<TreeEntry> {
        self.tree.current_tree()
    }

    /// Push the committed tree to the observer.
    pub fn refresh(&mut self) {
        let entries = self.tree.current_tree();
        self.observer.tree_changed(&entries);
    }

    /// The values a freshly opened default form for `address` would carry.
    pub fn field_defaults(&self, address: &Address) -> Result<EditForm, TreeError> {
        let props = self.tree.get(address)?.props;
        let rec = self.tree.recommend_for(address, props)?;
        let role = self.tree.role_of(address)?;
        Ok(EditForm::from_recommendation(address.clone(), role, props, &rec))
    }

    /// Open the form for `address`, or close it if it is already open.
    pub fn node_selected(&mut self, address: &Address) -> Result<Option<&EditForm>, TreeError> {
        if self.form.as_ref().is_some_and(|f| &f.address == address) {
            info!(address = %address, "edit form closed");
            self.form = None;
            return Ok(None);
        }
        let node = self.tree.get(address)?;
        let form = EditForm::from_node(node, self.tree.role_of(address)?);
        info!(address = %address, role = %form.role, "edit form opened");
        self.form = Some(form);
        Ok(self.form.as_ref())
    }

    /// Drop the open form; the tree is left untouched.
    pub fn edit_cancelled(&mut self) {
        if let Some(form) = self.form.take() {
            info!(address = %form.address, "edit cancelled");
        }
    }

    fn open_form(&mut self) -> Result<&mut EditForm, TreeError> {
        self.form.as_mut().ok_or(TreeError::NoOpenForm)
    }

    /// Matrix property checkboxes changed: re-derive the recommended solver.
    /// Ignored for forms that do not show the checkboxes.
    pub fn flags_changed(&mut self, props: MatProps) -> Result<(), TreeError> {
        let form = self.form.as_ref().ok_or(TreeError::NoOpenForm)?;
        if !form.props_editable() {
            debug!(address = %form.address, "matrix properties are fixed for this sub-solver");
            return Ok(());
        }
        let rec = self.tree.recommend_for(&form.address, props)?;
        let form = self.open_form()?;
        form.props = props;
        form.apply_recommendation(&rec);
        Ok(())
    }

    /// Show the parameters of `pc_type` with their defaults, without committing.
    pub fn preconditioner_type_changed(&mut self, pc_type: PcType) -> Result<(), TreeError> {
        let params = self.tree.rules().params_for(pc_type);
        let form = self.open_form()?;
        form.pc_type = pc_type;
        form.fields = params.to_fields();
        Ok(())
    }

    pub fn ksp_type_changed(&mut self, ksp_type: KspType) -> Result<(), TreeError> {
        self.open_form()?.ksp_type = ksp_type;
        Ok(())
    }

    pub fn field_changed(&mut self, key: &str, value: &str) -> Result<(), TreeError> {
        self.open_form()?.fields.set(key, value);
        Ok(())
    }

    /// Submit the open form. On rejection the form stays open as typed.
    pub fn edit_submitted(&mut self) -> Result<(), TreeError> {
        let form = self.form.as_ref().ok_or(TreeError::NoOpenForm)?;
        let address = form.address.clone();
        let committed = self.tree.get(&address)?.props;
        let edit = form.to_edit(committed);
        self.commit(&address, &edit)
    }

    /// Submit raw posted values for `address`, as a browser form would.
    pub fn edit_submitted_raw(&mut self, address: &Address, raw: &RawFields) -> Result<(), TreeError> {
        let edit = match self.parse_raw(address, raw) {
            Ok(edit) => edit,
            Err(e) => {
                self.observer.validation_error(&e);
                return Err(e);
            }
        };
        self.commit(address, &edit)
    }

    fn parse_raw(&self, address: &Address, raw: &RawFields) -> Result<ProposedEdit, TreeError> {
        let node = self.tree.get(address)?;
        let role = self.tree.role_of(address)?;
        let pc_type: PcType = raw.choice(form_keys::PC_TYPE)?;
        let ksp_type: KspType = raw.choice(form_keys::KSP_TYPE)?;
        let props = if role.props_editable() {
            MatProps::new(
                form::checkbox(raw, form_keys::SYMMETRIC),
                form::checkbox(raw, form_keys::POSITIVE_DEFINITE),
                form::checkbox(raw, form_keys::BLOCK_STRUCTURED),
            )
        } else {
            node.props
        };
        Ok(ProposedEdit::new(props, ksp_type, pc_type, raw.clone()))
    }

    fn commit(&mut self, address: &Address, edit: &ProposedEdit) -> Result<(), TreeError> {
        match self.tree.apply_edit(address, edit) {
            Ok(()) => {
                // also drop a form whose node the commit pruned
                let store = self.tree.store();
                let done = self.form.take_if(|f| &f.address == address || !store.contains(&f.address));
                if let Some(form) = done {
                    debug!(address = %form.address, "edit form closed after commit");
                }
                self.refresh();
                Ok(())
            }
            Err(e) => {
                self.observer.validation_error(&e);
                Err(e)
            }
        }
    }
}
