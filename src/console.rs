// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use log::{info, warn};

use crate::{
    backend::Backend,
    config::GroupPolicy,
    dialog::{decode_reply, ActionDialog, ActionKind, ActionReply, REJECTED_WITHOUT_MESSAGE},
    error::{ConsoleError, Result},
    resource::{Group, Rack, ResourceKind, Store},
    selection::SelectionSet,
    store::ClusterDataStore,
};

/// Endpoint that creates a group from a set of free stores.
pub const CREATE_GROUP_PATH: &str = "/group";

/// The body of a group creation request. Built from the selection at the moment the operator
/// confirms, and never kept around afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupCreationRequest {
    pub stores: String,
    pub racks: u32,
    pub copys: u32,
}

impl GroupCreationRequest {
    pub fn new(selection: &SelectionSet, policy: GroupPolicy) -> Result<Self> {
        if selection.is_empty() {
            return Err(ConsoleError::EmptySelection);
        }
        Ok(Self {
            stores: selection.serialize(),
            racks: policy.racks,
            copys: policy.copys,
        })
    }

    pub fn form(&self) -> Vec<(String, String)> {
        vec![
            ("stores".to_string(), self.stores.clone()),
            ("racks".to_string(), self.racks.to_string()),
            ("copys".to_string(), self.copys.to_string()),
        ]
    }
}

/// The composition root of the console.
///
/// Owns one collection per view, the free-store selection, and one dialog per action kind, and
/// is the only thing that talks to the backend. Every piece of state is reachable from here and
/// changed only through the owning component.
#[derive(Debug)]
pub struct AdminConsole<B: Backend> {
    backend: B,
    policy: GroupPolicy,
    racks: ClusterDataStore<Rack>,
    free_stores: ClusterDataStore<Store>,
    groups: ClusterDataStore<Group>,
    selection: SelectionSet,
    init_free_volume: ActionDialog,
    add_volume: ActionDialog,
}

impl<B: Backend> AdminConsole<B> {
    pub fn new(backend: B, policy: GroupPolicy) -> Self {
        AdminConsole {
            backend,
            policy,
            racks: ClusterDataStore::new(),
            free_stores: ClusterDataStore::new(),
            groups: ClusterDataStore::new(),
            selection: SelectionSet::new(),
            init_free_volume: ActionDialog::new(ActionKind::InitFreeVolume),
            add_volume: ActionDialog::new(ActionKind::AddVolume),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn policy(&self) -> GroupPolicy {
        self.policy
    }

    /// Enter a view, loading its collection if it was never loaded or has been invalidated.
    pub fn enter(&mut self, view: ResourceKind) -> Result<()> {
        if self.needs_reload(view) {
            self.reload(view)?;
        }
        Ok(())
    }

    /// Fetch a view's collection regardless of whether it is current.
    ///
    /// A successful reload of the free stores drops the selection, since the ids in it may no
    /// longer be listed.
    pub fn reload(&mut self, view: ResourceKind) -> Result<()> {
        match view {
            ResourceKind::Rack => {
                self.racks.load(&self.backend)?;
            }
            ResourceKind::Group => {
                self.groups.load(&self.backend)?;
            }
            ResourceKind::FreeStore => {
                self.free_stores.load(&self.backend)?;
                self.selection.clear();
            }
        }
        Ok(())
    }

    pub fn needs_reload(&self, view: ResourceKind) -> bool {
        match view {
            ResourceKind::Rack => self.racks.needs_reload(),
            ResourceKind::FreeStore => self.free_stores.needs_reload(),
            ResourceKind::Group => self.groups.needs_reload(),
        }
    }

    pub fn invalidate(&mut self, view: ResourceKind) {
        match view {
            ResourceKind::Rack => self.racks.invalidate(),
            ResourceKind::FreeStore => self.free_stores.invalidate(),
            ResourceKind::Group => self.groups.invalidate(),
        }
    }

    pub fn racks(&self) -> &[Rack] {
        self.racks.items()
    }

    pub fn free_stores(&self) -> &[Store] {
        self.free_stores.items()
    }

    pub fn groups(&self) -> &[Group] {
        self.groups.items()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Check or uncheck a free store for group creation.
    pub fn toggle_store(&mut self, store_id: &str, included: bool) {
        self.selection.toggle(store_id, included);
    }

    /// Tear down the free-store view.
    pub fn leave_free_stores(&mut self) {
        self.selection.clear();
    }

    /// Submit a group creation request built from the current selection.
    ///
    /// On success the selection is cleared and both the free-store and group listings are marked
    /// for reload. On failure the selection is kept so the operator can try again.
    pub fn create_group(&mut self) -> Result<GroupCreationRequest> {
        let request = GroupCreationRequest::new(&self.selection, self.policy)?;
        info!("creating group from stores {}", request.stores);

        let body = self
            .backend
            .post_form(CREATE_GROUP_PATH, &request.form())
            .map_err(|e| {
                warn!("group creation failed: {e}");
                ConsoleError::ActionTransportError(e.to_string())
            })?;

        match decode_reply(&body)? {
            ActionReply { success: true, .. } => {
                self.selection.clear();
                self.free_stores.invalidate();
                self.groups.invalidate();
                Ok(request)
            }
            ActionReply { msg, .. } => {
                let msg = msg.unwrap_or_else(|| REJECTED_WITHOUT_MESSAGE.to_string());
                warn!("group creation rejected: {msg}");
                Err(ConsoleError::ActionRejected(msg))
            }
        }
    }

    pub fn dialog(&self, kind: ActionKind) -> &ActionDialog {
        match kind {
            ActionKind::InitFreeVolume => &self.init_free_volume,
            ActionKind::AddVolume => &self.add_volume,
        }
    }

    fn dialog_mut(&mut self, kind: ActionKind) -> &mut ActionDialog {
        match kind {
            ActionKind::InitFreeVolume => &mut self.init_free_volume,
            ActionKind::AddVolume => &mut self.add_volume,
        }
    }

    /// Open the free volume initialization dialog for a store.
    pub fn open_init_free_volume(&mut self, host: &str, store_id: &str) -> Result<()> {
        self.init_free_volume
            .open(&[("host", host), ("storeId", store_id)])
    }

    /// Open the add volume dialog for a group.
    pub fn open_add_volume(&mut self, group_id: &str) -> Result<()> {
        self.add_volume.open(&[("groupId", group_id)])
    }

    pub fn set_field(&mut self, kind: ActionKind, key: &str, value: &str) -> Result<()> {
        self.dialog_mut(kind).set_field(key, value)
    }

    /// Send the staged form of a dialog and apply the answer.
    pub fn submit(&mut self, kind: ActionKind) -> Result<()> {
        let submission = self.dialog_mut(kind).submit()?;
        let response = self
            .backend
            .post_form(submission.path(), &submission.form);

        if let Some(view) = self.dialog_mut(kind).complete(response)? {
            self.invalidate(view);
        }
        Ok(())
    }

    pub fn cancel(&mut self, kind: ActionKind) -> Result<()> {
        self.dialog_mut(kind).cancel()
    }
}
