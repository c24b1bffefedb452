// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::fmt::Write;

use crate::{
    backend::Backend,
    console::AdminConsole,
    dialog::{ActionDialog, DialogState},
    resource::{ResourceKind, Store},
    selection::SelectionSet,
};

/// Render one view of the console as plain text.
pub fn render_view<B: Backend>(console: &AdminConsole<B>, view: ResourceKind) -> String {
    match view {
        ResourceKind::Rack => render_racks(console),
        ResourceKind::FreeStore => render_free_stores(console.free_stores(), console.selection()),
        ResourceKind::Group => render_groups(console),
    }
}

fn store_line(store: &Store) -> String {
    format!(
        "{} ip={} stat={} admin={} status={} volumes=[{}]",
        store.id,
        store.ip,
        store.stat,
        store.admin,
        store.status,
        store.volumes.join(",")
    )
}

fn render_racks<B: Backend>(console: &AdminConsole<B>) -> String {
    if console.racks().is_empty() {
        return format!("no {}\n", ResourceKind::Rack);
    }

    let mut out = String::new();
    for rack in console.racks() {
        let _ = writeln!(out, "rack {} ({} stores)", rack.name, rack.stores.len());
        for store in rack.stores.iter() {
            let _ = writeln!(out, "    {}", store_line(store));
        }
    }
    out
}

/// Free stores, with the ones checked for group creation marked.
pub fn render_free_stores(stores: &[Store], selection: &SelectionSet) -> String {
    if stores.is_empty() {
        return format!("no {}\n", ResourceKind::FreeStore);
    }

    let mut out = String::new();
    for store in stores {
        let mark = if selection.contains(&store.id) { "x" } else { " " };
        let _ = writeln!(out, "[{mark}] {}", store_line(store));
    }
    if !selection.is_empty() {
        let _ = writeln!(out, "selected: {}", selection.serialize());
    }
    out
}

fn render_groups<B: Backend>(console: &AdminConsole<B>) -> String {
    if console.groups().is_empty() {
        return format!("no {}\n", ResourceKind::Group);
    }

    let mut out = String::new();
    for group in console.groups() {
        let _ = writeln!(out, "group {}: stores [{}]", group.id, group.store_ids.join(","));
        for store in group.stores.iter() {
            let _ = writeln!(out, "    {}", store_line(store));
        }
    }
    out
}

pub fn render_dialog(dialog: &ActionDialog) -> String {
    let mut out = String::new();
    match dialog.state() {
        DialogState::Closed => {
            let _ = writeln!(out, "{}: closed", dialog.kind());
            return out;
        }
        DialogState::Staged => {
            let _ = writeln!(out, "{}:", dialog.kind());
        }
        DialogState::Submitting => {
            let _ = writeln!(out, "{}: submitting...", dialog.kind());
        }
    }

    if let Some(form) = dialog.form() {
        for (key, value) in form.fields() {
            let pin = if form.is_pinned(key) { " (fixed)" } else { "" };
            let _ = writeln!(out, "    {key} = {value}{pin}");
        }
        for key in dialog.kind().operator_fields() {
            if form.get(key).is_none() {
                let _ = writeln!(out, "    {key} = <unset>");
            }
        }
    }
    if let Some(error) = dialog.error() {
        let _ = writeln!(out, "error: {error}");
    }
    out
}
