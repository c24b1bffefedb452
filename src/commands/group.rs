// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use {clap::Args, log::warn};

use crate::{
    commands::{connect, Cli, Handle, HandledResult},
    resource::ResourceKind,
};

#[derive(Args, Debug, Clone)]
pub struct CreateGroupArgs {
    /// Free stores to group
    #[arg(required = true)]
    store_ids: Vec<String>,
}

pub fn create_group(cli: &Cli, args: &CreateGroupArgs) -> HandledResult<()> {
    let mut console = connect(cli)?;

    console
        .enter(ResourceKind::FreeStore)
        .handle_err(|e| eprintln!("Could not list free stores: {e}"))?;

    for id in args.store_ids.iter() {
        if !console.free_stores().iter().any(|s| &s.id == id) {
            warn!("store '{id}' is not listed as free");
        }
        console.toggle_store(id, true);
    }

    let request = console
        .create_group()
        .handle_err(|e| eprintln!("Could not create group: {e}"))?;

    println!(
        "created group from stores {} (racks={}, copys={})",
        request.stores, request.racks, request.copys
    );
    Ok(())
}
