// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Args;

use crate::{
    backend::Backend,
    commands::{connect, Cli, Handle, HandledResult},
    console::AdminConsole,
    dialog::ActionKind,
};

#[derive(Args, Debug, Clone)]
pub struct InitFreeVolumeArgs {
    /// Admin address of the store
    #[arg(long)]
    host: String,

    #[arg(long)]
    store_id: String,

    /// Directory for the volume block files
    #[arg(long)]
    bdir: String,

    /// Directory for the volume index files
    #[arg(long)]
    idir: String,

    /// Number of free volumes to create
    #[arg(short)]
    n: u32,
}

#[derive(Args, Debug, Clone)]
pub struct AddVolumeArgs {
    #[arg(long)]
    group_id: String,

    /// Number of volumes to add
    #[arg(short, default_value_t = 1)]
    n: u32,
}

pub fn init_free_volume(cli: &Cli, args: &InitFreeVolumeArgs) -> HandledResult<()> {
    let mut console = connect(cli)?;
    let kind = ActionKind::InitFreeVolume;

    console
        .open_init_free_volume(&args.host, &args.store_id)
        .handle_err(|e| eprintln!("Could not {kind}: {e}"))?;

    let fields = [
        ("bdir", args.bdir.clone()),
        ("idir", args.idir.clone()),
        ("n", args.n.to_string()),
    ];
    stage_and_submit(&mut console, kind, &fields)
}

pub fn add_volume(cli: &Cli, args: &AddVolumeArgs) -> HandledResult<()> {
    let mut console = connect(cli)?;
    let kind = ActionKind::AddVolume;

    console
        .open_add_volume(&args.group_id)
        .handle_err(|e| eprintln!("Could not {kind}: {e}"))?;

    stage_and_submit(&mut console, kind, &[("n", args.n.to_string())])
}

/// Fill in the operator fields of an open dialog and submit it once.
pub fn stage_and_submit<B: Backend>(
    console: &mut AdminConsole<B>,
    kind: ActionKind,
    fields: &[(&str, String)],
) -> HandledResult<()> {
    for (key, value) in fields {
        console
            .set_field(kind, key, value)
            .handle_err(|e| eprintln!("Could not {kind}: {e}"))?;
    }

    console
        .submit(kind)
        .handle_err(|e| eprintln!("Could not {kind}: {e}"))?;

    println!("{kind}: done");
    Ok(())
}
