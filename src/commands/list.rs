// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::{
    commands::{connect, Cli, Handle, HandledResult},
    render::render_view,
    resource::ResourceKind,
};

pub fn list(cli: &Cli, view: ResourceKind) -> HandledResult<()> {
    let mut console = connect(cli)?;

    console
        .enter(view)
        .handle_err(|e| eprintln!("Could not list {view}: {e}"))?;

    print!("{}", render_view(&console, view));
    Ok(())
}
