// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use crate::commands::{load_config, Cli, Handle, HandledResult};

pub fn validate(cli: &Cli) -> HandledResult<()> {
    let config = load_config(cli)?;

    let text = toml::to_string_pretty(&config)
        .handle_err(|e| eprintln!("Could not render config: {e}"))?;
    print!("{text}");

    Ok(())
}
