// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Args;

use crate::commands::HandledResult;

#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// Stat address of the store, as listed in its `stat` column
    host: String,
}

pub fn info(args: &InfoArgs) -> HandledResult<()> {
    println!("{}", crate::store_info_url(&args.host));
    Ok(())
}
