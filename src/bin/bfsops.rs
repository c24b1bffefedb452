// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use clap::Parser;

use bfsops_lib::{
    self,
    commands::{self, Cli},
};

/// The bfsops binary is the operator console: it lists the cluster and runs admin actions
/// against the ops API.
fn main() {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("BFSOPS_LOG", default_level))
        .init();

    if commands::main(&args).is_err() {
        std::process::exit(1);
    }
}
