// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod group;
pub mod info;
pub mod list;
pub mod shell;
pub mod validate;
pub mod volume;

use std::time::Duration;

use {
    group::CreateGroupArgs,
    info::InfoArgs,
    volume::{AddVolumeArgs, InitFreeVolumeArgs},
};

use {
    clap::{Parser, Subcommand},
    log::debug,
};

use crate::{backend::HttpBackend, config::Config, console::AdminConsole, resource::ResourceKind};

/// A `HandledError` represents an error that has already been handled. When you call a function
/// that returns a `HandledError` or `HandledResult`, you don't need to do anything with that error,
/// other than just be aware that it happened, and return it on to your caller.
///
/// `main()` has a special responsibility: since its "caller" is, in a certain sense, the operating
/// system, `main()` must return a nonzero exit status when it gets a `HandledError`.
///
/// The primary way to construct a `HandledError` is with the `handle_err()` function, which turns a
/// generic error into a `HandledError`, and also runs some caller-provided code to handle the
/// error. That provided code would normally do something like report the error to stderr.
#[derive(Debug, PartialEq)]
pub struct HandledError {}

pub type HandledResult<T> = std::result::Result<T, HandledError>;

pub fn handled_error() -> HandledResult<()> {
    HandledResult::Err(HandledError {})
}

pub trait Handle<T, F> {
    fn handle_err(self, handler: F) -> HandledResult<T>;
}

impl<T, E, F: FnOnce(E)> Handle<T, F> for std::result::Result<T, E> {
    /// Handle an error by running the provided `handler` code, giving it the error.
    ///
    /// Then, return a `HandledResult`, so that transitive callers of this function know that they
    /// do not need to do anything further to handle the error.
    fn handle_err(self, handler: F) -> HandledResult<T> {
        self.map_err(|e| {
            handler(e);
            HandledError {}
        })
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Base URL of the ops API. Overrides the config file.
    #[arg(long, global = true)]
    pub backend: Option<String>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List racks and their stores
    Racks,
    /// List stores that are not in any group
    FreeStores,
    /// List replication groups
    Groups,
    /// Print the info page address of a store
    Info(InfoArgs),
    /// Initialize free volumes on a store
    InitFreeVolume(InitFreeVolumeArgs),
    /// Create a replication group from free stores
    CreateGroup(CreateGroupArgs),
    /// Add volumes to a group
    AddVolume(AddVolumeArgs),
    /// Interactive console
    Shell,
    /// Check the config file and print the effective configuration
    Validate,
}

/// Load the configuration named on the command line, applying command line overrides.
pub fn load_config(cli: &Cli) -> HandledResult<Config> {
    let mut config = Config::load(cli.config.as_deref())
        .handle_err(|e| eprintln!("Could not load config: {e}"))?;

    if let Some(backend) = &cli.backend {
        config.backend = backend.clone();
    }
    debug!("using config {config:?}");

    Ok(config)
}

/// Build a console talking HTTP to the configured backend.
pub fn connect(cli: &Cli) -> HandledResult<AdminConsole<HttpBackend>> {
    let config = load_config(cli)?;
    let backend = HttpBackend::new(&config.backend, Duration::from_secs(config.timeout_secs))
        .handle_err(|e| eprintln!("Could not create HTTP client: {e}"))?;

    Ok(AdminConsole::new(backend, config.group))
}

pub fn main(cli: &Cli) -> HandledResult<()> {
    match &cli.command {
        Commands::Racks => list::list(cli, ResourceKind::Rack),
        Commands::FreeStores => list::list(cli, ResourceKind::FreeStore),
        Commands::Groups => list::list(cli, ResourceKind::Group),
        Commands::Info(args) => info::info(args),
        Commands::InitFreeVolume(args) => volume::init_free_volume(cli, args),
        Commands::CreateGroup(args) => group::create_group(cli, args),
        Commands::AddVolume(args) => volume::add_volume(cli, args),
        Commands::Shell => shell::shell(cli),
        Commands::Validate => validate::validate(cli),
    }
}
