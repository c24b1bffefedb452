// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

pub mod backend;
pub mod commands;
pub mod config;
pub mod console;
pub mod dialog;
pub mod error;
pub mod render;
pub mod resource;
pub mod selection;
pub mod store;
pub mod test_env;

/// Gets the base URL of the cluster-management API.
pub fn default_backend() -> String {
    match std::env::var("BFSOPS_BACKEND") {
        Ok(url) => url,
        Err(_) => "http://127.0.0.1:8080".to_string(),
    }
}

pub fn default_config_path() -> String {
    match std::env::var("BFSOPS_CONFIG") {
        Ok(conf) => conf,
        Err(_) => "/etc/bfsops/bfsops.conf".to_string(),
    }
}

/// Builds the URL of a store's info page from its stat host.
pub fn store_info_url(host: &str) -> String {
    format!("http://{host}/info")
}
