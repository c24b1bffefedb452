// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::time::Duration;

use {
    log::{debug, warn},
    reqwest::StatusCode,
    thiserror::Error,
};

/// Failure to get a usable response out of the backend. What this means for the operator is
/// decided by the caller: a failed listing and a failed action are reported differently.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),
}

/// The cluster-management API as seen by the console.
///
/// Both calls hand back the raw response body; decoding it is the caller's job.
pub trait Backend {
    fn get(&self, path: &str) -> Result<String, BackendError>;

    /// POST `form` as `application/x-www-form-urlencoded`.
    fn post_form(&self, path: &str, form: &[(String, String)]) -> Result<String, BackendError>;
}

/// A `Backend` that talks HTTP to the ops API server.
#[derive(Debug)]
pub struct HttpBackend {
    base: String,
    client: reqwest::blocking::Client,
}

impl HttpBackend {
    pub fn new(base: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::blocking::ClientBuilder::new()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base: base.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn read_body(url: &str, response: reqwest::blocking::Response) -> Result<String, BackendError> {
        match response.status() {
            StatusCode::OK => Ok(response.text()?),
            other => {
                warn!("{url} returned {other}");
                Err(BackendError::Status(other))
            }
        }
    }
}

impl Backend for HttpBackend {
    fn get(&self, path: &str) -> Result<String, BackendError> {
        let url = format!("{}{path}", self.base);
        debug!("GET {url}");

        let response = self.client.get(&url).send()?;
        Self::read_body(&url, response)
    }

    fn post_form(&self, path: &str, form: &[(String, String)]) -> Result<String, BackendError> {
        let url = format!("{}{path}", self.base);
        debug!("POST {url} {form:?}");

        let response = self.client.post(&url).form(form).send()?;
        Self::read_body(&url, response)
    }
}
