// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::{cell::RefCell, collections::HashMap};

use reqwest::{Method, StatusCode};

use crate::backend::{Backend, BackendError};

/// A recorded POST: the path and the form that was sent.
pub type Post = (String, Vec<(String, String)>);

/// An in-memory `Backend` for tests.
///
/// Each (method, path) pair answers with whatever was last scripted for it, every time it is
/// called. Unscripted endpoints answer 404. All requests are recorded so tests can check what the
/// console actually sent.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    script: RefCell<HashMap<(Method, String), Result<String, StatusCode>>>,
    gets: RefCell<Vec<String>>,
    posts: RefCell<Vec<Post>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(&self, path: &str, body: &str) {
        self.script
            .borrow_mut()
            .insert((Method::GET, path.to_string()), Ok(body.to_string()));
    }

    pub fn on_post(&self, path: &str, body: &str) {
        self.script
            .borrow_mut()
            .insert((Method::POST, path.to_string()), Ok(body.to_string()));
    }

    /// Make GETs of `path` fail as if the server had errored.
    pub fn fail_get(&self, path: &str) {
        self.script.borrow_mut().insert(
            (Method::GET, path.to_string()),
            Err(StatusCode::SERVICE_UNAVAILABLE),
        );
    }

    pub fn fail_post(&self, path: &str) {
        self.script.borrow_mut().insert(
            (Method::POST, path.to_string()),
            Err(StatusCode::SERVICE_UNAVAILABLE),
        );
    }

    /// How many times `path` was fetched.
    pub fn gets(&self, path: &str) -> usize {
        self.gets.borrow().iter().filter(|p| *p == path).count()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.borrow().clone()
    }

    fn answer(&self, method: Method, path: &str) -> Result<String, BackendError> {
        match self.script.borrow().get(&(method, path.to_string())) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(BackendError::Status(*status)),
            None => Err(BackendError::Status(StatusCode::NOT_FOUND)),
        }
    }
}

impl Backend for ScriptedBackend {
    fn get(&self, path: &str) -> Result<String, BackendError> {
        self.gets.borrow_mut().push(path.to_string());
        self.answer(Method::GET, path)
    }

    fn post_form(&self, path: &str, form: &[(String, String)]) -> Result<String, BackendError> {
        self.posts
            .borrow_mut()
            .push((path.to_string(), form.to_vec()));
        self.answer(Method::POST, path)
    }
}

/// Shorthand for building an expected form in assertions.
pub fn form(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
