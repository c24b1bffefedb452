// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

/// The free stores an operator has checked for group creation.
///
/// Ids are unique and kept in the order they were first checked, so `serialize()` is stable for
/// as long as the set is not changed.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SelectionSet {
    ids: Vec<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check (`included = true`) or uncheck a store. Both directions are idempotent.
    pub fn toggle(&mut self, id: &str, included: bool) {
        let position = self.ids.iter().position(|s| s == id);
        match (included, position) {
            (true, None) => self.ids.push(id.to_string()),
            (false, Some(i)) => {
                self.ids.remove(i);
            }
            _ => {}
        }
    }

    /// The selected ids joined with commas, as the backend expects them.
    pub fn serialize(&self) -> String {
        self.ids.join(",")
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}
