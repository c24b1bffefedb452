// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use log::{debug, info, warn};

use crate::{
    backend::{Backend, BackendError},
    error::{ConsoleError, Result},
    resource::{decode_collection, Resource, ResourceKind},
};

/// Identifies one issued load. Only the most recently issued ticket may write the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, PartialEq)]
pub enum LoadOutcome {
    /// The response replaced the collection.
    Applied,
    /// A newer load was issued after this one, so its response was dropped.
    Superseded,
}

/// Holds the latest snapshot of one collection as listed by the backend.
///
/// The collection is either not loaded yet or exactly the result of the most recent successful
/// fetch. Responses are never merged into what is already held: a successful fetch replaces it
/// wholesale and a failed one leaves it untouched.
///
/// Loading is split in two halves so that a response can be matched to the request that produced
/// it. `begin_load()` issues a ticket; `finish_load()` applies the response only if its ticket is
/// still the latest, which keeps a slow, older response from clobbering newer data.
#[derive(Debug)]
pub struct ClusterDataStore<T: Resource> {
    items: Option<Vec<T>>,
    issued: u64,
    stale: bool,
}

impl<T: Resource> Default for ClusterDataStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Resource> ClusterDataStore<T> {
    pub fn new() -> Self {
        ClusterDataStore {
            items: None,
            issued: 0,
            stale: false,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        T::KIND
    }

    /// The current collection. Empty when nothing has been loaded yet.
    pub fn items(&self) -> &[T] {
        self.items.as_deref().unwrap_or(&[])
    }

    pub fn is_loaded(&self) -> bool {
        self.items.is_some()
    }

    /// Whether the next view entry should fetch: never loaded, or invalidated by an action.
    pub fn needs_reload(&self) -> bool {
        self.items.is_none() || self.stale
    }

    /// Mark the collection out of date. It stays readable until a reload replaces it.
    pub fn invalidate(&mut self) {
        debug!("{} marked for reload", T::KIND);
        self.stale = true;
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Apply the response to the load identified by `ticket`.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        response: std::result::Result<String, BackendError>,
    ) -> Result<LoadOutcome> {
        if ticket.0 != self.issued {
            debug!(
                "dropping response for {} load #{}, latest is #{}",
                T::KIND,
                ticket.0,
                self.issued
            );
            return Ok(LoadOutcome::Superseded);
        }

        let body = response.map_err(|e| {
            warn!("fetching {} failed: {e}", T::KIND);
            ConsoleError::FetchFailed {
                kind: T::KIND,
                reason: e.to_string(),
            }
        })?;

        let items = decode_collection::<T>(&body).inspect_err(|e| warn!("{e}"))?;

        info!("loaded {} {}", items.len(), T::KIND);
        self.items = Some(items);
        self.stale = false;

        Ok(LoadOutcome::Applied)
    }

    /// Fetch the collection and wait for the response.
    pub fn load<B: Backend + ?Sized>(&mut self, backend: &B) -> Result<&[T]> {
        let ticket = self.begin_load();
        let response = backend.get(T::KIND.path());
        self.finish_load(ticket, response)?;
        Ok(self.items())
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::resource::{Group, Store};

    const TWO_STORES: &str = r#"[{"id":"s1"},{"id":"s2"}]"#;

    fn ids(store: &ClusterDataStore<Store>) -> Vec<String> {
        store.items().iter().map(|s| s.id()).collect()
    }

    #[test]
    fn starts_unloaded() {
        let store: ClusterDataStore<Group> = ClusterDataStore::new();
        assert!(!store.is_loaded());
        assert!(store.needs_reload());
        assert!(store.items().is_empty());
        assert_eq!(store.kind(), ResourceKind::Group);
    }

    #[test]
    fn success_replaces_wholesale() {
        let mut store = ClusterDataStore::<Store>::new();
        let ticket = store.begin_load();
        store.finish_load(ticket, Ok(TWO_STORES.to_string())).unwrap();
        assert_eq!(ids(&store), vec!["s1", "s2"]);

        let ticket = store.begin_load();
        store
            .finish_load(ticket, Ok(r#"[{"id":"s3"}]"#.to_string()))
            .unwrap();
        assert_eq!(ids(&store), vec!["s3"]);
        assert!(!store.needs_reload());
    }

    #[test]
    fn failed_fetch_keeps_previous_collection() {
        let mut store = ClusterDataStore::<Store>::new();
        let ticket = store.begin_load();
        store.finish_load(ticket, Ok(TWO_STORES.to_string())).unwrap();
        let before = store.items().to_vec();

        let ticket = store.begin_load();
        let err = store
            .finish_load(
                ticket,
                Err(BackendError::Status(StatusCode::INTERNAL_SERVER_ERROR)),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ConsoleError::FetchFailed {
                kind: ResourceKind::FreeStore,
                ..
            }
        ));
        assert_eq!(store.items(), &before[..]);

        let ticket = store.begin_load();
        let err = store
            .finish_load(ticket, Ok("<html>oops</html>".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::DecodeFailed(_)));
        assert_eq!(store.items(), &before[..]);
    }

    #[test]
    fn failed_first_fetch_stays_empty() {
        let mut store = ClusterDataStore::<Store>::new();
        let ticket = store.begin_load();
        assert!(store.finish_load(ticket, Ok("nope".to_string())).is_err());
        assert!(!store.is_loaded());
        assert!(store.items().is_empty());
    }

    #[test]
    fn late_response_is_superseded() {
        let mut store = ClusterDataStore::<Store>::new();
        let older = store.begin_load();
        let newer = store.begin_load();

        assert_eq!(
            store
                .finish_load(newer, Ok(r#"[{"id":"new"}]"#.to_string()))
                .unwrap(),
            LoadOutcome::Applied
        );
        assert_eq!(
            store
                .finish_load(older, Ok(r#"[{"id":"old"}]"#.to_string()))
                .unwrap(),
            LoadOutcome::Superseded
        );
        assert_eq!(ids(&store), vec!["new"]);
    }

    #[test]
    fn invalidate_keeps_items_until_reload() {
        let mut store = ClusterDataStore::<Store>::new();
        let ticket = store.begin_load();
        store.finish_load(ticket, Ok(TWO_STORES.to_string())).unwrap();

        store.invalidate();
        assert!(store.needs_reload());
        assert_eq!(ids(&store), vec!["s1", "s2"]);

        let ticket = store.begin_load();
        let _ = store.finish_load(ticket, Err(BackendError::Status(StatusCode::BAD_GATEWAY)));
        assert!(store.needs_reload());
    }
}
