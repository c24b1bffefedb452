// SPDX-License-Identifier: MIT
// Copyright 2025. Triad National Security, LLC.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::error::{ConsoleError, Result};

/// The collections the backend can list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Rack,
    FreeStore,
    Group,
}

impl ResourceKind {
    /// Path of the listing endpoint for this kind.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Rack => "/rack",
            Self::FreeStore => "/freeStore",
            Self::Group => "/group",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Rack => "racks",
                Self::FreeStore => "free stores",
                Self::Group => "groups",
            }
        )
    }
}

/// A record as returned by the backend. The console only interprets an identifier and, for
/// stores, the host used to reach the store's info page. Everything else is for display.
pub trait Resource: DeserializeOwned + fmt::Debug + Clone {
    const KIND: ResourceKind;

    fn id(&self) -> String;

    fn host(&self) -> Option<&str> {
        None
    }
}

/// A physical storage node.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Store {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ip: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub api: String,
    /// Address of the stat server, which serves the store's `/info` page.
    #[serde(default, deserialize_with = "null_as_default")]
    pub stat: String,
    /// Address of the admin server, the target of free volume initialization.
    #[serde(default, deserialize_with = "null_as_default")]
    pub admin: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rack: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub volumes: Vec<String>,
}

impl Resource for Store {
    const KIND: ResourceKind = ResourceKind::FreeStore;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn host(&self) -> Option<&str> {
        if self.stat.is_empty() {
            None
        } else {
            Some(&self.stat)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Rack {
    pub name: String,
    #[serde(default, deserialize_with = "present_only")]
    pub stores: Vec<Store>,
}

impl Resource for Rack {
    const KIND: ResourceKind = ResourceKind::Rack;

    fn id(&self) -> String {
        self.name.clone()
    }
}

/// A replication group.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub id: u64,
    #[serde(default, rename = "storeIds", deserialize_with = "null_as_default")]
    pub store_ids: Vec<String>,
    /// Members the backend could resolve. Unresolved members come back as `null` and are left
    /// out; `store_ids` still lists them.
    #[serde(default, deserialize_with = "present_only")]
    pub stores: Vec<Store>,
}

impl Resource for Group {
    const KIND: ResourceKind = ResourceKind::Group;

    fn id(&self) -> String {
        self.id.to_string()
    }
}

/// Display fields may come back as `null` (an unset slice or pointer on the backend side).
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A list of stores where the list itself, or any entry, may be `null`.
fn present_only<'de, D>(deserializer: D) -> std::result::Result<Vec<Store>, D::Error>
where
    D: Deserializer<'de>,
{
    let stores: Option<Vec<Option<Store>>> = Option::deserialize(deserializer)?;
    Ok(stores.unwrap_or_default().into_iter().flatten().collect())
}

/// Decode a listing payload.
///
/// The payload must be a JSON array of records; anything else fails with `DecodeFailed`. The
/// body is only ever parsed as data.
pub fn decode_collection<T: Resource>(body: &str) -> Result<Vec<T>> {
    serde_json::from_str(body).map_err(|e| ConsoleError::DecodeFailed(format!("{}: {e}", T::KIND)))
}
