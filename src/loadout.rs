//! Saved loadouts.
//!
//! A loadout is a named, free-form snapshot of a proposed configuration.
//! Loadouts are append-only; the store assigns ids and creation times and
//! lets users delete them by id.

use crate::player::AllyCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A loadout as submitted by a user, before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLoadout {
    pub ally_code: AllyCode,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Event the loadout targets, e.g. `"gac"` or `"tw"`.
    #[serde(default)]
    pub event_type: String,
    /// Arbitrary structured payload.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl NewLoadout {
    pub fn new(ally_code: AllyCode, name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            ally_code,
            name: name.into(),
            description: String::new(),
            event_type: String::new(),
            data,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_event_type(mut self, event_type: impl Into<String>) -> Self {
        self.event_type = event_type.into();
        self
    }

    /// Attach the id and creation time chosen by the store.
    pub fn into_loadout(self, id: u64, created_at: DateTime<Utc>) -> Loadout {
        Loadout {
            id,
            ally_code: self.ally_code,
            name: self.name,
            description: self.description,
            event_type: self.event_type,
            data: self.data,
            created_at,
        }
    }
}

/// A stored loadout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub id: u64,
    pub ally_code: AllyCode,
    pub name: String,
    pub description: String,
    pub event_type: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
