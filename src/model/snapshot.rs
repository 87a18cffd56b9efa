use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::Activity;

/// The client's in-memory copy of the roster, replaced wholesale on each
/// successful load. BTreeMap keeps card and selector order stable; the wire
/// format is a JSON object with no key-order guarantee.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct RosterSnapshot(BTreeMap<String, Activity>);

impl RosterSnapshot {
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Activity> {
        self.0.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Activity> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Activity)> for RosterSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, Activity)>>(iter: T) -> Self {
        RosterSnapshot(iter.into_iter().collect())
    }
}
