// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persisted map representation.
//!
//! A map stores object geometry and object metadata in two separate id-keyed
//! tables, plus the set of ids inherited from a shared background template.

use super::object::{ObjectGeometry, ObjectId, ObjectMetadata};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Complete map data for serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedMap {
    #[serde(default)]
    pub objects: BTreeMap<ObjectId, ObjectGeometry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects_data: Option<BTreeMap<ObjectId, ObjectMetadata>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_object_ids: Option<BTreeSet<ObjectId>>,
}

impl PersistedMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::object::ObjectType;

    #[test]
    fn test_parse_wire_representation() {
        let json = r#"{
            "objects": {
                "10": {"type": "main_spawn", "x": 1, "y": 2, "width": 30, "height": 40},
                "2": {"type": "image", "x": 0.5, "y": 0, "width": 10, "height": 10}
            },
            "objectsData": {
                "2": {"title": "Logo", "src": "https://cdn.example/logo.png"}
            },
            "backgroundObjectIds": [10]
        }"#;
        let map: PersistedMap = serde_json::from_str(json).unwrap();

        assert_eq!(map.len(), 2);
        let ids: Vec<_> = map.objects.keys().copied().collect();
        assert_eq!(ids, vec![ObjectId::Persisted(2), ObjectId::Persisted(10)]);
        assert_eq!(map.objects[&ObjectId::Persisted(10)].object_type, ObjectType::MainSpawn);

        let data = map.objects_data.as_ref().unwrap();
        assert_eq!(data[&ObjectId::Persisted(2)].title.as_deref(), Some("Logo"));
        assert!(data[&ObjectId::Persisted(2)].description.is_none());
        assert!(map
            .background_object_ids
            .as_ref()
            .unwrap()
            .contains(&ObjectId::Persisted(10)));
    }

    #[test]
    fn test_optional_sections_may_be_missing() {
        let map: PersistedMap = serde_json::from_str(r#"{"objects": {}}"#).unwrap();
        assert!(map.is_empty());
        assert!(map.objects_data.is_none());
        assert!(map.background_object_ids.is_none());
    }
}
