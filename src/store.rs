// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Live object list of one map.
//!
//! Assembly merges persisted geometry with persisted metadata and enforces
//! the registry's per-type limits. Limit enforcement only drops objects that
//! were inherited from a shared background, so a map's own override of a
//! singleton object always survives.

use crate::models::{
    MapObjectInstance, ObjectGeometry, ObjectHandle, ObjectId, ObjectMetadata, ObjectType,
    PersistedMap,
};
use crate::registry;
use crate::save::PendingEdits;
use crate::util::ids::allocate_placeholder_id_above;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Error when changing the object list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("a map may hold at most {limit} {object_type} object(s)")]
    LimitReached { object_type: ObjectType, limit: usize },
    #[error("no object with id {0}")]
    NotFound(ObjectId),
}

/// In-memory object list of one map.
#[derive(Debug, Clone, Default)]
pub struct MapObjectStore {
    objects: Vec<MapObjectInstance>,
    next_handle: u64,
    /// Highest placeholder number seen this session.
    placeholder_high_water: u32,
}

impl MapObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the object list from persisted tables.
    ///
    /// When `inherited` is `None` any instance of an over-limit type may be
    /// dropped; otherwise only ids in `inherited` are.
    pub fn assemble(
        geometry: &BTreeMap<ObjectId, ObjectGeometry>,
        metadata: Option<&BTreeMap<ObjectId, ObjectMetadata>>,
        inherited: Option<&BTreeSet<ObjectId>>,
    ) -> Self {
        let mut store = Self::new();

        for (id, geo) in geometry {
            let data = metadata
                .and_then(|m| m.get(id))
                .cloned()
                .unwrap_or_default();
            let mut instance = MapObjectInstance::from_parts(*id, *geo, data);
            instance.handle = store.mint_handle();
            store.note_placeholder(*id);
            store.objects.push(instance);
        }

        store.enforce_limits(inherited);
        store
    }

    /// Build the object list from a whole persisted map.
    pub fn from_persisted(map: &PersistedMap) -> Self {
        Self::assemble(
            &map.objects,
            map.objects_data.as_ref(),
            map.background_object_ids.as_ref(),
        )
    }

    fn mint_handle(&mut self) -> ObjectHandle {
        self.next_handle += 1;
        ObjectHandle(self.next_handle)
    }

    fn note_placeholder(&mut self, id: ObjectId) {
        if let ObjectId::Placeholder(n) = id {
            self.placeholder_high_water = self.placeholder_high_water.max(n);
        }
    }

    fn enforce_limits(&mut self, inherited: Option<&BTreeSet<ObjectId>>) {
        let mut excess = [0usize; ObjectType::ALL.len()];
        for ty in ObjectType::ALL {
            if let Some(limit) = registry::limit(ty) {
                excess[ty.index()] = self.count_of(ty).saturating_sub(limit);
            }
        }
        if excess.iter().all(|&n| n == 0) {
            return;
        }

        self.objects.retain(|object| {
            let remaining = &mut excess[object.object_type.index()];
            let removable = inherited.map_or(true, |set| set.contains(&object.id));
            if *remaining > 0 && removable {
                *remaining -= 1;
                log::debug!(
                    "Dropped inherited {} object {} over the template limit",
                    object.object_type,
                    object.id
                );
                false
            } else {
                true
            }
        });

        for ty in ObjectType::ALL {
            if excess[ty.index()] > 0 {
                log::warn!(
                    "Map keeps {} {} object(s) over the limit; none were inherited",
                    excess[ty.index()],
                    ty
                );
            }
        }
    }

    /// All objects, in assembly order followed by local additions.
    pub fn objects(&self) -> &[MapObjectInstance] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.objects.iter().map(|object| &object.id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&MapObjectInstance> {
        self.objects.iter().find(|object| object.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut MapObjectInstance> {
        self.objects.iter_mut().find(|object| object.id == id)
    }

    pub fn count_of(&self, object_type: ObjectType) -> usize {
        self.objects
            .iter()
            .filter(|object| object.object_type == object_type)
            .count()
    }

    /// Add a brand-new object with the template's default geometry.
    pub fn add_object(&mut self, object_type: ObjectType) -> Result<&MapObjectInstance, StoreError> {
        if let Some(limit) = registry::limit(object_type) {
            if self.count_of(object_type) >= limit {
                return Err(StoreError::LimitReached { object_type, limit });
            }
        }

        let id = allocate_placeholder_id_above(self.ids(), self.placeholder_high_water);
        self.note_placeholder(id);
        let handle = self.mint_handle();
        let instance = registry::template(object_type).instantiate(id, handle);
        log::info!("Added {} object {}", object_type, id);

        self.objects.push(instance);
        let last = self.objects.len() - 1;
        Ok(&self.objects[last])
    }

    /// Remove an object from the list and drop its pending edits.
    pub fn remove_object(
        &mut self,
        id: ObjectId,
        edits: &mut PendingEdits,
    ) -> Result<MapObjectInstance, StoreError> {
        let index = self
            .objects
            .iter()
            .position(|object| object.id == id)
            .ok_or(StoreError::NotFound(id))?;
        let removed = self.objects.remove(index);
        edits.discard(id);
        log::info!("Removed {} object {}, total: {}", removed.object_type, id, self.objects.len());
        Ok(removed)
    }

    /// Fold the pending edits of `saved` into the canonical objects and
    /// drop those overlays. Call only after the save reported no errors.
    pub fn commit_edits(&mut self, saved: &[ObjectId], edits: &mut PendingEdits) {
        for &id in saved {
            let Some(overlay) = edits.discard(id) else {
                continue;
            };
            if let Some(object) = self.get_mut(id) {
                overlay.apply_to(object);
            }
        }
        log::debug!("Committed edits of {} object(s)", saved.len());
    }

    /// Write the list back into persisted form.
    pub fn persisted_snapshot(&self) -> PersistedMap {
        let mut map = PersistedMap::new();
        let mut data = BTreeMap::new();
        for object in &self.objects {
            map.objects.insert(object.id, object.geometry());
            let metadata = object.metadata();
            if metadata != ObjectMetadata::default() {
                data.insert(object.id, metadata);
            }
        }
        map.objects_data = Some(data);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geo(object_type: ObjectType) -> ObjectGeometry {
        ObjectGeometry {
            object_type,
            x: 0.0,
            y: 0.0,
            width: 10.0,
            height: 10.0,
        }
    }

    fn table(entries: &[(u64, ObjectType)]) -> BTreeMap<ObjectId, ObjectGeometry> {
        entries
            .iter()
            .map(|(id, ty)| (ObjectId::Persisted(*id), geo(*ty)))
            .collect()
    }

    fn ids(store: &MapObjectStore) -> Vec<ObjectId> {
        store.ids().copied().collect()
    }

    #[test]
    fn test_user_override_survives_limit() {
        let geometry = table(&[(1, ObjectType::MainSpawn), (2, ObjectType::MainSpawn)]);
        let inherited = BTreeSet::from([ObjectId::Persisted(2)]);

        let store = MapObjectStore::assemble(&geometry, None, Some(&inherited));
        assert_eq!(ids(&store), vec![ObjectId::Persisted(1)]);
    }

    #[test]
    fn test_inherited_dropped_even_when_listed_first() {
        let geometry = table(&[(1, ObjectType::MainSpawn), (2, ObjectType::MainSpawn)]);
        let inherited = BTreeSet::from([ObjectId::Persisted(1)]);

        let store = MapObjectStore::assemble(&geometry, None, Some(&inherited));
        assert_eq!(ids(&store), vec![ObjectId::Persisted(2)]);
    }

    #[test]
    fn test_without_inherited_set_first_excess_goes() {
        let geometry = table(&[
            (1, ObjectType::TimeBox),
            (2, ObjectType::TimeBox),
            (3, ObjectType::TimeBox),
        ]);
        let store = MapObjectStore::assemble(&geometry, None, None);
        assert_eq!(store.count_of(ObjectType::TimeBox), 1);
        assert_eq!(ids(&store), vec![ObjectId::Persisted(3)]);
    }

    #[test]
    fn test_user_objects_never_dropped() {
        let geometry = table(&[(1, ObjectType::QuietZone), (2, ObjectType::QuietZone)]);
        let store = MapObjectStore::assemble(&geometry, None, Some(&BTreeSet::new()));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_unbounded_types_untouched() {
        let geometry = table(&[
            (1, ObjectType::Image),
            (2, ObjectType::Image),
            (3, ObjectType::ShareScreen),
        ]);
        let inherited = BTreeSet::from([ObjectId::Persisted(1), ObjectId::Persisted(2)]);
        let store = MapObjectStore::assemble(&geometry, None, Some(&inherited));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_metadata_merged_and_handles_unique() {
        let geometry = table(&[(4, ObjectType::Image), (5, ObjectType::Image)]);
        let metadata = BTreeMap::from([(
            ObjectId::Persisted(5),
            ObjectMetadata {
                title: Some("Poster".to_string()),
                description: None,
                src: Some("poster.png".to_string()),
            },
        )]);

        let store = MapObjectStore::assemble(&geometry, Some(&metadata), None);
        let poster = store.get(ObjectId::Persisted(5)).unwrap();
        assert_eq!(poster.title.as_deref(), Some("Poster"));
        assert_eq!(poster.src.as_deref(), Some("poster.png"));
        assert!(store.get(ObjectId::Persisted(4)).unwrap().title.is_none());
        assert_ne!(store.objects()[0].handle, store.objects()[1].handle);
    }

    #[test]
    fn test_add_object_mints_fresh_placeholders() {
        let mut store = MapObjectStore::assemble(&table(&[(5, ObjectType::Image)]), None, None);

        let mut edits = PendingEdits::new();

        let first = store.add_object(ObjectType::Image).unwrap().id;
        let second = store.add_object(ObjectType::StaticObject).unwrap().id;
        assert_eq!(first, ObjectId::Placeholder(1));
        assert_eq!(second, ObjectId::Placeholder(2));

        store.remove_object(first, &mut edits).unwrap();
        let third = store.add_object(ObjectType::Image).unwrap().id;
        assert_eq!(third, ObjectId::Placeholder(3));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_removed_object_edits_do_not_leak_to_new_object() {
        let mut store = MapObjectStore::new();
        let mut edits = PendingEdits::new();

        let deleted = store.add_object(ObjectType::Image).unwrap().id;
        edits.set_title(deleted, Some("Deleted poster".to_string()));
        edits.set_size(deleted, 900.0, 900.0);
        store.remove_object(deleted, &mut edits).unwrap();
        assert!(edits.get(deleted).is_none());

        let fresh = store.add_object(ObjectType::Image).unwrap().id;
        assert_ne!(deleted, fresh);

        let fields = edits.resolve(store.get(fresh).unwrap());
        assert!(fields.title.is_none());
        assert_eq!((fields.width, fields.height), (200.0, 200.0));
    }

    #[test]
    fn test_assembled_placeholders_not_reminted() {
        let mut map = PersistedMap::new();
        map.objects.insert(ObjectId::Placeholder(4), geo(ObjectType::Image));
        let mut store = MapObjectStore::from_persisted(&map);

        let added = store.add_object(ObjectType::Image).unwrap().id;
        assert_eq!(added, ObjectId::Placeholder(5));
    }

    #[test]
    fn test_commit_edits_only_for_saved_ids() {
        let mut store = MapObjectStore::assemble(
            &table(&[(1, ObjectType::Image), (2, ObjectType::Image)]),
            None,
            None,
        );
        let mut edits = PendingEdits::new();
        edits.set_position(ObjectId::Persisted(1), 7.4, 8.6);
        edits.set_position(ObjectId::Persisted(2), 3.0, 3.0);

        store.commit_edits(&[ObjectId::Persisted(1)], &mut edits);

        let saved = store.get(ObjectId::Persisted(1)).unwrap();
        assert_eq!((saved.x, saved.y), (7.0, 9.0));
        assert!(edits.get(ObjectId::Persisted(1)).is_none());
        assert_eq!(store.get(ObjectId::Persisted(2)).unwrap().x, 0.0);
        assert!(edits.get(ObjectId::Persisted(2)).is_some());
    }

    #[test]
    fn test_several_types_over_limit_at_once() {
        let geometry = table(&[
            (1, ObjectType::MainSpawn),
            (2, ObjectType::TimeBox),
            (3, ObjectType::MainSpawn),
            (4, ObjectType::TimeBox),
            (5, ObjectType::Image),
        ]);
        let inherited = BTreeSet::from([
            ObjectId::Persisted(1),
            ObjectId::Persisted(2),
            ObjectId::Persisted(3),
            ObjectId::Persisted(4),
        ]);

        let store = MapObjectStore::assemble(&geometry, None, Some(&inherited));
        assert_eq!(store.count_of(ObjectType::MainSpawn), 1);
        assert_eq!(store.count_of(ObjectType::TimeBox), 1);
        assert_eq!(store.count_of(ObjectType::Image), 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_add_object_respects_limit() {
        let mut store = MapObjectStore::new();
        store.add_object(ObjectType::ShareScreen).unwrap();
        assert_eq!(
            store.add_object(ObjectType::ShareScreen).unwrap_err(),
            StoreError::LimitReached {
                object_type: ObjectType::ShareScreen,
                limit: 1
            }
        );
    }

    #[test]
    fn test_remove_missing_object() {
        let mut store = MapObjectStore::new();
        assert_eq!(
            store
                .remove_object(ObjectId::Persisted(3), &mut PendingEdits::new())
                .unwrap_err(),
            StoreError::NotFound(ObjectId::Persisted(3))
        );
    }

    #[test]
    fn test_snapshot_roundtrip() {
        let mut map = PersistedMap::new();
        map.objects = table(&[(1, ObjectType::Image), (2, ObjectType::SpeakerLocation)]);
        map.objects_data = Some(BTreeMap::from([(
            ObjectId::Persisted(2),
            ObjectMetadata {
                title: Some("Stage".to_string()),
                ..Default::default()
            },
        )]));

        let snapshot = MapObjectStore::from_persisted(&map).persisted_snapshot();
        assert_eq!(snapshot, map);
    }
}
