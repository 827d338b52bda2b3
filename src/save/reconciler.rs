// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Turns live object edits into one deduplicated save batch.
//!
//! Collection merges pending edits over object snapshots and normalizes the
//! result. Submission appends caller-supplied extra items, drops repeated
//! ids, sends the batch and translates any reported errors.

use super::edits::PendingEdits;
use super::errors::{SaveResponse, TRANSPORT_FAILURE_MESSAGE};
use super::transport::MapObjectsTransport;
use crate::models::{
    IdParseError, Location, MapObjectInstance, ObjectId, ObjectType, SaveBatchItem,
};
use crate::store::MapObjectStore;
use crate::util::geometry::round_px;
use std::collections::HashSet;
use std::str::FromStr;

/// One allow-list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterEntry {
    Type(ObjectType),
    Id(ObjectId),
    Exclude(ObjectId),
}

impl FromStr for FilterEntry {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(id) = s.strip_prefix('!') {
            return id.parse().map(FilterEntry::Exclude);
        }
        if let Ok(object_type) = s.parse() {
            return Ok(FilterEntry::Type(object_type));
        }
        s.parse().map(FilterEntry::Id)
    }
}

/// Selects which objects take part in a save.
///
/// With no positive entries every object is included; `!<id>` entries
/// always exclude.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveFilter {
    entries: Vec<FilterEntry>,
}

impl SaveFilter {
    /// Filter that includes every object.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(entries: Vec<FilterEntry>) -> Self {
        Self { entries }
    }

    /// Parse entries such as `image`, `42`, `new-3` or `!42`.
    pub fn parse<I, S>(entries: I) -> Result<Self, IdParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| entry.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries })
    }

    pub fn includes(&self, object: &MapObjectInstance) -> bool {
        let mut has_positive = false;
        let mut matched = false;
        for entry in &self.entries {
            match *entry {
                FilterEntry::Exclude(id) if id == object.id => return false,
                FilterEntry::Exclude(_) => {}
                FilterEntry::Type(ty) => {
                    has_positive = true;
                    matched |= ty == object.object_type;
                }
                FilterEntry::Id(id) => {
                    has_positive = true;
                    matched |= id == object.id;
                }
            }
        }
        matched || !has_positive
    }
}

/// Normalize one object for saving.
pub fn to_batch_item(object: &MapObjectInstance, edits: &PendingEdits) -> SaveBatchItem {
    let fields = edits.resolve(object);
    SaveBatchItem {
        id: object.id.persisted(),
        width: round_px(fields.width) as i64,
        height: round_px(fields.height) as i64,
        title: fields.title.unwrap_or_default(),
        description: fields.description.unwrap_or_default(),
        object_type: object.object_type,
        location: Location::new(round_px(fields.x) as i64, round_px(fields.y) as i64),
        image_id: None,
    }
}

/// Collect save items for every object the filter includes.
pub fn get_objects_to_save(
    objects: &[MapObjectInstance],
    edits: &PendingEdits,
    filter: &SaveFilter,
) -> Vec<SaveBatchItem> {
    objects
        .iter()
        .filter(|object| filter.includes(object))
        .map(|object| to_batch_item(object, edits))
        .collect()
}

/// Keep the first item for each id. Items without an id are all kept.
pub fn dedupe_batch(items: Vec<SaveBatchItem>) -> Vec<SaveBatchItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| match item.id {
            Some(id) => seen.insert(id),
            None => true,
        })
        .collect()
}

/// Build the final batch from collected items and extra items.
pub fn build_batch(collected: Vec<SaveBatchItem>, extra: Vec<SaveBatchItem>) -> Vec<SaveBatchItem> {
    let mut items = collected;
    items.extend(extra);
    let before = items.len();
    let batch = dedupe_batch(items);
    if batch.len() != before {
        log::debug!("Dropped {} duplicate save item(s)", before - batch.len());
    }
    batch
}

/// Saves the objects of one map through a transport.
///
/// `save_map_objects` borrows the reconciler mutably, so a second save for
/// the same map cannot start while one is in flight.
pub struct SaveReconciler<T: MapObjectsTransport> {
    map_id: String,
    transport: T,
}

impl<T: MapObjectsTransport> SaveReconciler<T> {
    pub fn new(map_id: impl Into<String>, transport: T) -> Self {
        Self {
            map_id: map_id.into(),
            transport,
        }
    }

    pub fn map_id(&self) -> &str {
        &self.map_id
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send collected items plus `extra` as one bulk update.
    ///
    /// Returns user-facing error messages; an empty list means the whole
    /// batch was committed.
    pub fn save_map_objects(
        &mut self,
        collected: Vec<SaveBatchItem>,
        extra: Vec<SaveBatchItem>,
    ) -> Vec<String> {
        let batch = build_batch(collected, extra);
        log::info!("Saving {} object(s) on map {}", batch.len(), self.map_id);

        match self.transport.patch_objects(&self.map_id, &batch) {
            Ok(response) => Self::response_messages(&response),
            Err(e) => {
                log::warn!("Failed to save map {}: {}", self.map_id, e);
                vec![TRANSPORT_FAILURE_MESSAGE.to_string()]
            }
        }
    }

    /// Collect from `store`, save, and on success fold the saved objects'
    /// edits into the store. On any error the edits stay pending.
    pub fn save(
        &mut self,
        store: &mut MapObjectStore,
        edits: &mut PendingEdits,
        filter: &SaveFilter,
        extra: Vec<SaveBatchItem>,
    ) -> Vec<String> {
        let included: Vec<ObjectId> = store
            .objects()
            .iter()
            .filter(|object| filter.includes(object))
            .map(|object| object.id)
            .collect();
        let collected = get_objects_to_save(store.objects(), edits, filter);

        let errors = self.save_map_objects(collected, extra);
        if errors.is_empty() {
            store.commit_edits(&included, edits);
        }
        errors
    }

    fn response_messages(response: &SaveResponse) -> Vec<String> {
        let messages = response.messages();
        if !messages.is_empty() {
            log::warn!("Save rejected with {} error(s)", messages.len());
        }
        messages
    }
}
