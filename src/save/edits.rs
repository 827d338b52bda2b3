// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Pending edit overlay.
//!
//! Holds in-progress values typed or dragged by the user, separate from the
//! canonical object snapshot. The reconciler merges the two at save time.

use crate::models::{MapObjectInstance, ObjectId};
use crate::util::geometry::round_px;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// In-progress values for one object. `None` means "not edited".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// `Some(None)` is an explicit clear.
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

fn explicit_null<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Values resolved from an overlay on top of a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFields {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl EditOverlay {
    pub fn is_empty(&self) -> bool {
        *self == EditOverlay::default()
    }

    /// Merge live values over `object`, falling back to the snapshot.
    ///
    /// Non-finite live geometry (NaN, infinities) is ignored.
    pub fn resolve(&self, object: &MapObjectInstance) -> ResolvedFields {
        ResolvedFields {
            x: finite_or(self.x, object.x),
            y: finite_or(self.y, object.y),
            width: finite_or(self.width, object.width),
            height: finite_or(self.height, object.height),
            title: self.title.clone().unwrap_or_else(|| object.title.clone()),
            description: self
                .description
                .clone()
                .unwrap_or_else(|| object.description.clone()),
        }
    }

    /// Write the resolved values into `object`, geometry rounded as saved.
    pub fn apply_to(&self, object: &mut MapObjectInstance) {
        let fields = self.resolve(object);
        object.x = round_px(fields.x);
        object.y = round_px(fields.y);
        object.width = round_px(fields.width);
        object.height = round_px(fields.height);
        object.title = fields.title;
        object.description = fields.description;
    }
}

fn finite_or(live: Option<f64>, snapshot: f64) -> f64 {
    match live {
        Some(value) if value.is_finite() => value,
        Some(value) => {
            log::warn!("Ignoring non-finite edit value {}", value);
            snapshot
        }
        None => snapshot,
    }
}

/// Pending edits of every object on a map, keyed by object id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PendingEdits {
    overlays: HashMap<ObjectId, EditOverlay>,
}

impl PendingEdits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ObjectId) -> Option<&EditOverlay> {
        self.overlays.get(&id)
    }

    /// Overlay for `id`, created empty on first access.
    pub fn entry(&mut self, id: ObjectId) -> &mut EditOverlay {
        self.overlays.entry(id).or_default()
    }

    pub fn set_position(&mut self, id: ObjectId, x: f64, y: f64) {
        let overlay = self.entry(id);
        overlay.x = Some(x);
        overlay.y = Some(y);
    }

    pub fn set_size(&mut self, id: ObjectId, width: f64, height: f64) {
        let overlay = self.entry(id);
        overlay.width = Some(width);
        overlay.height = Some(height);
    }

    pub fn set_title(&mut self, id: ObjectId, title: Option<String>) {
        self.entry(id).title = Some(title);
    }

    pub fn set_description(&mut self, id: ObjectId, description: Option<String>) {
        self.entry(id).description = Some(description);
    }

    /// Merged fields for `object`; the snapshot alone when nothing is pending.
    pub fn resolve(&self, object: &MapObjectInstance) -> ResolvedFields {
        self.overlays
            .get(&object.id)
            .cloned()
            .unwrap_or_default()
            .resolve(object)
    }

    /// Drop the overlay of `id`, e.g. once it is saved or the object is gone.
    pub fn discard(&mut self, id: ObjectId) -> Option<EditOverlay> {
        self.overlays.remove(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.values().all(EditOverlay::is_empty)
    }
}
