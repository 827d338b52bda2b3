// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persistence-ready save batch items.

use super::object::ObjectType;
use serde::{Deserialize, Serialize};

/// Integer top-left position of an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: i64,
    pub y: i64,
}

impl Location {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// One entry of a bulk save request.
///
/// `id` is omitted for objects that were never saved; storage assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveBatchItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub width: i64,
    pub height: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub location: Location,
    #[serde(rename = "imageId", default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<u64>,
}
