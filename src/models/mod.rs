// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data model for room maps and their objects.

pub mod batch;
pub mod map;
pub mod object;

pub use batch::{Location, SaveBatchItem};
pub use map::PersistedMap;
pub use object::{
    IdParseError, MapObjectInstance, ObjectGeometry, ObjectHandle, ObjectId, ObjectMetadata,
    ObjectType,
};
