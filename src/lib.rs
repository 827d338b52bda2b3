// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! ROOMAP - Room map layout engine
//!
//! Places interactive zones (entrance, speaker areas, screen share, timer,
//! images, restricted areas) on top of a floor-plan image. Converts geometry
//! between the background image's pixel space and the scaled canvas,
//! assembles a map's object list under per-type limits, and reconciles live
//! edits into a single save batch.

pub mod config;
pub mod images;
pub mod io;
pub mod models;
pub mod registry;
pub mod save;
pub mod store;
pub mod util;

pub use config::LayoutConfig;
pub use images::{add_image_to_objects, ImagePlacement, ImageRequest};
pub use models::{MapObjectInstance, ObjectId, ObjectType, PersistedMap, SaveBatchItem};
pub use store::{MapObjectStore, StoreError};
pub use util::geometry::{CoordinateSystem, Converted, GeometrySync, Position, SizePair};
