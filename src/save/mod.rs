// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Saving map objects: pending edits, batch reconciliation and the
//! transport contract.

pub mod edits;
pub mod errors;
pub mod reconciler;
pub mod transport;

pub use edits::{EditOverlay, PendingEdits};
pub use errors::{ResponseError, SaveResponse};
pub use reconciler::{
    build_batch, dedupe_batch, get_objects_to_save, FilterEntry, SaveFilter, SaveReconciler,
};
pub use transport::{MapObjectsTransport, StaticTransport, TransportError};
