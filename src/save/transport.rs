// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Contract for the request that persists a save batch.
//!
//! HTTP and auth live outside this crate; callers plug in an implementation.

use super::errors::SaveResponse;
use crate::models::SaveBatchItem;
use thiserror::Error;

/// Failure before any response body was received.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Sends one bulk update for a map's objects.
pub trait MapObjectsTransport {
    fn patch_objects(
        &mut self,
        map_id: &str,
        batch: &[SaveBatchItem],
    ) -> Result<SaveResponse, TransportError>;
}

/// Transport that decodes a canned JSON body, for offline use and tests.
#[derive(Debug, Clone)]
pub struct StaticTransport {
    body: String,
    /// Batches received, in order.
    pub sent: Vec<(String, Vec<SaveBatchItem>)>,
}

impl StaticTransport {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            sent: Vec::new(),
        }
    }

    pub fn accepting() -> Self {
        Self::new(r#"{"data": {"response": null}}"#)
    }
}

impl MapObjectsTransport for StaticTransport {
    fn patch_objects(
        &mut self,
        map_id: &str,
        batch: &[SaveBatchItem],
    ) -> Result<SaveResponse, TransportError> {
        self.sent.push((map_id.to_string(), batch.to_vec()));
        Ok(serde_json::from_str(&self.body)?)
    }
}
