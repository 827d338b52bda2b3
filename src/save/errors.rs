// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Save response contract and error-code translation.

use serde::{Deserialize, Serialize};

/// Message shown when the request never produced a response.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Could not save map objects. Please try again.";

/// One error reported by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseError {
    Code(String),
    Detailed {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        body: Option<Vec<String>>,
    },
}

/// Body of a bulk update response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SaveResponse {
    Errors { errors: Vec<ResponseError> },
    Data { data: serde_json::Value },
}

impl SaveResponse {
    pub fn is_ok(&self) -> bool {
        match self {
            SaveResponse::Errors { errors } => errors.is_empty(),
            SaveResponse::Data { .. } => true,
        }
    }

    /// Human-readable messages, empty on success.
    pub fn messages(&self) -> Vec<String> {
        match self {
            SaveResponse::Data { .. } => Vec::new(),
            SaveResponse::Errors { errors } => errors.iter().flat_map(ResponseError::messages).collect(),
        }
    }
}

impl ResponseError {
    /// One message for the error itself and one per offending field.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ResponseError::Code(code) => vec![translate(code)],
            ResponseError::Detailed { text, body } => std::iter::once(text)
                .chain(body.iter().flatten())
                .map(|code| translate(code))
                .collect(),
        }
    }
}

/// Message for a known storage error code.
pub fn message_for_code(code: &str) -> Option<&'static str> {
    let message = match code {
        "v1.access_denied" => "You do not have permission to edit this map.",
        "v1.not_found" => "This map no longer exists.",
        "v1.object_not_found" => "One of the objects was deleted by someone else.",
        "v1.limit_exceeded" => "This map already has the maximum number of objects of this type.",
        "v1.invalid_type" => "Unknown object type.",
        "v1.invalid_location" => "Object position is outside the map.",
        "v1.invalid_size" => "Object width and height must be positive.",
        "v1.invalid_image" => "The image could not be found.",
        "v1.title_too_long" => "Title is too long.",
        "v1.description_too_long" => "Description is too long.",
        _ => return None,
    };
    Some(message)
}

/// Translate `code`, passing unknown codes through unchanged.
pub fn translate(code: &str) -> String {
    match message_for_code(code) {
        Some(message) => message.to_string(),
        None => {
            log::warn!("Unmapped save error code: {}", code);
            code.to_string()
        }
    }
}
