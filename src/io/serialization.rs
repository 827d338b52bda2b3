// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map, edit, batch and config file serialization.
//!
//! Files are read and written as YAML or JSON, chosen by extension.

use crate::config::LayoutConfig;
use crate::models::{PersistedMap, SaveBatchItem};
use crate::save::PendingEdits;
use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Supported file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Format implied by the path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path.extension().and_then(|s| s.to_str());
        match extension {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => bail!("Unsupported file extension: {:?}", extension),
        }
    }
}

/// Serialize `value` in `format`.
pub fn to_string<T: Serialize>(value: &T, format: Format) -> Result<String> {
    let text = match format {
        Format::Yaml => serde_yaml::to_string(value)?,
        Format::Json => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

fn export<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let text = to_string(value, Format::from_path(path)?)?;
    std::fs::write(path, text)?;
    Ok(())
}

fn import<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let value = match format {
        Format::Yaml => serde_yaml::from_str(&text)?,
        Format::Json => serde_json::from_str(&text)?,
    };
    Ok(value)
}

/// Export a persisted map.
pub fn export_map(map: &PersistedMap, path: &Path) -> Result<()> {
    export(map, path)
}

/// Import a persisted map.
pub fn import_map(path: &Path) -> Result<PersistedMap> {
    let map: PersistedMap = import(path)?;
    log::info!("Imported {} objects from {}", map.len(), path.display());
    Ok(map)
}

/// Import pending edits keyed by object id.
pub fn import_edits(path: &Path) -> Result<PendingEdits> {
    import(path)
}

/// Import extra save items, e.g. prepared image injections.
pub fn import_batch(path: &Path) -> Result<Vec<SaveBatchItem>> {
    import(path)
}

/// Export a save batch.
pub fn export_batch(batch: &[SaveBatchItem], path: &Path) -> Result<()> {
    export(&batch, path)
}

/// Import layout settings.
pub fn import_config(path: &Path) -> Result<LayoutConfig> {
    import(path)
}
