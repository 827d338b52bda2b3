// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background image probing.
//!
//! The real space of a map is the pixel size of its background image.

use crate::util::geometry::SizePair;
use anyhow::{Context, Result};
use std::path::Path;

/// Read the real space of a background image without decoding its pixels.
pub fn background_real_space(path: &Path) -> Result<SizePair> {
    let (width, height) = image::image_dimensions(path)
        .with_context(|| format!("Failed to read image dimensions of {}", path.display()))?;
    log::debug!("Background {} is {}x{}", path.display(), width, height);
    Ok(SizePair::new(width as f64, height as f64))
}
