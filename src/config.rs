// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Layout settings.
//!
//! Every field has a default, so a config file only needs the values it
//! changes.

use crate::util::geometry::DEFAULT_INDENT_FRACTION;
use serde::{Deserialize, Serialize};

/// Placement defaults for injected images.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDefaults {
    /// Width and height used when neither a size nor a reference is given.
    pub fallback_size: f64,
    /// Offset added per ordinal index so images fan out.
    pub index_step: f64,
    /// Constant offset from the map corner.
    pub margin: f64,
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            fallback_size: 200.0,
            index_step: 50.0,
            margin: 100.0,
        }
    }
}

/// Settings for the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Share of an object's extent kept on screen when clamping positions.
    pub indent_fraction: f64,
    pub image: ImageDefaults,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            indent_fraction: DEFAULT_INDENT_FRACTION,
            image: ImageDefaults::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: LayoutConfig = serde_yaml::from_str("image:\n  margin: 40\n").unwrap();
        assert_eq!(config.indent_fraction, 0.1);
        assert_eq!(config.image.margin, 40.0);
        assert_eq!(config.image.fallback_size, 200.0);
    }
}
