// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module converts sizes and positions between the real space of the
//! background image (original pixels) and the displayed space of the scaled
//! canvas. Both directions go through the same functions with source and
//! target swapped.

use serde::{Deserialize, Serialize};

/// Default share of an object's extent that must stay visible on screen.
pub const DEFAULT_INDENT_FRACTION: f64 = 0.1;

/// Width and height of a space or an object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizePair {
    pub width: f64,
    pub height: f64,
}

impl SizePair {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Largest size with this aspect ratio that fits inside `available`.
    pub fn fit_within(&self, available: SizePair) -> SizePair {
        if self.width <= 0.0 || self.height <= 0.0 || available.height <= 0.0 {
            return SizePair::default();
        }
        let aspect = self.width / self.height;
        let available_aspect = available.width / available.height;

        if aspect > available_aspect {
            // Wider than the viewport - fit to width
            SizePair::new(available.width, available.width / aspect)
        } else {
            SizePair::new(available.height * aspect, available.height)
        }
    }
}

/// Top-left position of an object.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Result of a conversion, flagged when clamping changed the raw value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Converted<T> {
    pub value: T,
    pub corrected: bool,
}

/// Receiver of corrected geometry, implemented by whatever renders an object.
///
/// Implementations must be idempotent: applying the same value twice leaves
/// the same state as applying it once.
pub trait GeometrySync {
    fn apply_size(&mut self, size: SizePair);
    fn apply_position(&mut self, position: Position);
}

impl Converted<SizePair> {
    /// Push the clamped size back to the renderer if clamping occurred.
    pub fn sync_into<S: GeometrySync + ?Sized>(&self, sink: &mut S) -> bool {
        if self.corrected {
            sink.apply_size(self.value);
        }
        self.corrected
    }
}

impl Converted<Position> {
    /// Push the clamped position back to the renderer if clamping occurred.
    pub fn sync_into<S: GeometrySync + ?Sized>(&self, sink: &mut S) -> bool {
        if self.corrected {
            sink.apply_position(self.value);
        }
        self.corrected
    }
}

/// Round half up, so `-2.5` becomes `-2` and `2.5` becomes `3`.
pub fn round_px(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn scale(source: f64, target: f64) -> f64 {
    if source == 0.0 {
        0.0
    } else {
        target / source
    }
}

/// Convert a size from `source` space to `target` space.
///
/// Each dimension is capped at the target space's dimension. There is no
/// lower bound.
pub fn convert_size_to_target(
    width: f64,
    height: f64,
    source: SizePair,
    target: SizePair,
) -> Converted<SizePair> {
    let raw_width = width * scale(source.width, target.width);
    let raw_height = height * scale(source.height, target.height);

    let clamped_width = raw_width.min(target.width);
    let clamped_height = raw_height.min(target.height);
    let corrected = clamped_width != raw_width || clamped_height != raw_height;

    Converted {
        value: SizePair::new(round_px(clamped_width), round_px(clamped_height)),
        corrected,
    }
}

fn clamp_axis(value: f64, extent: f64, limit: f64, indent_fraction: f64) -> f64 {
    let indent = extent * indent_fraction;
    if value >= limit {
        limit - indent
    } else if value + extent <= 0.0 {
        -extent + indent
    } else {
        value
    }
}

/// Convert a top-left position from `source` space to `target` space.
///
/// `object` is the object's extent in target space. A position pushed off
/// the right/bottom edge is pulled back so that `indent_fraction` of the
/// object stays visible; likewise for the left/top edge.
pub fn convert_position_to_target(
    x: f64,
    y: f64,
    source: SizePair,
    target: SizePair,
    object: SizePair,
    indent_fraction: f64,
) -> Converted<Position> {
    let raw_x = x * scale(source.width, target.width);
    let raw_y = y * scale(source.height, target.height);

    let clamped_x = clamp_axis(raw_x, object.width, target.width, indent_fraction);
    let clamped_y = clamp_axis(raw_y, object.height, target.height, indent_fraction);
    let corrected = clamped_x != raw_x || clamped_y != raw_y;

    Converted {
        value: Position::new(round_px(clamped_x), round_px(clamped_y)),
        corrected,
    }
}

/// Convert the center of a round object to the top-left corner in `target`
/// space.
pub fn convert_round_object_center_to_target(
    x: f64,
    y: f64,
    diameter: f64,
    source: SizePair,
    target: SizePair,
) -> Position {
    let scaled_diameter = diameter * scale(source.width, target.width);
    let half = scaled_diameter / 2.0;
    Position::new(
        round_px(x * scale(source.width, target.width) - half),
        round_px(y * scale(source.height, target.height) - half),
    )
}

/// Converter between the real and displayed spaces of one map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateSystem {
    pub real: SizePair,
    pub displayed: SizePair,
    pub indent_fraction: f64,
}

impl CoordinateSystem {
    pub fn new(real: SizePair, displayed: SizePair) -> Self {
        Self {
            real,
            displayed,
            indent_fraction: DEFAULT_INDENT_FRACTION,
        }
    }

    pub fn with_indent_fraction(mut self, indent_fraction: f64) -> Self {
        self.indent_fraction = indent_fraction;
        self
    }

    pub fn size_to_displayed(&self, width: f64, height: f64) -> Converted<SizePair> {
        convert_size_to_target(width, height, self.real, self.displayed)
    }

    pub fn size_to_real(&self, width: f64, height: f64) -> Converted<SizePair> {
        convert_size_to_target(width, height, self.displayed, self.real)
    }

    /// `object` is the object's size in displayed space.
    pub fn position_to_displayed(&self, x: f64, y: f64, object: SizePair) -> Converted<Position> {
        convert_position_to_target(x, y, self.real, self.displayed, object, self.indent_fraction)
    }

    /// `object` is the object's size in real space.
    pub fn position_to_real(&self, x: f64, y: f64, object: SizePair) -> Converted<Position> {
        convert_position_to_target(x, y, self.displayed, self.real, object, self.indent_fraction)
    }

    pub fn round_center_to_displayed(&self, x: f64, y: f64, diameter: f64) -> Position {
        convert_round_object_center_to_target(x, y, diameter, self.real, self.displayed)
    }

    pub fn round_center_to_real(&self, x: f64, y: f64, diameter: f64) -> Position {
        convert_round_object_center_to_target(x, y, diameter, self.displayed, self.real)
    }
}
