// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations for map files and background images.

pub mod media;
pub mod serialization;
