// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Save items for images obtained outside the editor (uploads, NFT imports).
//!
//! The resulting item is passed to the reconciler as an extra object.

use crate::config::ImageDefaults;
use crate::models::{Location, MapObjectInstance, ObjectType, SaveBatchItem};
use crate::util::geometry::{round_px, SizePair};

/// Where to put the injected image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePlacement {
    At(Location),
    /// Ordinal of the image among those added together.
    Index(usize),
}

/// Builder for an injected image.
#[derive(Debug, Clone)]
pub struct ImageRequest<'a> {
    image_id: i64,
    reference: Option<&'a MapObjectInstance>,
    placement: ImagePlacement,
    size: Option<SizePair>,
    object_type: ObjectType,
    title: Option<String>,
    description: Option<String>,
}

impl<'a> ImageRequest<'a> {
    pub fn new(image_id: i64) -> Self {
        Self {
            image_id,
            reference: None,
            placement: ImagePlacement::Index(0),
            size: None,
            object_type: ObjectType::Image,
            title: None,
            description: None,
        }
    }

    /// Object whose size drives the default size and offset, e.g. a speaker area.
    pub fn reference(mut self, reference: Option<&'a MapObjectInstance>) -> Self {
        self.reference = reference;
        self
    }

    pub fn placement(mut self, placement: ImagePlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn size(mut self, size: SizePair) -> Self {
        self.size = Some(size);
        self
    }

    /// Only image types are accepted; anything else keeps `image`.
    pub fn object_type(mut self, object_type: ObjectType) -> Self {
        match object_type {
            ObjectType::Image | ObjectType::NftImage => self.object_type = object_type,
            other => log::warn!("Ignoring non-image type {} for injected image", other),
        }
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Build the save item, or `None` when the image id is not positive.
    pub fn build(self, defaults: &ImageDefaults) -> Option<SaveBatchItem> {
        if self.image_id <= 0 {
            log::debug!("Rejected image injection for id {}", self.image_id);
            return None;
        }

        let reference_size = self.reference.map(MapObjectInstance::characteristic_size);
        let explicit = self
            .size
            .filter(|size| size.width.is_finite() && size.height.is_finite());
        let size = explicit.unwrap_or_else(|| match reference_size {
            Some(reference) => SizePair::new(reference / 2.0, reference / 2.0),
            None => SizePair::new(defaults.fallback_size, defaults.fallback_size),
        });

        let location = match self.placement {
            ImagePlacement::At(location) => location,
            ImagePlacement::Index(index) => {
                let offset = index as f64 * defaults.index_step
                    + reference_size.unwrap_or(0.0) / 2.0
                    + defaults.margin;
                let offset = round_px(offset) as i64;
                Location::new(offset, offset)
            }
        };

        Some(SaveBatchItem {
            id: None,
            width: round_px(size.width) as i64,
            height: round_px(size.height) as i64,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            object_type: self.object_type,
            location,
            image_id: Some(self.image_id as u64),
        })
    }
}

/// Save item for image `image_id` placed by ordinal `index`, with default sizing.
pub fn add_image_to_objects(
    image_id: i64,
    reference: Option<&MapObjectInstance>,
    index: usize,
) -> Option<SaveBatchItem> {
    ImageRequest::new(image_id)
        .reference(reference)
        .placement(ImagePlacement::Index(index))
        .build(&ImageDefaults::default())
}
