// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Map object data structures.
//!
//! This module defines the object types that can be placed on a room map,
//! their identifiers, and the live instance shape used by the store and the
//! save reconciler.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Prefix of client-local identifiers for objects that were never saved.
pub const PLACEHOLDER_PREFIX: &str = "new-";

/// Kind of object placed on a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    MainSpawn,
    Image,
    NftImage,
    ShareScreen,
    TimeBox,
    StaticObject,
    SpeakerLocation,
    ImageZone,
    QuietZone,
}

impl ObjectType {
    /// Every object type, in registry order.
    pub const ALL: [ObjectType; 9] = [
        ObjectType::MainSpawn,
        ObjectType::Image,
        ObjectType::NftImage,
        ObjectType::ShareScreen,
        ObjectType::TimeBox,
        ObjectType::StaticObject,
        ObjectType::SpeakerLocation,
        ObjectType::ImageZone,
        ObjectType::QuietZone,
    ];

    /// Wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectType::MainSpawn => "main_spawn",
            ObjectType::Image => "image",
            ObjectType::NftImage => "nft_image",
            ObjectType::ShareScreen => "share_screen",
            ObjectType::TimeBox => "time_box",
            ObjectType::StaticObject => "static_object",
            ObjectType::SpeakerLocation => "speaker_location",
            ObjectType::ImageZone => "image_zone",
            ObjectType::QuietZone => "quiet_zone",
        }
    }

    /// Position of the type in [`ObjectType::ALL`], usable as a table index.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| IdParseError::UnknownType(s.to_string()))
    }
}

/// Error when parsing an object id or type from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("invalid object id: {0:?}")]
    InvalidId(String),
    #[error("unknown object type: {0:?}")]
    UnknownType(String),
}

/// Identity of a map object.
///
/// Saved objects carry the numeric id assigned by storage. Objects added in
/// the current session carry a `new-N` placeholder until their first save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawId", into = "RawId")]
pub enum ObjectId {
    Persisted(u64),
    Placeholder(u32),
}

impl ObjectId {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, ObjectId::Placeholder(_))
    }

    /// Numeric id for saved objects, `None` for placeholders.
    pub fn persisted(&self) -> Option<u64> {
        match self {
            ObjectId::Persisted(id) => Some(*id),
            ObjectId::Placeholder(_) => None,
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectId::Persisted(id) => write!(f, "{}", id),
            ObjectId::Placeholder(n) => write!(f, "{}{}", PLACEHOLDER_PREFIX, n),
        }
    }
}

impl FromStr for ObjectId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(n) = s.strip_prefix(PLACEHOLDER_PREFIX) {
            return n
                .parse()
                .map(ObjectId::Placeholder)
                .map_err(|_| IdParseError::InvalidId(s.to_string()));
        }
        s.parse()
            .map(ObjectId::Persisted)
            .map_err(|_| IdParseError::InvalidId(s.to_string()))
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        ObjectId::Persisted(id)
    }
}

/// Wire form of an id: a JSON number or a string.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl TryFrom<RawId> for ObjectId {
    type Error = IdParseError;

    fn try_from(raw: RawId) -> Result<Self, Self::Error> {
        match raw {
            RawId::Number(id) => Ok(ObjectId::Persisted(id)),
            RawId::Text(s) => s.parse(),
        }
    }
}

impl From<ObjectId> for RawId {
    fn from(id: ObjectId) -> Self {
        match id {
            ObjectId::Persisted(id) => RawId::Number(id),
            placeholder => RawId::Text(placeholder.to_string()),
        }
    }
}

/// Opaque handle the UI layer uses to track a live object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ObjectHandle(pub u64);

/// Persisted geometry of one object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectGeometry {
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Persisted metadata of one object. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

/// A live object on a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapObjectInstance {
    pub id: ObjectId,
    #[serde(rename = "type")]
    pub object_type: ObjectType,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip)]
    pub handle: ObjectHandle,
}

impl MapObjectInstance {
    /// Merge persisted geometry and metadata into a live instance.
    pub fn from_parts(id: ObjectId, geometry: ObjectGeometry, metadata: ObjectMetadata) -> Self {
        Self {
            id,
            object_type: geometry.object_type,
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            title: metadata.title,
            description: metadata.description,
            src: metadata.src,
            handle: ObjectHandle::default(),
        }
    }

    pub fn geometry(&self) -> ObjectGeometry {
        ObjectGeometry {
            object_type: self.object_type,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    pub fn metadata(&self) -> ObjectMetadata {
        ObjectMetadata {
            title: self.title.clone(),
            description: self.description.clone(),
            src: self.src.clone(),
        }
    }

    /// Characteristic size of the object: the diameter for round objects,
    /// the larger side otherwise.
    pub fn characteristic_size(&self) -> f64 {
        self.width.max(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_parse_and_display() {
        assert_eq!("42".parse::<ObjectId>(), Ok(ObjectId::Persisted(42)));
        assert_eq!("new-7".parse::<ObjectId>(), Ok(ObjectId::Placeholder(7)));
        assert_eq!(ObjectId::Placeholder(3).to_string(), "new-3");
        assert_eq!(ObjectId::Persisted(10).to_string(), "10");
        assert!("new-x".parse::<ObjectId>().is_err());
        assert!("banana".parse::<ObjectId>().is_err());
    }

    #[test]
    fn test_id_json_forms() {
        let ids: Vec<ObjectId> = serde_json::from_str(r#"[5, "new-1", "12"]"#).unwrap();
        assert_eq!(
            ids,
            vec![
                ObjectId::Persisted(5),
                ObjectId::Placeholder(1),
                ObjectId::Persisted(12)
            ]
        );
        let json = serde_json::to_string(&ids).unwrap();
        assert_eq!(json, r#"[5,"new-1",12]"#);
    }

    #[test]
    fn test_ids_order_numerically() {
        let mut ids = vec![
            ObjectId::Placeholder(1),
            ObjectId::Persisted(10),
            ObjectId::Persisted(2),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                ObjectId::Persisted(2),
                ObjectId::Persisted(10),
                ObjectId::Placeholder(1)
            ]
        );
    }

    #[test]
    fn test_object_type_names() {
        for ty in ObjectType::ALL {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
            assert_eq!(ty.as_str().parse::<ObjectType>(), Ok(ty));
            assert_eq!(ObjectType::ALL[ty.index()], ty);
        }
    }
}
