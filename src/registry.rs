// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Object template registry.
//!
//! One immutable template per [`ObjectType`]: display name, default geometry
//! for brand-new objects, the fields the properties panel shows, and the
//! maximum number of instances allowed on one map.

use crate::models::{MapObjectInstance, ObjectHandle, ObjectId, ObjectType};

/// How a field is edited in the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Multiline,
    Link,
    Number,
}

/// Object attribute a panel field is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKey {
    Title,
    Description,
    Src,
    X,
    Y,
    Width,
    Height,
}

/// A field shown in the properties panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub key: FieldKey,
    pub editable: bool,
    /// Field may be left empty on save.
    pub optional: bool,
    pub kind: FieldKind,
}

/// Geometry and metadata given to a brand-new object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub title: Option<&'static str>,
    pub description: Option<&'static str>,
}

/// Template for one object type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTemplate {
    pub object_type: ObjectType,
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub default_geometry: DefaultGeometry,
    pub panel_fields: &'static [FieldSpec],
    /// Maximum instances per map, `None` for unbounded.
    pub limit: Option<usize>,
}

impl ObjectTemplate {
    /// Build a new instance of this template's type with default geometry.
    pub fn instantiate(&self, id: ObjectId, handle: ObjectHandle) -> MapObjectInstance {
        let defaults = &self.default_geometry;
        MapObjectInstance {
            id,
            object_type: self.object_type,
            x: defaults.x,
            y: defaults.y,
            width: defaults.width,
            height: defaults.height,
            title: defaults.title.map(str::to_string),
            description: defaults.description.map(str::to_string),
            src: None,
            handle,
        }
    }

    /// Fields the user may change.
    pub fn editable_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.panel_fields.iter().filter(|field| field.editable)
    }
}

const fn field(label: &'static str, key: FieldKey, kind: FieldKind) -> FieldSpec {
    FieldSpec {
        label,
        key,
        editable: true,
        optional: false,
        kind,
    }
}

const TITLE: FieldSpec = FieldSpec {
    optional: true,
    ..field("Title", FieldKey::Title, FieldKind::Text)
};
const DESCRIPTION: FieldSpec = FieldSpec {
    optional: true,
    ..field("Description", FieldKey::Description, FieldKind::Multiline)
};
const SRC: FieldSpec = FieldSpec {
    editable: false,
    optional: true,
    ..field("Source", FieldKey::Src, FieldKind::Link)
};
const X: FieldSpec = field("X", FieldKey::X, FieldKind::Number);
const Y: FieldSpec = field("Y", FieldKey::Y, FieldKind::Number);
const WIDTH: FieldSpec = field("Width", FieldKey::Width, FieldKind::Number);
const HEIGHT: FieldSpec = field("Height", FieldKey::Height, FieldKind::Number);

const ZONE_FIELDS: &[FieldSpec] = &[TITLE, DESCRIPTION, X, Y, WIDTH, HEIGHT];
const IMAGE_FIELDS: &[FieldSpec] = &[TITLE, DESCRIPTION, SRC, X, Y, WIDTH, HEIGHT];
const PLAIN_FIELDS: &[FieldSpec] = &[X, Y, WIDTH, HEIGHT];

const fn geometry(width: f64, height: f64, title: Option<&'static str>) -> DefaultGeometry {
    DefaultGeometry {
        x: 100.0,
        y: 100.0,
        width,
        height,
        title,
        description: None,
    }
}

static TEMPLATES: [ObjectTemplate; 9] = [
    ObjectTemplate {
        object_type: ObjectType::MainSpawn,
        name: "Entrance",
        description: Some("Where participants appear when they join"),
        default_geometry: geometry(200.0, 200.0, None),
        panel_fields: PLAIN_FIELDS,
        limit: Some(1),
    },
    ObjectTemplate {
        object_type: ObjectType::Image,
        name: "Image",
        description: None,
        default_geometry: geometry(200.0, 200.0, None),
        panel_fields: IMAGE_FIELDS,
        limit: None,
    },
    ObjectTemplate {
        object_type: ObjectType::NftImage,
        name: "NFT image",
        description: None,
        default_geometry: geometry(200.0, 200.0, None),
        panel_fields: IMAGE_FIELDS,
        limit: None,
    },
    ObjectTemplate {
        object_type: ObjectType::ShareScreen,
        name: "Screen share",
        description: Some("Region where a shared screen is shown"),
        default_geometry: geometry(480.0, 270.0, Some("Screen share")),
        panel_fields: ZONE_FIELDS,
        limit: Some(1),
    },
    ObjectTemplate {
        object_type: ObjectType::TimeBox,
        name: "Timer",
        description: None,
        default_geometry: geometry(240.0, 80.0, Some("Timer")),
        panel_fields: PLAIN_FIELDS,
        limit: Some(1),
    },
    ObjectTemplate {
        object_type: ObjectType::StaticObject,
        name: "Static object",
        description: None,
        default_geometry: geometry(100.0, 100.0, None),
        panel_fields: ZONE_FIELDS,
        limit: None,
    },
    ObjectTemplate {
        object_type: ObjectType::SpeakerLocation,
        name: "Speaker area",
        description: Some("Participants inside hear the speaker"),
        default_geometry: geometry(400.0, 400.0, Some("Speaker area")),
        panel_fields: ZONE_FIELDS,
        limit: None,
    },
    ObjectTemplate {
        object_type: ObjectType::ImageZone,
        name: "Image zone",
        description: None,
        default_geometry: geometry(300.0, 300.0, None),
        panel_fields: IMAGE_FIELDS,
        limit: None,
    },
    ObjectTemplate {
        object_type: ObjectType::QuietZone,
        name: "Restricted area",
        description: Some("Audio does not carry into or out of this area"),
        default_geometry: geometry(400.0, 300.0, Some("Quiet zone")),
        panel_fields: ZONE_FIELDS,
        limit: Some(1),
    },
];

/// Template for `object_type`.
pub fn template(object_type: ObjectType) -> &'static ObjectTemplate {
    match object_type {
        ObjectType::MainSpawn => &TEMPLATES[0],
        ObjectType::Image => &TEMPLATES[1],
        ObjectType::NftImage => &TEMPLATES[2],
        ObjectType::ShareScreen => &TEMPLATES[3],
        ObjectType::TimeBox => &TEMPLATES[4],
        ObjectType::StaticObject => &TEMPLATES[5],
        ObjectType::SpeakerLocation => &TEMPLATES[6],
        ObjectType::ImageZone => &TEMPLATES[7],
        ObjectType::QuietZone => &TEMPLATES[8],
    }
}

/// Instance limit for `object_type`.
pub fn limit(object_type: ObjectType) -> Option<usize> {
    template(object_type).limit
}

/// All templates in registry order.
pub fn templates() -> &'static [ObjectTemplate] {
    &TEMPLATES
}
