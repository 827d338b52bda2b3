//! End-to-end scenarios for the room map layout engine

use roomap::models::{Location, ObjectId, ObjectType, PersistedMap, SaveBatchItem};
use roomap::save::{
    build_batch, get_objects_to_save, PendingEdits, SaveFilter, SaveReconciler, StaticTransport,
};
use roomap::util::ids::allocate_placeholder_id;
use roomap::{add_image_to_objects, CoordinateSystem, MapObjectStore, SizePair};

fn map_from_json(json: &str) -> PersistedMap {
    serde_json::from_str(json).unwrap()
}

#[test]
fn size_scales_from_real_to_displayed() {
    let spaces = CoordinateSystem::new(SizePair::new(1200.0, 800.0), SizePair::new(600.0, 400.0));
    let size = spaces.size_to_displayed(600.0, 400.0);
    assert_eq!(size.value, SizePair::new(300.0, 200.0));
}

#[test]
fn inherited_singleton_dropped_for_user_override() {
    let map = map_from_json(
        r#"{
            "objects": {
                "1": {"type": "main_spawn", "x": 0, "y": 0, "width": 50, "height": 50},
                "2": {"type": "main_spawn", "x": 9, "y": 9, "width": 50, "height": 50}
            },
            "backgroundObjectIds": [2]
        }"#,
    );

    let store = MapObjectStore::from_persisted(&map);
    assert_eq!(store.len(), 1);
    assert_eq!(store.objects()[0].id, ObjectId::Persisted(1));
}

#[test]
fn new_object_saved_without_id() {
    let map = map_from_json(r#"{"objects": {}}"#);
    let mut store = MapObjectStore::from_persisted(&map);
    let id = store.add_object(ObjectType::Image).unwrap().id;
    assert_eq!(id, ObjectId::Placeholder(1));

    let items = get_objects_to_save(store.objects(), &PendingEdits::new(), &SaveFilter::all());
    let value = serde_json::to_value(&items).unwrap();
    assert!(value[0].get("id").is_none());
    assert_eq!(value[0]["type"], "image");
}

#[test]
fn duplicate_extra_object_loses_to_collected() {
    let map = map_from_json(
        r#"{"objects": {"10": {"type": "time_box", "x": 1, "y": 2, "width": 3, "height": 4}}}"#,
    );
    let store = MapObjectStore::from_persisted(&map);
    let collected = get_objects_to_save(store.objects(), &PendingEdits::new(), &SaveFilter::all());

    let extra = SaveBatchItem {
        id: Some(10),
        width: 999,
        height: 999,
        title: "other".to_string(),
        description: String::new(),
        object_type: ObjectType::TimeBox,
        location: Location::new(0, 0),
        image_id: None,
    };
    let batch = build_batch(collected.clone(), vec![extra]);
    assert_eq!(batch, collected);
    assert_eq!(batch[0].width, 3);
}

#[test]
fn allocation_skips_existing_placeholders() {
    let existing = [
        ObjectId::Persisted(5),
        ObjectId::Placeholder(1),
        ObjectId::Placeholder(2),
    ];
    assert_eq!(allocate_placeholder_id(&existing).to_string(), "new-3");
}

#[test]
fn uploaded_image_saved_with_edited_objects() {
    let map = map_from_json(
        r#"{
            "objects": {"4": {"type": "speaker_location", "x": 0, "y": 0, "width": 400, "height": 400}},
            "objectsData": {"4": {"title": "Stage"}}
        }"#,
    );
    let mut store = MapObjectStore::from_persisted(&map);
    let stage = store.get(ObjectId::Persisted(4));

    let mut edits = PendingEdits::new();
    edits.set_position(ObjectId::Persisted(4), 120.7, 80.2);

    let upload = add_image_to_objects(55, stage, 0).unwrap();
    assert_eq!((upload.width, upload.height), (200, 200));

    let mut reconciler = SaveReconciler::new("lobby", StaticTransport::accepting());
    let errors = reconciler.save(&mut store, &mut edits, &SaveFilter::all(), vec![upload]);
    assert!(errors.is_empty());
    assert!(edits.is_empty());
    assert_eq!(store.get(ObjectId::Persisted(4)).unwrap().x, 121.0);

    let sent = &reconciler.transport().sent[0].1;
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[0].title, "Stage");
    assert_eq!(sent[0].location, Location::new(121, 80));
    assert_eq!(sent[1].image_id, Some(55));
    assert_eq!(sent[1].id, None);
}

#[test]
fn rejected_image_never_reaches_batch() {
    assert!(add_image_to_objects(0, None, 1).is_none());
}
