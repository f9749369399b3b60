//! Unit tests for intent resolution.

use super::*;
use crate::catalog::{CatalogSnapshot, EntityCatalog};
use crate::domain::{Entity, FailureKind, Position, Room};

fn catalog() -> EntityCatalog {
    EntityCatalog::from_snapshot(CatalogSnapshot {
        entities: vec![
            Entity::new(10, "chair", Position::new(1.0, 1.0, 0.0)).in_room(2),
            Entity::new(11, "Chair", Position::new(4.0, 1.0, 0.0)).in_room(3),
            Entity::new(12, "chair", Position::new(1.5, 1.0, 0.0)).in_room(2),
            Entity::new(13, "plant", Position::new(0.0, 0.0, 0.0)),
        ],
        rooms: vec![Room::new(2, "kitchen"), Room::new(3, "Living Room")],
    })
}

fn nav(label: &str, room: Option<&str>) -> RawIntent {
    RawIntent::NavigateToLabel {
        label: label.to_string(),
        room_name: room.map(String::from),
    }
}

fn failure_kind(intent: &ResolvedIntent) -> Option<FailureKind> {
    match intent {
        ResolvedIntent::ResolutionFailure(f) => Some(f.kind),
        _ => None,
    }
}

#[test]
fn test_resolves_object_in_room() {
    let resolved = resolve(&nav("chair", Some("kitchen")), &catalog());
    assert_eq!(
        resolved,
        ResolvedIntent::NavigateToEntity {
            entity_id: 10,
            target: "chair in kitchen".to_string()
        }
    );

    let resolved = resolve(&nav("chair", Some("living room")), &catalog());
    assert!(matches!(resolved, ResolvedIntent::NavigateToEntity { entity_id: 11, .. }));
}

#[test]
fn test_duplicate_labels_pick_first_in_catalog_order() {
    // Entities 10 and 12 are both chairs in the kitchen
    for _ in 0..3 {
        let resolved = resolve(&nav("chair", Some("kitchen")), &catalog());
        assert!(matches!(resolved, ResolvedIntent::NavigateToEntity { entity_id: 10, .. }));
    }
    let resolved = resolve(&nav("CHAIR", None), &catalog());
    assert!(matches!(resolved, ResolvedIntent::NavigateToEntity { entity_id: 10, .. }));
}

#[test]
fn test_room_not_found() {
    let resolved = resolve(&nav("chair", Some("garage")), &catalog());
    assert_eq!(failure_kind(&resolved), Some(FailureKind::RoomNotFound));
    assert_eq!(resolved.describe(), "Room \"garage\" not found");
}

#[test]
fn test_entity_not_found_in_room() {
    let resolved = resolve(&nav("plant", Some("kitchen")), &catalog());
    assert_eq!(failure_kind(&resolved), Some(FailureKind::EntityNotFoundInRoom));
    assert_eq!(
        resolved.describe(),
        "Object \"plant\" not found in room \"kitchen\""
    );
}

#[test]
fn test_entity_not_found() {
    let resolved = resolve(&nav("lamp", None), &catalog());
    assert_eq!(failure_kind(&resolved), Some(FailureKind::EntityNotFound));
    assert_eq!(resolved.describe(), "Object \"lamp\" not found");
}

#[test]
fn test_near_miss_adds_suggestion_without_resolving() {
    let resolved = resolve(&nav("chairs", None), &catalog());
    match resolved {
        ResolvedIntent::ResolutionFailure(f) => {
            assert_eq!(f.kind, FailureKind::EntityNotFound);
            assert_eq!(f.suggestion.as_deref(), Some("chair"));
            assert_eq!(f.message(), "Object \"chairs\" not found (did you mean \"chair\"?)");
        }
        other => panic!("expected failure, got {:?}", other),
    }

    let strict = IntentResolver::new().with_suggestion_threshold(1.1);
    match strict.resolve(&nav("chairs", None), &catalog()) {
        ResolvedIntent::ResolutionFailure(f) => assert!(f.suggestion.is_none()),
        other => panic!("expected failure, got {:?}", other),
    }
}

#[test]
fn test_movement_and_patrol_never_consult_catalog() {
    let empty = EntityCatalog::new();
    assert_eq!(resolve(&RawIntent::MoveBack, &empty), ResolvedIntent::MoveBack);
    assert_eq!(resolve(&RawIntent::PatrolStart, &empty), ResolvedIntent::PatrolStart);
    assert_eq!(resolve(&RawIntent::PatrolStop, &empty), ResolvedIntent::PatrolStop);
    assert_eq!(resolve(&RawIntent::Advance, &empty), ResolvedIntent::Advance);
    assert_eq!(resolve(&RawIntent::TurnAround, &empty), ResolvedIntent::TurnAround);
    assert!(RawIntent::PatrolStop.is_catalog_independent());
}

#[test]
fn test_unrecognized_becomes_no_match() {
    let resolved = resolve(
        &RawIntent::Unrecognized {
            transcript: "sing a song".to_string(),
        },
        &catalog(),
    );
    assert_eq!(failure_kind(&resolved), Some(FailureKind::NoMatch));
    assert_eq!(resolved.describe(), "Command not understood: \"sing a song\"");
}
