// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::{
    apply_ops, new_location, new_slot, next_location_id, next_slot_id, ApplyError, EntityKind,
    EntityRef, LocationPatch, Op, SlotPatch,
};
use crate::model::fixtures::{consistent_route, lid, placed, sid, two_stop_route};
use crate::model::{Choice, CompleteMode, RouteDocument, Slot};
use crate::session::RouteSession;
use crate::validate::{validate, Finding};

#[test]
fn apply_bumps_rev_and_records_delta() {
    let mut session = RouteSession::new(two_stop_route());
    let ops = [
        Op::AddSlot {
            slot: Slot::new(sid("c"), "C", false),
        },
        Op::AddLocation {
            location: placed("lc", "c", 51.3, 4.3),
        },
        Op::UpdateSlot {
            slot_id: sid("a"),
            patch: SlotPatch {
                label: Some("Alpha".to_owned()),
                ..SlotPatch::default()
            },
        },
    ];

    let result = apply_ops(&mut session, 0, &ops).expect("apply");

    assert_eq!(result.new_rev, 1);
    assert_eq!(session.rev(), 1);
    assert_eq!(result.applied, 3);
    assert_eq!(
        result.delta.added,
        vec![EntityRef::Slot(sid("c")), EntityRef::Location(lid("lc"))]
    );
    assert_eq!(result.delta.updated, vec![EntityRef::Slot(sid("a"))]);
    assert!(result.delta.removed.is_empty());
    assert_eq!(session.document().slot(&sid("a")).map(|s| s.label.as_str()), Some("Alpha"));
}

#[test]
fn apply_conflicts_on_stale_base_rev() {
    let mut session = RouteSession::new(two_stop_route());
    apply_ops(&mut session, 0, &[Op::RemoveLocation { location_id: lid("lb") }]).expect("apply");

    let err = apply_ops(&mut session, 0, &[Op::RemoveLocation { location_id: lid("la") }])
        .expect_err("stale");
    assert_eq!(
        err,
        ApplyError::Conflict {
            base_rev: 0,
            current_rev: 1
        }
    );
    assert!(session.document().location(&lid("la")).is_some());
}

#[test]
fn empty_batch_keeps_rev() {
    let mut session = RouteSession::new(two_stop_route());
    let result = apply_ops(&mut session, 0, &[]).expect("apply");
    assert_eq!(result.new_rev, 0);
    assert!(result.delta.is_empty());
}

#[test]
fn failing_op_rolls_back_the_whole_batch() {
    let mut session = RouteSession::new(two_stop_route());
    let before = session.clone();
    let ops = [
        Op::AddSlot {
            slot: Slot::new(sid("c"), "C", true),
        },
        Op::RemoveSlot { slot_id: sid("zzz") },
    ];

    let err = apply_ops(&mut session, 0, &ops).expect_err("missing slot");

    assert_eq!(
        err,
        ApplyError::NotFound {
            kind: EntityKind::Slot,
            id: "zzz".to_owned()
        }
    );
    assert_eq!(session, before);
}

#[rstest]
#[case::slot(Op::AddSlot { slot: Slot::new(sid("a"), "again", true) }, EntityKind::Slot)]
#[case::location(Op::AddLocation { location: placed("la", "b", 0.0, 0.0) }, EntityKind::Location)]
fn add_rejects_existing_ids(#[case] op: Op, #[case] kind: EntityKind) {
    let mut session = RouteSession::new(two_stop_route());
    let err = apply_ops(&mut session, 0, &[op]).expect_err("duplicate");
    assert!(matches!(err, ApplyError::AlreadyExists { kind: k, .. } if k == kind));
}

#[rstest]
#[case::update_slot(Op::UpdateSlot { slot_id: sid("x"), patch: SlotPatch::default() })]
#[case::remove_slot(Op::RemoveSlot { slot_id: sid("x") })]
#[case::update_location(Op::UpdateLocation {
    location_id: lid("x"),
    patch: LocationPatch::default(),
})]
#[case::remove_location(Op::RemoveLocation { location_id: lid("x") })]
fn update_and_remove_reject_unknown_ids(#[case] op: Op) {
    let mut session = RouteSession::new(two_stop_route());
    let err = apply_ops(&mut session, 0, &[op]).expect_err("unknown");
    assert!(matches!(err, ApplyError::NotFound { ref id, .. } if id == "x"));
}

#[test]
fn start_slot_cannot_be_removed() {
    let mut session = RouteSession::new(two_stop_route());
    let err = apply_ops(&mut session, 0, &[Op::RemoveSlot { slot_id: sid("start") }])
        .expect_err("start");
    assert_eq!(err, ApplyError::StartSlotRemoval);
}

#[test]
fn removing_a_slot_leaves_dangling_references_for_the_validator() {
    let mut session = RouteSession::new(consistent_route());
    apply_ops(&mut session, 0, &[Op::RemoveSlot { slot_id: sid("a") }]).expect("apply");

    let doc = session.document();
    assert_eq!(doc.location(&lid("la")).and_then(|l| l.slot.clone()), Some(sid("a")));
    assert_eq!(doc.slot(&sid("b")).and_then(|s| s.unlock_after.clone()), Some(sid("a")));

    let report = validate(doc);
    assert!(report.errors.contains(&Finding::UnknownUnlockTarget {
        slot_id: sid("b"),
        target: sid("a"),
    }));
    assert!(report.errors.contains(&Finding::UnknownSlotReference {
        location_id: lid("la"),
        slot_id: sid("a"),
    }));
}

#[test]
fn remove_then_add_in_one_batch_is_an_update() {
    let mut session = RouteSession::new(two_stop_route());
    let ops = [
        Op::RemoveLocation { location_id: lid("la") },
        Op::AddLocation {
            location: placed("la", "a", 52.0, 5.0),
        },
    ];
    let result = apply_ops(&mut session, 0, &ops).expect("apply");
    assert_eq!(result.delta.updated, vec![EntityRef::Location(lid("la"))]);
    assert!(result.delta.added.is_empty());
    assert!(result.delta.removed.is_empty());
}

#[test]
fn patches_clear_optional_fields_and_keep_the_rest() {
    let mut session = RouteSession::new(two_stop_route());
    let ops = [
        Op::UpdateSlot {
            slot_id: sid("b"),
            patch: SlotPatch {
                unlock_after: Some(None),
                complete_mode: Some(Some(Choice::Known(CompleteMode::Random))),
                ..SlotPatch::default()
            },
        },
        Op::UpdateLocation {
            location_id: lid("lb"),
            patch: LocationPatch {
                lat: Some(None),
                radius: Some(Some(120.0)),
                questions: Some(vec!["Which year?".to_owned()]),
                ..LocationPatch::default()
            },
        },
    ];
    apply_ops(&mut session, 0, &ops).expect("apply");

    let doc = session.document();
    let slot = doc.slot(&sid("b")).expect("slot");
    assert_eq!(slot.unlock_after, None);
    assert_eq!(slot.complete_mode, Some(Choice::Known(CompleteMode::Random)));
    assert!(slot.required);

    let loc = doc.location(&lid("lb")).expect("location");
    assert_eq!(loc.lat, None);
    assert_eq!(loc.lng, Some(4.1));
    assert_eq!(loc.radius, Some(120.0));
    assert_eq!(loc.slot, Some(sid("b")));
    assert_eq!(loc.questions, vec!["Which year?".to_owned()]);
}

#[test]
fn next_ids_fill_the_smallest_gap() {
    let mut doc = RouteDocument::new();
    doc.slots.push(Slot::new(sid("stop02"), "", true));
    doc.locations.push(placed("loc01", "start", 0.0, 0.0));

    assert_eq!(next_slot_id(&doc).as_str(), "stop01");
    assert_eq!(next_location_id(&doc).as_str(), "loc02");
}

#[test]
fn new_slot_unlocks_after_last_required_slot() {
    let mut doc = two_stop_route();
    doc.slots.push(Slot::new(sid("opt"), "Optional", false));

    let slot = new_slot(&doc);

    assert_eq!(slot.id.as_str(), "stop01");
    assert_eq!(slot.label, "stop01");
    assert!(slot.required);
    assert_eq!(slot.unlock_after, Some(sid("b")));
}

#[test]
fn new_slot_without_required_predecessor_has_no_unlock() {
    let mut doc = RouteDocument::new();
    doc.slots[0].required = false;
    assert_eq!(new_slot(&doc).unlock_after, None);
}

#[test]
fn new_location_copies_last_slot_and_radius() {
    let mut doc = two_stop_route();
    doc.locations[1].radius = Some(75.0);

    let loc = new_location(&doc, 51.5, 4.5);

    assert_eq!(loc.id.as_str(), "loc01");
    assert_eq!(loc.name, "loc01");
    assert_eq!(loc.slot, Some(sid("b")));
    assert_eq!(loc.radius, Some(75.0));
    assert_eq!((loc.lat, loc.lng), (Some(51.5), Some(4.5)));
}

#[test]
fn new_start_location_is_adopted_by_an_empty_prestart() {
    let mut session = RouteSession::new(RouteDocument::new());
    let loc = new_location(session.document(), 51.0, 4.0);
    assert_eq!(loc.slot, Some(sid("start")));
    assert_eq!(loc.radius, Some(30.0));

    let result = apply_ops(&mut session, 0, &[Op::AddLocation { location: loc }]).expect("apply");

    assert_eq!(session.document().prestart.use_location_id, Some(lid("loc01")));
    assert_eq!(result.delta.updated, vec![EntityRef::Prestart]);

    // a second start location does not steal the pre-start
    let second = new_location(session.document(), 51.1, 4.1);
    apply_ops(&mut session, 1, &[Op::AddLocation { location: second }]).expect("apply");
    assert_eq!(session.document().prestart.use_location_id, Some(lid("loc01")));
}
