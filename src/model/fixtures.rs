// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::document::RouteDocument;
use super::ids::{LocationId, SlotId};
use super::location::Location;
use super::slot::Slot;

pub(crate) fn sid(value: &str) -> SlotId {
    SlotId::new(value).expect("slot id")
}

pub(crate) fn lid(value: &str) -> LocationId {
    LocationId::new(value).expect("location id")
}

pub(crate) fn placed(id: &str, slot: &str, lat: f64, lng: f64) -> Location {
    Location::new(lid(id), Some(sid(slot)), id)
        .at(lat, lng)
        .with_radius(30.0)
}

pub(crate) fn unplaced(id: &str, slot: &str) -> Location {
    Location::new(lid(id), Some(sid(slot)), id).with_radius(30.0)
}

/// `start` plus two required slots `a` -> `b`, one placed location each.
pub(crate) fn two_stop_route() -> RouteDocument {
    let mut doc = RouteDocument::empty();
    doc.slots.push(Slot::new(sid("a"), "A", true));
    doc.slots
        .push(Slot::new(sid("b"), "B", true).with_unlock_after(sid("a")));
    doc.locations.push(placed("la", "a", 51.0, 4.0));
    doc.locations.push(placed("lb", "b", 51.1, 4.1));
    doc
}

/// A fully synchronised route: start slot and start location in place, pre-start
/// pointing at it, and every required slot covered.
pub(crate) fn consistent_route() -> RouteDocument {
    let mut doc = two_stop_route();
    doc.locations
        .insert(0, placed("startloc", "start", 51.2, 4.4));
    doc.prestart.use_location_id = Some(lid("startloc"));
    doc.prestart.meeting_point.lat = Some(51.2);
    doc.prestart.meeting_point.lng = Some(4.4);
    doc.prestart.meeting_point.label = "Start".to_owned();
    doc
}
