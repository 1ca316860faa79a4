// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Keeps the `start` slot, its location and the pre-start meeting point in step.
//!
//! Two strategies exist and callers must pick one explicitly:
//! - [`StartSlotSync::Regenerate`] rebuilds the start location from the meeting point and then
//!   copies the location's position back over the meeting point. User-invoked reset.
//! - [`StartSlotSync::FillGaps`] only fills what is missing and never overwrites a present
//!   value. Safe on load/import.
//!
//! Both are no-ops on a document that is already consistent.

use crate::model::{
    allocate_start_location_id, Location, LocationId, Meta, PartialDocument, Prestart,
    RouteDocument, Slot, SlotId, DEFAULT_COORDINATE, IMPORTED_TITLE,
    START_LOCATION_RADIUS,
};

pub const START_LABEL: &str = "Start";
pub const START_LOCATION_NAME: &str = "Start location";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartSlotSync {
    /// Destructive toward the meeting point: see [`make_prestart_start_slot`].
    Regenerate,
    /// Non-destructive repair: see [`sync_prestart_to_start_non_destructive`].
    FillGaps,
}

/// Runs one strategy and reports whether the document changed.
pub fn reconcile_start_slot(doc: &mut RouteDocument, strategy: StartSlotSync) -> bool {
    let before = doc.clone();
    match strategy {
        StartSlotSync::Regenerate => {
            make_prestart_start_slot(doc);
        }
        StartSlotSync::FillGaps => sync_prestart_to_start_non_destructive(doc),
    }
    let changed = *doc != before;
    tracing::debug!(?strategy, changed, "reconciled start slot");
    changed
}

/// Inserts the `start` slot at the front if no slot has that id. Returns whether it did.
pub fn ensure_start_slot(doc: &mut RouteDocument) -> bool {
    if doc.has_start_slot() {
        return false;
    }
    doc.slots.insert(0, Slot::start());
    tracing::info!("inserted missing start slot");
    true
}

/// Points the pre-start at a start location, creating one from the meeting point if
/// none is bound to `start`, then overwrites the meeting point position from it.
///
/// Returns the id of the start location now referenced by the pre-start.
pub fn make_prestart_start_slot(doc: &mut RouteDocument) -> LocationId {
    ensure_start_slot(doc);

    let location_id = match doc.first_start_location() {
        Some(loc) => loc.id.clone(),
        None => create_start_location_from_meeting_point(doc),
    };
    doc.prestart.use_location_id = Some(location_id.clone());

    let position = doc
        .location(&location_id)
        .map(|loc| (loc.lat, loc.lng));
    if let Some((lat, lng)) = position {
        let meeting_point = &mut doc.prestart.meeting_point;
        meeting_point.lat = lat;
        meeting_point.lng = lng;
        if meeting_point.label.is_empty() {
            meeting_point.label = START_LABEL.to_owned();
        }
    }

    location_id
}

fn create_start_location_from_meeting_point(doc: &mut RouteDocument) -> LocationId {
    let meeting_point = &doc.prestart.meeting_point;
    let lat = meeting_point.lat.unwrap_or(DEFAULT_COORDINATE.lat);
    let lng = meeting_point.lng.unwrap_or(DEFAULT_COORDINATE.lng);
    let name = if meeting_point.label.is_empty() {
        START_LOCATION_NAME.to_owned()
    } else {
        format!("{START_LABEL}: {}", meeting_point.label)
    };

    let location_id = allocate_start_location_id(doc.location_ids());
    let location = Location::new(location_id.clone(), Some(SlotId::start()), name)
        .at(lat, lng)
        .with_radius(START_LOCATION_RADIUS);
    doc.locations.insert(0, location);

    tracing::info!(
        location_id = %location_id,
        lat,
        lng,
        "created start location from meeting point"
    );
    location_id
}

/// Back-fills absent top-level sections with defaults, leaving present ones untouched.
pub fn fill_missing_sections(partial: PartialDocument) -> RouteDocument {
    RouteDocument {
        meta: partial.meta.unwrap_or_else(|| Meta::titled(IMPORTED_TITLE)),
        settings: partial.settings.unwrap_or_default(),
        prestart: partial.prestart.unwrap_or_else(Prestart::editor_default),
        slots: partial.slots.unwrap_or_default(),
        locations: partial.locations.unwrap_or_default(),
    }
}

/// Load-time repair: [`fill_missing_sections`] followed by
/// [`sync_prestart_to_start_non_destructive`].
pub fn repair_loaded(partial: PartialDocument) -> RouteDocument {
    let mut doc = fill_missing_sections(partial);
    sync_prestart_to_start_non_destructive(&mut doc);
    doc
}

/// Fills gaps between the pre-start and the start slot/location without overwriting
/// anything that is already set.
///
/// - ensures the `start` slot exists;
/// - gives the pre-start a fresh start-location id if it has none (never reuses an
///   existing location);
/// - creates an unplaced placeholder location for that id if it does not exist;
/// - copies coordinates between meeting point and start location in whichever
///   direction has them. If neither side has them, both stay unset.
pub fn sync_prestart_to_start_non_destructive(doc: &mut RouteDocument) {
    ensure_start_slot(doc);

    let location_id = match doc.prestart.use_location_id.clone() {
        Some(location_id) => location_id,
        None => {
            let location_id = allocate_start_location_id(doc.location_ids());
            tracing::info!(location_id = %location_id, "assigned pre-start location id");
            doc.prestart.use_location_id = Some(location_id.clone());
            location_id
        }
    };

    if doc.location(&location_id).is_none() {
        let placeholder = Location::new(location_id.clone(), Some(SlotId::start()), START_LABEL)
            .with_radius(START_LOCATION_RADIUS);
        doc.locations.insert(0, placeholder);
        tracing::info!(location_id = %location_id, "created placeholder start location");
    }

    let RouteDocument {
        prestart, locations, ..
    } = doc;
    let Some(location) = locations.iter_mut().find(|loc| loc.id == location_id) else {
        return;
    };
    fill_start_location_gaps(prestart, location);
}

fn fill_start_location_gaps(prestart: &mut Prestart, location: &mut Location) {
    if location.slot.is_none() {
        location.slot = Some(SlotId::start());
    }

    let meeting_point = &mut prestart.meeting_point;
    if meeting_point.label.is_empty() {
        meeting_point.label = START_LABEL.to_owned();
    }

    if let Some(position) = location.position() {
        if meeting_point.position().is_none() {
            meeting_point.lat = meeting_point.lat.or(Some(position.lat));
            meeting_point.lng = meeting_point.lng.or(Some(position.lng));
            tracing::debug!(location_id = %location.id, "filled meeting point from start location");
        }
    }
    if let Some(position) = meeting_point.position() {
        if location.position().is_none() {
            location.lat = location.lat.or(Some(position.lat));
            location.lng = location.lng.or(Some(position.lng));
            tracing::debug!(location_id = %location.id, "filled start location from meeting point");
        }
    }

    if location.radius.is_none() {
        location.radius = Some(START_LOCATION_RADIUS);
    }
    if location.name.is_empty() {
        location.name = START_LABEL.to_owned();
    }
}
