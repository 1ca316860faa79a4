// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A route document holds an ordered list of slots (overlaid with `unlock_after` edges), the
//! locations bound to them, presentation settings and the pre-start configuration.

pub mod document;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod location;
pub mod modes;
pub mod slot;

pub use document::{
    Characters, MapsLink, MeetingPoint, Meta, PartialDocument, Prestart, RouteDocument, Settings,
    DEFAULT_COORDINATE, IMPORTED_TITLE,
};
pub use ids::{
    allocate_id, allocate_start_location_id, Id, IdError, LocationId, SlotId, END_SLOT_ID,
    START_SLOT_ID,
};
pub use location::{
    Explanation, LatLng, Location, MAX_SOFT_RADIUS, MIN_SOFT_RADIUS, START_LOCATION_RADIUS,
};
pub use modes::{Choice, CompleteMode, Mode, MultiLocationMode, ParseModeError, VisibilityMode};
pub use slot::Slot;
