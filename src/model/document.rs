// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{LocationId, SlotId};
use super::location::{LatLng, Location};
use super::modes::{Choice, MultiLocationMode, VisibilityMode};
use super::slot::Slot;

/// Fallback coordinate used whenever a start location has to be fabricated
/// from an unset meeting point.
pub const DEFAULT_COORDINATE: LatLng = LatLng {
    lat: 51.220418,
    lng: 4.440854,
};

pub const DEFAULT_TITLE: &str = "New route";
pub const IMPORTED_TITLE: &str = "(import)";
pub const DEFAULT_VERSION: &str = "1.0";
pub const DEFAULT_MEETING_LABEL: &str = "At the front door";
pub const DEFAULT_PRESTART_MESSAGE: &str =
    "Not at the starting point yet. Go to the start location to begin.";
pub const DEFAULT_MAPS_LABEL: &str = "Route to the starting point";
pub const DEFAULT_CHARACTERS_SOURCE: &str = "characters.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meta {
    pub title: String,
    pub subtitle: String,
    pub version: String,
    /// Optional character roster; dropped from export when absent.
    pub characters: Option<Characters>,
}

impl Meta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: String::new(),
            version: DEFAULT_VERSION.to_owned(),
            characters: None,
        }
    }
}

impl Default for Meta {
    fn default() -> Self {
        Self::titled(DEFAULT_TITLE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Characters {
    pub enabled: bool,
    pub source: String,
}

impl Default for Characters {
    fn default() -> Self {
        Self {
            enabled: true,
            source: DEFAULT_CHARACTERS_SOURCE.to_owned(),
        }
    }
}

/// Presentation settings. Mode values are validated against their closed sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub visibility_mode: Option<Choice<VisibilityMode>>,
    pub multi_location_slot_mode: Option<Choice<MultiLocationMode>>,
    pub show_optional_slots: bool,
    pub list_show_future_slots: bool,
    pub map_show_future_locations: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            visibility_mode: Some(Choice::Known(VisibilityMode::NextOnly)),
            multi_location_slot_mode: Some(Choice::Known(MultiLocationMode::All)),
            show_optional_slots: true,
            list_show_future_slots: true,
            map_show_future_locations: false,
        }
    }
}

/// Denormalised copy of the start location's position; not authoritative.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeetingPoint {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub label: String,
}

impl MeetingPoint {
    pub fn position(&self) -> Option<LatLng> {
        Some(LatLng::new(self.lat?, self.lng?))
    }

    pub fn has_any_coordinate(&self) -> bool {
        self.lat.is_some() || self.lng.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapsLink {
    pub label: String,
}

/// What the player sees before the route formally begins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Prestart {
    pub use_location_id: Option<LocationId>,
    pub meeting_point: MeetingPoint,
    pub message: String,
    pub maps: MapsLink,
    pub images: Vec<String>,
}

impl Prestart {
    /// The editor's initial pre-start: a labelled meeting point, no start location yet.
    pub fn editor_default() -> Self {
        Self {
            use_location_id: None,
            meeting_point: MeetingPoint {
                lat: Some(DEFAULT_COORDINATE.lat),
                lng: Some(DEFAULT_COORDINATE.lng),
                label: DEFAULT_MEETING_LABEL.to_owned(),
            },
            message: DEFAULT_PRESTART_MESSAGE.to_owned(),
            maps: MapsLink {
                label: DEFAULT_MAPS_LABEL.to_owned(),
            },
            images: Vec::new(),
        }
    }

    /// Whether anything has been set up that a start slot/location should back.
    pub fn is_configured(&self) -> bool {
        self.use_location_id.is_some() || self.meeting_point.has_any_coordinate()
    }
}

/// The whole route definition, owned by the editing session.
///
/// Slots and locations refer to each other only through ids. Order matters:
/// `slots` is the presentation order and `locations` keeps insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteDocument {
    pub meta: Meta,
    pub settings: Settings,
    pub prestart: Prestart,
    pub slots: Vec<Slot>,
    pub locations: Vec<Location>,
}

impl RouteDocument {
    /// A fresh document as the editor creates it.
    pub fn new() -> Self {
        Self {
            meta: Meta::default(),
            settings: Settings::default(),
            prestart: Prestart::editor_default(),
            slots: vec![Slot::start()],
            locations: Vec::new(),
        }
    }

    /// Only the `start` slot and an unconfigured pre-start.
    pub fn empty() -> Self {
        Self {
            prestart: Prestart::default(),
            ..Self::new()
        }
    }

    /// First slot with this id.
    pub fn slot(&self, slot_id: &SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| &slot.id == slot_id)
    }

    pub fn slot_mut(&mut self, slot_id: &SlotId) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|slot| &slot.id == slot_id)
    }

    /// First location with this id.
    pub fn location(&self, location_id: &LocationId) -> Option<&Location> {
        self.locations.iter().find(|loc| &loc.id == location_id)
    }

    pub fn location_mut(&mut self, location_id: &LocationId) -> Option<&mut Location> {
        self.locations.iter_mut().find(|loc| &loc.id == location_id)
    }

    pub fn has_slot(&self, slot_id: &SlotId) -> bool {
        self.slot(slot_id).is_some()
    }

    pub fn has_start_slot(&self) -> bool {
        self.slots.iter().any(Slot::is_start)
    }

    pub fn is_slot_required(&self, slot_id: &SlotId) -> bool {
        self.slot(slot_id).is_some_and(|slot| slot.required)
    }

    pub fn slot_ids(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|slot| slot.id.as_str())
    }

    pub fn location_ids(&self) -> impl Iterator<Item = &str> {
        self.locations.iter().map(|loc| loc.id.as_str())
    }

    /// First location bound to the `start` slot.
    pub fn first_start_location(&self) -> Option<&Location> {
        self.locations
            .iter()
            .find(|loc| loc.slot.as_ref().is_some_and(SlotId::is_start))
    }
}

impl Default for RouteDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document whose top-level sections may be missing.
///
/// Turned into a [`RouteDocument`] by `sync::fill_missing_sections`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartialDocument {
    pub meta: Option<Meta>,
    pub settings: Option<Settings>,
    pub prestart: Option<Prestart>,
    pub slots: Option<Vec<Slot>>,
    pub locations: Option<Vec<Location>>,
}

impl From<RouteDocument> for PartialDocument {
    fn from(doc: RouteDocument) -> Self {
        Self {
            meta: Some(doc.meta),
            settings: Some(doc.settings),
            prestart: Some(doc.prestart),
            slots: Some(doc.slots),
            locations: Some(doc.locations),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RouteDocument;
    use crate::model::{Location, LocationId, SlotId};

    #[test]
    fn new_document_has_only_the_start_slot() {
        let doc = RouteDocument::new();
        assert_eq!(doc.slots.len(), 1);
        assert!(doc.has_start_slot());
        assert!(doc.slots[0].required);
        assert!(doc.prestart.is_configured());
        assert!(!RouteDocument::empty().prestart.is_configured());
    }

    #[test]
    fn resolvers_return_first_match_and_tolerate_dangling_keys() {
        let mut doc = RouteDocument::new();
        let id = LocationId::new("loc01").expect("location id");
        doc.locations
            .push(Location::new(id.clone(), Some(SlotId::start()), "first"));
        doc.locations
            .push(Location::new(id.clone(), Some(SlotId::start()), "second"));

        assert_eq!(doc.location(&id).map(|loc| loc.name.as_str()), Some("first"));
        let missing = SlotId::new("nowhere").expect("slot id");
        assert!(doc.slot(&missing).is_none());
        assert!(!doc.is_slot_required(&missing));
        assert_eq!(
            doc.first_start_location().map(|loc| loc.name.as_str()),
            Some("first")
        );
    }
}
