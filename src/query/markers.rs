// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{LatLng, Location, RouteDocument, SlotId};

/// Legend class of a location marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerStyle {
    Start,
    End,
    Required { multi: bool },
    Optional { multi: bool },
}

impl MarkerStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Required { multi: false } => "required",
            Self::Required { multi: true } => "required_multi",
            Self::Optional { multi: false } => "optional",
            Self::Optional { multi: true } => "optional_multi",
        }
    }
}

/// Classifies a location for the map legend. Start/end slots win over required/optional.
///
/// `counts` is the output of [`super::counts_by_slot`] for the same document.
pub fn marker_style(
    doc: &RouteDocument,
    counts: &BTreeMap<SlotId, usize>,
    location: &Location,
) -> MarkerStyle {
    let Some(slot_id) = location.slot.as_ref() else {
        return MarkerStyle::Optional { multi: false };
    };
    if slot_id.is_start() {
        return MarkerStyle::Start;
    }
    if slot_id.is_end() {
        return MarkerStyle::End;
    }

    let multi = counts.get(slot_id).is_some_and(|&count| count > 1);
    if doc.is_slot_required(slot_id) {
        MarkerStyle::Required { multi }
    } else {
        MarkerStyle::Optional { multi }
    }
}

/// `"<id> • <slot>"`, with `" ×N"` appended for multi-location slots.
pub fn marker_label(counts: &BTreeMap<SlotId, usize>, location: &Location) -> String {
    let Some(slot_id) = location.slot.as_ref() else {
        return location.id.to_string();
    };
    match counts.get(slot_id).copied().unwrap_or(0) {
        n if n > 1 => format!("{} • {} ×{n}", location.id, slot_id),
        _ => format!("{} • {}", location.id, slot_id),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    fn around(point: LatLng) -> Self {
        Self {
            south_west: point,
            north_east: point,
        }
    }

    fn extend(&mut self, point: LatLng) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }
}

/// Box around the meeting point and every placed location, for fitting the map view.
pub fn bounds(doc: &RouteDocument) -> Option<Bounds> {
    let points = doc
        .prestart
        .meeting_point
        .position()
        .into_iter()
        .chain(doc.locations.iter().filter_map(Location::position));

    points.fold(None, |acc: Option<Bounds>, point| match acc {
        None => Some(Bounds::around(point)),
        Some(mut b) => {
            b.extend(point);
            Some(b)
        }
    })
}
