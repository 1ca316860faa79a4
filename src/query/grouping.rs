// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Slot occupancy, recomputed from the location list on every call.
//!
//! These functions are the single source of truth for "is this slot multi-location".

use std::collections::BTreeMap;

use crate::model::{LatLng, LocationId, RouteDocument, SlotId};

/// A located point as used for map drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLocation {
    pub id: LocationId,
    pub lat: f64,
    pub lng: f64,
}

impl PlacedLocation {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

/// Number of locations (placed or not) referencing each slot id.
///
/// Keys are whatever the locations reference, so dangling slot ids show up too.
pub fn counts_by_slot(doc: &RouteDocument) -> BTreeMap<SlotId, usize> {
    let mut counts: BTreeMap<SlotId, usize> = BTreeMap::new();
    for slot_id in doc.locations.iter().filter_map(|loc| loc.slot.as_ref()) {
        let count = counts.entry(slot_id.clone()).or_default();
        *count = count.saturating_add(1);
    }
    counts
}

/// Placed locations grouped by slot, in document order within each group.
pub fn grouped_placed_locations(doc: &RouteDocument) -> BTreeMap<SlotId, Vec<PlacedLocation>> {
    let mut groups: BTreeMap<SlotId, Vec<PlacedLocation>> = BTreeMap::new();
    for loc in &doc.locations {
        let Some(slot_id) = loc.slot.as_ref() else {
            continue;
        };
        let Some(position) = loc.position() else {
            continue;
        };
        groups
            .entry(slot_id.clone())
            .or_default()
            .push(PlacedLocation {
                id: loc.id.clone(),
                lat: position.lat,
                lng: position.lng,
            });
    }
    groups
}

pub fn location_count(doc: &RouteDocument, slot_id: &SlotId) -> usize {
    doc.locations
        .iter()
        .filter(|loc| loc.is_bound_to(slot_id))
        .count()
}

pub fn is_multi_location(doc: &RouteDocument, slot_id: &SlotId) -> bool {
    location_count(doc, slot_id) > 1
}

pub fn any_multi_location(counts: &BTreeMap<SlotId, usize>) -> bool {
    counts.values().any(|&count| count > 1)
}

#[cfg(test)]
mod tests {
    use super::{counts_by_slot, grouped_placed_locations, is_multi_location};
    use crate::model::fixtures::{placed, sid, two_stop_route, unplaced};
    use crate::model::{Location, RouteDocument};

    #[test]
    fn two_stop_route_groups_one_location_per_slot() {
        let doc = two_stop_route();

        let counts = counts_by_slot(&doc);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get(&sid("a")), Some(&1));
        assert_eq!(counts.get(&sid("b")), Some(&1));

        let groups = grouped_placed_locations(&doc);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&sid("a")][0].id.as_str(), "la");
        assert_eq!(groups[&sid("b")][0].id.as_str(), "lb");
        assert!(!is_multi_location(&doc, &sid("a")));
    }

    #[test]
    fn counts_include_unplaced_but_groups_do_not() {
        let mut doc = RouteDocument::empty();
        doc.locations.push(placed("l1", "stop01", 1.0, 1.0));
        doc.locations.push(unplaced("l2", "stop01"));
        doc.locations.push(placed("l3", "stop01", 2.0, 2.0));

        assert_eq!(counts_by_slot(&doc)[&sid("stop01")], 3);
        assert!(is_multi_location(&doc, &sid("stop01")));

        let group = &grouped_placed_locations(&doc)[&sid("stop01")];
        let ids: Vec<&str> = group.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["l1", "l3"]);
    }

    #[test]
    fn count_sum_matches_bound_locations() {
        let mut doc = two_stop_route();
        doc.locations.push(unplaced("l9", "ghost"));
        doc.locations.push(Location::new(
            crate::model::fixtures::lid("free"),
            None,
            "unbound",
        ));

        let total: usize = counts_by_slot(&doc).values().sum();
        let bound = doc.locations.iter().filter(|l| l.slot.is_some()).count();
        assert_eq!(total, bound);
        assert_eq!(total, 3);
    }
}
