// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use crate::model::{RouteDocument, SlotId};

use super::grouping::{grouped_placed_locations, PlacedLocation};

/// One drawable arrow between a prerequisite location and an unlocked location.
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockEdge {
    pub from_slot: SlotId,
    pub to_slot: SlotId,
    pub from: PlacedLocation,
    pub to: PlacedLocation,
    /// Whether the unlocked slot is required (solid vs. dashed arrow).
    pub to_required: bool,
}

/// Expands every `unlock_after` edge into location-to-location edges.
///
/// Multi-location slots fan out: every placed location of the prerequisite slot
/// connects to every placed location of the unlocked slot. Slots without placed
/// locations on either end contribute nothing.
pub fn unlock_edges(doc: &RouteDocument) -> Vec<UnlockEdge> {
    let by_slot = grouped_placed_locations(doc);
    let mut edges = Vec::new();

    for slot in &doc.slots {
        let Some(from_slot) = slot.unlock_after.as_ref() else {
            continue;
        };
        let (Some(from_points), Some(to_points)) = (by_slot.get(from_slot), by_slot.get(&slot.id))
        else {
            continue;
        };
        let to_required = doc.is_slot_required(&slot.id);

        for from in from_points {
            for to in to_points {
                edges.push(UnlockEdge {
                    from_slot: from_slot.clone(),
                    to_slot: slot.id.clone(),
                    from: from.clone(),
                    to: to.clone(),
                    to_required,
                });
            }
        }
    }

    edges
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    /// On the walk that is in progress, at this position.
    OnPath(usize),
    Done,
}

/// Unlock cycles through two or more slots, each sorted, in deterministic order.
///
/// Every slot has at most one prerequisite, so following `unlock_after` from any slot either
/// ends or runs into a loop. Direct self-loops and prerequisites that are not slots are left
/// out. With duplicate ids the first slot wins, like [`RouteDocument::slot`].
pub fn unlock_cycles(doc: &RouteDocument) -> Vec<Vec<SlotId>> {
    let mut prerequisite: BTreeMap<&SlotId, Option<&SlotId>> = BTreeMap::new();
    for slot in &doc.slots {
        prerequisite
            .entry(&slot.id)
            .or_insert(slot.unlock_after.as_ref());
    }

    let mut visits: BTreeMap<&SlotId, Visit> = BTreeMap::new();
    let mut cycles: Vec<Vec<SlotId>> = Vec::new();

    for &origin in prerequisite.keys() {
        let mut path: Vec<&SlotId> = Vec::new();
        let mut current = Some(origin);

        while let Some(slot_id) = current {
            match visits.get(slot_id) {
                Some(Visit::Done) => break,
                Some(Visit::OnPath(at)) => {
                    let mut cycle: Vec<SlotId> =
                        path[*at..].iter().map(|&id| id.clone()).collect();
                    if cycle.len() > 1 {
                        cycle.sort();
                        cycles.push(cycle);
                    }
                    break;
                }
                None => {
                    visits.insert(slot_id, Visit::OnPath(path.len()));
                    path.push(slot_id);
                    current = prerequisite
                        .get(slot_id)
                        .copied()
                        .flatten()
                        .filter(|next| prerequisite.contains_key(next));
                }
            }
        }

        for slot_id in path {
            visits.insert(slot_id, Visit::Done);
        }
    }

    cycles.sort();
    cycles
}
