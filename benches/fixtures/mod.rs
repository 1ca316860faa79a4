// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use slotroute::model::{Location, LocationId, RouteDocument, Slot, SlotId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// 20 slots, 2 locations each.
    Small,
    /// 100 slots, 3 locations each, every fifth slot optional.
    Medium,
    /// 300 slots, 4 locations each, with a few dangling references mixed in.
    LargeMessy,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::LargeMessy => "large_messy",
        }
    }

    fn shape(self) -> (usize, usize) {
        match self {
            Self::Small => (20, 2),
            Self::Medium => (100, 3),
            Self::LargeMessy => (300, 4),
        }
    }
}

pub fn slot_id(idx: usize) -> SlotId {
    SlotId::new(format!("stop{:03}", idx + 1)).expect("slot id")
}

pub fn location_id(slot_idx: usize, loc_idx: usize) -> LocationId {
    LocationId::new(format!("loc{:03}_{loc_idx}", slot_idx + 1)).expect("location id")
}

/// A chain of slots, each unlocking after the previous one, with locations spread on a grid.
pub fn route(case: Case) -> RouteDocument {
    let (slots, per_slot) = case.shape();
    let mut doc = RouteDocument::new();

    let mut previous = SlotId::start();
    for slot_idx in 0..slots {
        let id = slot_id(slot_idx);
        let required = case == Case::Small || slot_idx % 5 != 4;
        doc.slots.push(
            Slot::new(id.clone(), format!("Stop {}", slot_idx + 1), required)
                .with_unlock_after(previous.clone()),
        );

        for loc_idx in 0..per_slot {
            let lat = 51.0 + (slot_idx as f64) * 0.001;
            let lng = 4.0 + (loc_idx as f64) * 0.001;
            let mut location =
                Location::new(location_id(slot_idx, loc_idx), Some(id.clone()), "bench")
                    .at(lat, lng)
                    .with_radius(30.0 + loc_idx as f64);
            if case == Case::LargeMessy && slot_idx % 37 == 0 {
                location.slot = SlotId::new(format!("ghost{slot_idx}")).ok();
            }
            doc.locations.push(location);
        }
        previous = id;
    }

    if case == Case::LargeMessy {
        let dup = doc.slots[10].clone();
        doc.slots.push(dup);
    }
    doc
}
