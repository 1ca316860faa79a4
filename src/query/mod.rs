// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only derived views over a route document.
//!
//! Nothing here is cached: every call recomputes from the current document.

pub mod grouping;
pub mod markers;
pub mod unlock;

pub use grouping::{
    any_multi_location, counts_by_slot, grouped_placed_locations, is_multi_location,
    location_count, PlacedLocation,
};
pub use markers::{bounds, marker_label, marker_style, Bounds, MarkerStyle};
pub use unlock::{unlock_cycles, unlock_edges, UnlockEdge};
