// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{LocationId, SlotId};

/// Smallest radius (meters) that is not flagged as suspicious.
pub const MIN_SOFT_RADIUS: f64 = 10.0;
/// Largest radius (meters) that is not flagged as suspicious.
pub const MAX_SOFT_RADIUS: f64 = 1000.0;
/// Radius given to start locations created by the synchronizer.
pub const START_LOCATION_RADIUS: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Short and long explanation shown to the player at a location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Explanation {
    pub short: String,
    pub long: String,
}

/// A physical point of interest, bound to at most one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: LocationId,
    pub slot: Option<SlotId>,
    pub name: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
    pub images: Vec<String>,
    pub route_hint: String,
    pub explanation: Explanation,
    pub questions: Vec<String>,
}

impl Location {
    pub fn new(id: LocationId, slot: Option<SlotId>, name: impl Into<String>) -> Self {
        Self {
            id,
            slot,
            name: name.into(),
            lat: None,
            lng: None,
            radius: None,
            images: Vec::new(),
            route_hint: String::new(),
            explanation: Explanation::default(),
            questions: Vec::new(),
        }
    }

    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    /// Both coordinates, if the location has been placed on the map.
    pub fn position(&self) -> Option<LatLng> {
        Some(LatLng::new(self.lat?, self.lng?))
    }

    pub fn is_placed(&self) -> bool {
        self.position().is_some()
    }

    pub fn is_bound_to(&self, slot_id: &SlotId) -> bool {
        self.slot.as_ref() == Some(slot_id)
    }
}
