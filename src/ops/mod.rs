// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Edit operations on a route session.
//!
//! Operations are applied with optimistic concurrency (revision checks) to a working copy of the
//! document and produce a minimal delta that a UI can use to refresh derived state. Removal
//! never cascades: slots and locations may be left pointing at ids that no longer exist, and
//! it is the validator's job to report them.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::model::{
    allocate_id, Choice, CompleteMode, Explanation, Location, LocationId, RouteDocument, Slot,
    SlotId,
};
use crate::session::RouteSession;

pub const SLOT_ID_PREFIX: &str = "stop";
pub const LOCATION_ID_PREFIX: &str = "loc";

/// Radius of a new location when the document has no previous location to copy it from.
pub const DEFAULT_NEW_LOCATION_RADIUS: f64 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    AddSlot { slot: Slot },
    UpdateSlot { slot_id: SlotId, patch: SlotPatch },
    RemoveSlot { slot_id: SlotId },
    AddLocation { location: Location },
    UpdateLocation {
        location_id: LocationId,
        patch: LocationPatch,
    },
    RemoveLocation { location_id: LocationId },
}

/// Field edits for a slot. `None` leaves a field as is; for optional fields
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotPatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub unlock_after: Option<Option<SlotId>>,
    pub complete_mode: Option<Option<Choice<CompleteMode>>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPatch {
    pub slot: Option<Option<SlotId>>,
    pub name: Option<String>,
    pub lat: Option<Option<f64>>,
    pub lng: Option<Option<f64>>,
    pub radius: Option<Option<f64>>,
    pub images: Option<Vec<String>>,
    pub route_hint: Option<String>,
    pub explanation: Option<Explanation>,
    pub questions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// What a batch of ops touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Slot,
    Location,
    Prestart,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityRef {
    Slot(SlotId),
    Location(LocationId),
    Prestart,
}

impl EntityRef {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Slot(_) => EntityKind::Slot,
            Self::Location(_) => EntityKind::Location,
            Self::Prestart => EntityKind::Prestart,
        }
    }
}

/// Minimal delta describing which entities changed as the result of applying ops.
///
/// Coarse on purpose: it reports only added/removed/updated entity refs, sorted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<EntityRef>,
    pub removed: Vec<EntityRef>,
    pub updated: Vec<EntityRef>,
}

impl Delta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: BTreeSet<EntityRef>,
    removed: BTreeSet<EntityRef>,
    updated: BTreeSet<EntityRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, entity: EntityRef) {
        self.updated.remove(&entity);
        // remove-then-add of the same id within one batch is a replacement
        if self.removed.remove(&entity) {
            self.updated.insert(entity);
            return;
        }
        self.added.insert(entity);
    }

    fn record_removed(&mut self, entity: EntityRef) {
        self.updated.remove(&entity);
        if self.added.remove(&entity) {
            return;
        }
        self.removed.insert(entity);
    }

    fn record_updated(&mut self, entity: EntityRef) {
        if self.added.contains(&entity) || self.removed.contains(&entity) {
            return;
        }
        self.updated.insert(entity);
    }

    fn finish(self) -> Delta {
        Delta {
            added: self.added.into_iter().collect(),
            removed: self.removed.into_iter().collect(),
            updated: self.updated.into_iter().collect(),
        }
    }
}

/// Applies `ops` in order to a copy of the session document.
///
/// Either every op applies and the revision is bumped once, or the first failing op is
/// reported and the session is left untouched.
pub fn apply_ops(
    session: &mut RouteSession,
    base_rev: u64,
    ops: &[Op],
) -> Result<ApplyResult, ApplyError> {
    let current_rev = session.rev();
    if base_rev != current_rev {
        return Err(ApplyError::Conflict {
            base_rev,
            current_rev,
        });
    }

    if ops.is_empty() {
        return Ok(ApplyResult {
            new_rev: current_rev,
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut doc = session.document().clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        apply_op(&mut doc, op, &mut delta)?;
    }

    let new_rev = session.replace_document(doc);
    let delta = delta.finish();
    tracing::debug!(
        new_rev,
        applied = ops.len(),
        added = delta.added.len(),
        removed = delta.removed.len(),
        updated = delta.updated.len(),
        "applied ops"
    );

    Ok(ApplyResult {
        new_rev,
        applied: ops.len(),
        delta,
    })
}

/// Next free `stopNN` id.
pub fn next_slot_id(doc: &RouteDocument) -> SlotId {
    SlotId::from_generated(allocate_id(SLOT_ID_PREFIX, doc.slot_ids()))
}

/// Next free `locNN` id.
pub fn next_location_id(doc: &RouteDocument) -> LocationId {
    LocationId::from_generated(allocate_id(LOCATION_ID_PREFIX, doc.location_ids()))
}

/// The slot the editor's "add slot" action creates: a fresh `stopNN`, labelled with its id,
/// required, and unlocking after the last required slot (if any).
pub fn new_slot(doc: &RouteDocument) -> Slot {
    let slot_id = next_slot_id(doc);
    let label = slot_id.as_str().to_owned();
    let slot = Slot::new(slot_id, label, true);
    match doc.slots.iter().rev().find(|slot| slot.required) {
        Some(previous) => slot.with_unlock_after(previous.id.clone()),
        None => slot,
    }
}

/// The location the editor's "add location" action creates at `lat`/`lng`: a fresh `locNN`
/// named after its id, bound to the last slot (or `start`), reusing the last location's radius.
///
/// Adding it with [`Op::AddLocation`] makes the pre-start adopt it when the pre-start has no
/// location yet and it is bound to `start`.
pub fn new_location(doc: &RouteDocument, lat: f64, lng: f64) -> Location {
    let location_id = next_location_id(doc);
    let slot_id = doc
        .slots
        .last()
        .map(|slot| slot.id.clone())
        .unwrap_or_else(SlotId::start);
    let radius = doc
        .locations
        .last()
        .and_then(|loc| loc.radius)
        .filter(|radius| radius.is_finite())
        .unwrap_or(DEFAULT_NEW_LOCATION_RADIUS);
    let name = location_id.as_str().to_owned();

    Location::new(location_id, Some(slot_id), name)
        .at(lat, lng)
        .with_radius(radius)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    #[error("stale base_rev (base_rev={base_rev}, current_rev={current_rev})")]
    Conflict { base_rev: u64, current_rev: u64 },
    #[error("{kind:?} already exists (id={id})")]
    AlreadyExists { kind: EntityKind, id: String },
    #[error("{kind:?} not found (id={id})")]
    NotFound { kind: EntityKind, id: String },
    #[error("the start slot cannot be removed")]
    StartSlotRemoval,
}

// Slot/location mutation helpers used by `apply_ops`.
include!("ops_impl.rs");

#[cfg(test)]
mod tests;
