// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Slot/location mutation helpers used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(doc: &mut RouteDocument, op: &Op, delta: &mut DeltaBuilder) -> Result<(), ApplyError> {
    match op {
        Op::AddSlot { slot } => add_slot(doc, slot, delta),
        Op::UpdateSlot { slot_id, patch } => update_slot(doc, slot_id, patch, delta),
        Op::RemoveSlot { slot_id } => remove_slot(doc, slot_id, delta),
        Op::AddLocation { location } => add_location(doc, location, delta),
        Op::UpdateLocation { location_id, patch } => {
            let Some(existing) = doc.location_mut(location_id) else {
                return Err(location_not_found(location_id));
            };
            apply_location_patch(existing, patch);
            delta.record_updated(EntityRef::Location(location_id.clone()));
            Ok(())
        }
        Op::RemoveLocation { location_id } => {
            let Some(index) = doc.locations.iter().position(|loc| &loc.id == location_id) else {
                return Err(location_not_found(location_id));
            };
            doc.locations.remove(index);
            delta.record_removed(EntityRef::Location(location_id.clone()));
            Ok(())
        }
    }
}

fn add_slot(
    doc: &mut RouteDocument,
    slot: &Slot,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    if doc.has_slot(&slot.id) {
        return Err(ApplyError::AlreadyExists {
            kind: EntityKind::Slot,
            id: slot.id.to_string(),
        });
    }
    doc.slots.push(slot.clone());
    delta.record_added(EntityRef::Slot(slot.id.clone()));
    Ok(())
}

fn update_slot(
    doc: &mut RouteDocument,
    slot_id: &SlotId,
    patch: &SlotPatch,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    let Some(existing) = doc.slot_mut(slot_id) else {
        return Err(slot_not_found(slot_id));
    };

    if let Some(label) = &patch.label {
        existing.label = label.clone();
    }
    if let Some(required) = patch.required {
        existing.required = required;
    }
    if let Some(unlock_after) = &patch.unlock_after {
        existing.unlock_after = unlock_after.clone();
    }
    if let Some(complete_mode) = &patch.complete_mode {
        existing.complete_mode = complete_mode.clone();
    }
    delta.record_updated(EntityRef::Slot(slot_id.clone()));
    Ok(())
}

fn remove_slot(
    doc: &mut RouteDocument,
    slot_id: &SlotId,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    if slot_id.is_start() {
        return Err(ApplyError::StartSlotRemoval);
    }
    let Some(index) = doc.slots.iter().position(|slot| &slot.id == slot_id) else {
        return Err(slot_not_found(slot_id));
    };
    doc.slots.remove(index);
    delta.record_removed(EntityRef::Slot(slot_id.clone()));
    Ok(())
}

fn add_location(
    doc: &mut RouteDocument,
    location: &Location,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    if doc.location(&location.id).is_some() {
        return Err(ApplyError::AlreadyExists {
            kind: EntityKind::Location,
            id: location.id.to_string(),
        });
    }
    doc.locations.push(location.clone());
    delta.record_added(EntityRef::Location(location.id.clone()));

    let bound_to_start = location.slot.as_ref().is_some_and(SlotId::is_start);
    if bound_to_start && doc.prestart.use_location_id.is_none() {
        doc.prestart.use_location_id = Some(location.id.clone());
        delta.record_updated(EntityRef::Prestart);
        tracing::info!(location_id = %location.id, "pre-start adopted new start location");
    }
    Ok(())
}

fn apply_location_patch(location: &mut Location, patch: &LocationPatch) {
    if let Some(slot) = &patch.slot {
        location.slot = slot.clone();
    }
    if let Some(name) = &patch.name {
        location.name = name.clone();
    }
    if let Some(lat) = patch.lat {
        location.lat = lat;
    }
    if let Some(lng) = patch.lng {
        location.lng = lng;
    }
    if let Some(radius) = patch.radius {
        location.radius = radius;
    }
    if let Some(images) = &patch.images {
        location.images = images.clone();
    }
    if let Some(route_hint) = &patch.route_hint {
        location.route_hint = route_hint.clone();
    }
    if let Some(explanation) = &patch.explanation {
        location.explanation = explanation.clone();
    }
    if let Some(questions) = &patch.questions {
        location.questions = questions.clone();
    }
}

fn slot_not_found(slot_id: &SlotId) -> ApplyError {
    ApplyError::NotFound {
        kind: EntityKind::Slot,
        id: slot_id.to_string(),
    }
}

fn location_not_found(location_id: &LocationId) -> ApplyError {
    ApplyError::NotFound {
        kind: EntityKind::Location,
        id: location_id.to_string(),
    }
}
