// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Consistency checks over a whole route document.
//!
//! `validate` is total: it never fails, never stops at the first problem, and
//! always runs a fresh full pass. Structural problems (duplicate ids, dangling keys,
//! unlock loops, unknown enum values) are errors; suspicious but consistent content
//! is a warning.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::model::{
    CompleteMode, LocationId, MultiLocationMode, RouteDocument, SlotId, VisibilityMode,
    MAX_SOFT_RADIUS, MIN_SOFT_RADIUS,
};
use crate::model::{Choice, Mode};
use crate::query::{any_multi_location, counts_by_slot, unlock_cycles};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Error,
    Warning,
    Ok,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Ok => "ok",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Finding {
    UnknownMode { field: &'static str, value: String },
    UnknownCompleteMode { slot_id: SlotId, value: String },
    DuplicateSlotId { slot_id: SlotId },
    UnknownUnlockTarget { slot_id: SlotId, target: SlotId },
    SelfUnlock { slot_id: SlotId },
    UnlockCycle { slot_ids: Vec<SlotId> },
    DuplicateLocationId { location_id: LocationId },
    MissingPosition { location_id: LocationId },
    UnknownSlotReference { location_id: LocationId, slot_id: SlotId },
    RadiusTooSmall { location_id: LocationId, radius: f64 },
    RadiusTooLarge { location_id: LocationId, radius: f64 },
    AllAfterStartWithoutStartSlot,
    RequiredSlotWithoutLocations { slot_id: SlotId },
    RandomModeWithoutChoice { slot_id: SlotId, count: usize },
    MultiLocationModeWithoutEffect { mode: String },
    UnknownPrestartLocation { location_id: LocationId },
    PrestartNotSynced,
    NoBlockingErrors,
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnknownMode { .. }
            | Self::UnknownCompleteMode { .. }
            | Self::DuplicateSlotId { .. }
            | Self::UnknownUnlockTarget { .. }
            | Self::SelfUnlock { .. }
            | Self::UnlockCycle { .. }
            | Self::DuplicateLocationId { .. }
            | Self::MissingPosition { .. }
            | Self::UnknownSlotReference { .. } => Severity::Error,
            Self::RadiusTooSmall { .. }
            | Self::RadiusTooLarge { .. }
            | Self::AllAfterStartWithoutStartSlot
            | Self::RequiredSlotWithoutLocations { .. }
            | Self::RandomModeWithoutChoice { .. }
            | Self::MultiLocationModeWithoutEffect { .. }
            | Self::UnknownPrestartLocation { .. }
            | Self::PrestartNotSynced => Severity::Warning,
            Self::NoBlockingErrors => Severity::Ok,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownMode { field, value } => write!(f, "{field} unknown: {value}"),
            Self::UnknownCompleteMode { slot_id, value } => {
                write!(f, "slot {slot_id} completeMode unknown: {value}")
            }
            Self::DuplicateSlotId { slot_id } => write!(f, "duplicate slot id: {slot_id}"),
            Self::UnknownUnlockTarget { slot_id, target } => {
                write!(f, "slot {slot_id} unlockAfterSlot does not exist: {target}")
            }
            Self::SelfUnlock { slot_id } => {
                write!(f, "slot {slot_id} unlockAfterSlot refers to itself")
            }
            Self::UnlockCycle { slot_ids } => {
                f.write_str("unlockAfterSlot cycle between slots: ")?;
                for (i, slot_id) in slot_ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(slot_id.as_str())?;
                }
                Ok(())
            }
            Self::DuplicateLocationId { location_id } => {
                write!(f, "duplicate location id: {location_id}")
            }
            Self::MissingPosition { location_id } => {
                write!(f, "location without lat/lng: {location_id}")
            }
            Self::UnknownSlotReference {
                location_id,
                slot_id,
            } => write!(f, "location {location_id} refers to unknown slot: {slot_id}"),
            Self::RadiusTooSmall { location_id, radius } => write!(
                f,
                "radius < {MIN_SOFT_RADIUS}m at location {location_id} ({radius}m)"
            ),
            Self::RadiusTooLarge { location_id, radius } => write!(
                f,
                "radius > {MAX_SOFT_RADIUS}m at location {location_id} ({radius}m)"
            ),
            Self::AllAfterStartWithoutStartSlot => {
                f.write_str("visibilityMode=allAfterStart but slot \"start\" does not exist")
            }
            Self::RequiredSlotWithoutLocations { slot_id } => {
                write!(f, "required slot without locations: {slot_id}")
            }
            Self::RandomModeWithoutChoice { slot_id, count } => write!(
                f,
                "completeMode=random but slot {slot_id} has only {count} location(s)"
            ),
            Self::MultiLocationModeWithoutEffect { mode } => write!(
                f,
                "multiLocationSlotMode={mode} but no slot has more than one location"
            ),
            Self::UnknownPrestartLocation { location_id } => write!(
                f,
                "prestart.useLocationId refers to a location that does not exist ({location_id})"
            ),
            Self::PrestartNotSynced => f.write_str(
                "prestart is configured without a matching start slot and start location; run sync",
            ),
            Self::NoBlockingErrors => f.write_str("no blocking errors found"),
        }
    }
}

/// Findings of one validation pass, split by severity, each in check order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub oks: Vec<Finding>,
}

impl ValidationReport {
    fn push(&mut self, finding: Finding) {
        match finding.severity() {
            Severity::Error => self.errors.push(finding),
            Severity::Warning => self.warnings.push(finding),
            Severity::Ok => self.oks.push(finding),
        }
    }

    /// No errors; warnings do not block publishing.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.oks.iter())
    }

    pub fn messages(&self, severity: Severity) -> Vec<String> {
        let findings = match severity {
            Severity::Error => &self.errors,
            Severity::Warning => &self.warnings,
            Severity::Ok => &self.oks,
        };
        findings.iter().map(ToString::to_string).collect()
    }
}

pub fn validate(doc: &RouteDocument) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_modes(doc, &mut report);
    let slot_ids = check_slot_identity(doc, &mut report);
    check_slot_edges(doc, &slot_ids, &mut report);
    let location_ids = check_locations(doc, &mut report);
    check_location_slots(doc, &slot_ids, &mut report);

    let counts = counts_by_slot(doc);
    check_slot_coverage(doc, &slot_ids, &counts, &mut report);
    check_multi_location_mode(doc, &counts, &mut report);
    check_prestart(doc, &slot_ids, &location_ids, &mut report);

    if report.errors.is_empty() {
        report.push(Finding::NoBlockingErrors);
    }

    tracing::debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "validated route document"
    );
    report
}

fn unknown_mode<T: Mode>(choice: Option<&Choice<T>>) -> Option<Finding> {
    match choice? {
        Choice::Known(_) => None,
        Choice::Unknown(value) => Some(Finding::UnknownMode {
            field: T::FIELD,
            value: value.clone(),
        }),
    }
}

fn check_modes(doc: &RouteDocument, report: &mut ValidationReport) {
    let settings = &doc.settings;
    if let Some(finding) = unknown_mode::<VisibilityMode>(settings.visibility_mode.as_ref()) {
        report.push(finding);
    }
    if let Some(finding) =
        unknown_mode::<MultiLocationMode>(settings.multi_location_slot_mode.as_ref())
    {
        report.push(finding);
    }

    for slot in &doc.slots {
        if let Some(Choice::Unknown(value)) = &slot.complete_mode {
            report.push(Finding::UnknownCompleteMode {
                slot_id: slot.id.clone(),
                value: value.clone(),
            });
        }
    }
}

/// Unique slot ids in document order.
struct SlotIndex<'a> {
    ordered: Vec<&'a SlotId>,
    known: BTreeSet<&'a SlotId>,
}

impl SlotIndex<'_> {
    fn contains(&self, slot_id: &SlotId) -> bool {
        self.known.contains(slot_id)
    }

    fn has_start(&self) -> bool {
        self.known.iter().any(|slot_id| slot_id.is_start())
    }
}

fn check_slot_identity<'a>(doc: &'a RouteDocument, report: &mut ValidationReport) -> SlotIndex<'a> {
    let mut index = SlotIndex {
        ordered: Vec::new(),
        known: BTreeSet::new(),
    };
    for slot in &doc.slots {
        if index.known.insert(&slot.id) {
            index.ordered.push(&slot.id);
        } else {
            report.push(Finding::DuplicateSlotId {
                slot_id: slot.id.clone(),
            });
        }
    }
    index
}

// Runs after every slot id is known: forward references are legal.
fn check_slot_edges(doc: &RouteDocument, slots: &SlotIndex<'_>, report: &mut ValidationReport) {
    for slot in &doc.slots {
        let Some(target) = slot.unlock_after.as_ref() else {
            continue;
        };
        if !slots.contains(target) {
            report.push(Finding::UnknownUnlockTarget {
                slot_id: slot.id.clone(),
                target: target.clone(),
            });
        }
        if slot.unlocks_after_itself() {
            report.push(Finding::SelfUnlock {
                slot_id: slot.id.clone(),
            });
        }
    }

    for slot_ids in unlock_cycles(doc) {
        report.push(Finding::UnlockCycle { slot_ids });
    }
}

fn check_locations<'a>(
    doc: &'a RouteDocument,
    report: &mut ValidationReport,
) -> BTreeSet<&'a LocationId> {
    let mut seen: BTreeSet<&LocationId> = BTreeSet::new();
    for loc in &doc.locations {
        if !seen.insert(&loc.id) {
            report.push(Finding::DuplicateLocationId {
                location_id: loc.id.clone(),
            });
        }
        if !loc.is_placed() {
            report.push(Finding::MissingPosition {
                location_id: loc.id.clone(),
            });
        }
        match loc.radius {
            Some(radius) if radius < MIN_SOFT_RADIUS => report.push(Finding::RadiusTooSmall {
                location_id: loc.id.clone(),
                radius,
            }),
            Some(radius) if radius > MAX_SOFT_RADIUS => report.push(Finding::RadiusTooLarge {
                location_id: loc.id.clone(),
                radius,
            }),
            _ => {}
        }
    }
    seen
}

fn check_location_slots(doc: &RouteDocument, slots: &SlotIndex<'_>, report: &mut ValidationReport) {
    for loc in &doc.locations {
        let Some(slot_id) = loc.slot.as_ref() else {
            continue;
        };
        if !slots.contains(slot_id) {
            report.push(Finding::UnknownSlotReference {
                location_id: loc.id.clone(),
                slot_id: slot_id.clone(),
            });
        }
    }
}

fn check_slot_coverage(
    doc: &RouteDocument,
    slots: &SlotIndex<'_>,
    counts: &BTreeMap<SlotId, usize>,
    report: &mut ValidationReport,
) {
    if doc
        .settings
        .visibility_mode
        .as_ref()
        .is_some_and(|mode| mode.is(VisibilityMode::AllAfterStart))
        && !slots.has_start()
    {
        report.push(Finding::AllAfterStartWithoutStartSlot);
    }

    for &slot_id in &slots.ordered {
        let Some(slot) = doc.slot(slot_id) else {
            continue;
        };
        let count = counts.get(slot_id).copied().unwrap_or(0);
        if slot.required && count == 0 {
            report.push(Finding::RequiredSlotWithoutLocations {
                slot_id: slot_id.clone(),
            });
        }
        let is_random = slot
            .complete_mode
            .as_ref()
            .is_some_and(|mode| mode.is(CompleteMode::Random));
        if is_random && count <= 1 {
            report.push(Finding::RandomModeWithoutChoice {
                slot_id: slot_id.clone(),
                count,
            });
        }
    }
}

fn check_multi_location_mode(
    doc: &RouteDocument,
    counts: &BTreeMap<SlotId, usize>,
    report: &mut ValidationReport,
) {
    let Some(mode) = doc.settings.multi_location_slot_mode.as_ref() else {
        return;
    };
    if mode.is(MultiLocationMode::All) {
        return;
    }
    if !any_multi_location(counts) {
        report.push(Finding::MultiLocationModeWithoutEffect {
            mode: mode.as_str().to_owned(),
        });
    }
}

fn check_prestart(
    doc: &RouteDocument,
    slots: &SlotIndex<'_>,
    locations: &BTreeSet<&LocationId>,
    report: &mut ValidationReport,
) {
    let prestart = &doc.prestart;
    if let Some(location_id) = prestart.use_location_id.as_ref() {
        if !locations.contains(location_id) {
            report.push(Finding::UnknownPrestartLocation {
                location_id: location_id.clone(),
            });
        }
    }

    if !prestart.is_configured() {
        return;
    }
    let has_start_location = doc.first_start_location().is_some();
    if prestart.use_location_id.is_none() || !slots.has_start() || !has_start_location {
        report.push(Finding::PrestartNotSynced);
    }
}
