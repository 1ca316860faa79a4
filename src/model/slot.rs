// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::SlotId;
use super::modes::{Choice, CompleteMode};

/// One stage of the route.
///
/// `unlock_after` is a directed edge to the prerequisite slot. It is kept as a key
/// and may dangle; the validator reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub id: SlotId,
    pub label: String,
    pub required: bool,
    pub unlock_after: Option<SlotId>,
    pub complete_mode: Option<Choice<CompleteMode>>,
}

impl Slot {
    pub fn new(id: SlotId, label: impl Into<String>, required: bool) -> Self {
        Self {
            id,
            label: label.into(),
            required,
            unlock_after: None,
            complete_mode: None,
        }
    }

    /// The reserved first slot.
    pub fn start() -> Self {
        Self::new(SlotId::start(), "Start", true)
    }

    pub fn with_unlock_after(mut self, unlock_after: SlotId) -> Self {
        self.unlock_after = Some(unlock_after);
        self
    }

    pub fn with_complete_mode(mut self, mode: impl Into<Choice<CompleteMode>>) -> Self {
        self.complete_mode = Some(mode.into());
        self
    }

    pub fn is_start(&self) -> bool {
        self.id.is_start()
    }

    pub fn unlocks_after_itself(&self) -> bool {
        self.unlock_after.as_ref() == Some(&self.id)
    }
}
