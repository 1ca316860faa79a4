// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use thiserror::Error;

/// Id of the reserved slot every route starts with.
pub const START_SLOT_ID: &str = "start";

/// Id of the conventional final slot (only used for marker styling).
pub const END_SLOT_ID: &str = "end";

/// Base id for start locations created by the pre-start synchronizer.
pub const START_LOCATION_ID_BASE: &str = "startloc";

/// A stable string key used as a foreign key between slots and locations.
///
/// Entities never hold references to each other, only these keys, so a key may
/// dangle after a deletion. The only invariant enforced here is non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self::from_generated(value))
    }

    /// Wraps a value the caller has already proven non-empty.
    pub(crate) fn from_generated(value: String) -> Self {
        debug_assert!(!value.is_empty());
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Parses an optional foreign key: empty text means "unset".
    pub fn optional(value: &str) -> Option<Self> {
        Self::new(value).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<T> PartialEq<str> for Id<T> {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl<T> PartialEq<&str> for Id<T> {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id must not be empty")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SlotIdTag {}
pub type SlotId = Id<SlotIdTag>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LocationIdTag {}
pub type LocationId = Id<LocationIdTag>;

impl Id<SlotIdTag> {
    pub fn start() -> Self {
        Self::from_generated(START_SLOT_ID.to_owned())
    }

    pub fn is_start(&self) -> bool {
        self.value == START_SLOT_ID
    }

    pub fn is_end(&self) -> bool {
        self.value == END_SLOT_ID
    }
}

/// Returns `prefix` followed by the smallest positive integer (zero-padded to two
/// digits) that is not already taken by `existing`.
///
/// The id is not reserved: insert it before allocating the next one.
pub fn allocate_id<'a, I>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    let mut n: u64 = 1;
    loop {
        let candidate = format!("{prefix}{n:02}");
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        n = n.saturating_add(1);
    }
}

/// Start-location naming: `startloc`, then `startloc2`, `startloc3`, ...
pub fn allocate_start_location_id<'a, I>(existing: I) -> LocationId
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: HashSet<&str> = existing.into_iter().collect();
    let mut candidate = START_LOCATION_ID_BASE.to_owned();
    let mut n: u64 = 1;
    while taken.contains(candidate.as_str()) {
        n = n.saturating_add(1);
        candidate = format!("{START_LOCATION_ID_BASE}{n}");
    }
    LocationId::from_generated(candidate)
}
