// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A closed enumeration with a canonical wire spelling.
pub trait Mode: Copy + Eq + fmt::Debug + 'static {
    /// Human-readable field name used in error messages.
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn parse_mode(raw: &str) -> Result<Self, ParseModeError> {
        Self::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == raw)
            .ok_or_else(|| ParseModeError {
                field: Self::FIELD,
                value: raw.to_owned(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field}: {value:?}")]
pub struct ParseModeError {
    pub field: &'static str,
    pub value: String,
}

/// A mode value as it was written in the document.
///
/// Unknown spellings are kept verbatim so the validator can report them and
/// export can write them back unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Known(T),
    Unknown(String),
}

impl<T: Mode> Choice<T> {
    pub fn parse(raw: &str) -> Self {
        match T::parse_mode(raw) {
            Ok(mode) => Self::Known(mode),
            Err(_) => Self::Unknown(raw.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(mode) => mode.as_str(),
            Self::Unknown(raw) => raw,
        }
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(mode) => Some(*mode),
            Self::Unknown(_) => None,
        }
    }

    pub fn is(&self, mode: T) -> bool {
        self.known() == Some(mode)
    }
}

impl<T: Mode> From<T> for Choice<T> {
    fn from(mode: T) -> Self {
        Self::Known(mode)
    }
}

impl<T: Mode> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! impl_mode_text {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = ParseModeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as Mode>::parse_mode(s)
            }
        }
    };
}

/// Which slots a player sees before they are unlocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisibilityMode {
    NextOnly,
    All,
    AllAfterStart,
}

impl Mode for VisibilityMode {
    const FIELD: &'static str = "settings.visibilityMode";
    const ALL: &'static [Self] = &[Self::NextOnly, Self::All, Self::AllAfterStart];

    fn as_str(self) -> &'static str {
        match self {
            Self::NextOnly => "nextOnly",
            Self::All => "all",
            Self::AllAfterStart => "allAfterStart",
        }
    }
}

impl_mode_text!(VisibilityMode);

/// Route-wide rule for completing a slot that has several locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MultiLocationMode {
    All,
    Any,
    Nearest,
    Random,
}

impl Mode for MultiLocationMode {
    const FIELD: &'static str = "settings.multiLocationSlotMode";
    const ALL: &'static [Self] = &[Self::All, Self::Any, Self::Nearest, Self::Random];

    fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
            Self::Nearest => "nearest",
            Self::Random => "random",
        }
    }
}

impl_mode_text!(MultiLocationMode);

/// Per-slot override of [`MultiLocationMode`]; ignored for slots with at most one location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompleteMode {
    All,
    Any,
    Nearest,
    Random,
}

impl Mode for CompleteMode {
    const FIELD: &'static str = "slot.completeMode";
    const ALL: &'static [Self] = &[Self::All, Self::Any, Self::Nearest, Self::Random];

    fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
            Self::Nearest => "nearest",
            Self::Random => "random",
        }
    }
}

impl_mode_text!(CompleteMode);
