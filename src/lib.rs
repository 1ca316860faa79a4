// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Slotroute: the consistency engine behind a slot-based route editor.
//!
//! A route is an ordered list of slots linked by unlock edges, the geo-located places bound to
//! them, and a pre-start meeting point. This crate keeps those pieces in step ([`sync`]),
//! reports what is inconsistent ([`validate`]), derives the grouped views a map needs
//! ([`query`]), applies edits ([`ops`]) and reads/writes the JSON document format ([`store`]).

pub mod model;
pub mod ops;
pub mod query;
pub mod session;
pub mod store;
pub mod sync;
pub mod validate;
