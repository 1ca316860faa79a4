// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Import/export and on-disk persistence of route documents.

pub mod json;
pub mod route_file;

pub use json::{
    document_from_json, document_from_value, document_to_json, document_to_value, ImportError,
};
pub use route_file::{RouteFile, StoreError, WriteDurability};
