// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Slotroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Slotroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The editing session: one authoritative document plus a revision counter.

use serde_json::Value;

use crate::model::RouteDocument;
use crate::store::{document_from_json, document_from_value, document_to_json, ImportError};
use crate::sync::{reconcile_start_slot, repair_loaded, StartSlotSync};
use crate::validate::{validate, ValidationReport};

/// Owns the current document. Every accepted change bumps `rev`, which is what
/// [`crate::ops::apply_ops`] checks `base_rev` against.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSession {
    document: RouteDocument,
    rev: u64,
}

impl RouteSession {
    pub fn new(document: RouteDocument) -> Self {
        Self { document, rev: 0 }
    }

    pub fn document(&self) -> &RouteDocument {
        &self.document
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn into_document(self) -> RouteDocument {
        self.document
    }

    /// Swaps in a new document and returns the bumped revision.
    pub(crate) fn replace_document(&mut self, document: RouteDocument) -> u64 {
        self.document = document;
        self.rev = self.rev.saturating_add(1);
        self.rev
    }

    /// Parses, back-fills and non-destructively syncs `text`, then makes it the current
    /// document. On error nothing changes.
    pub fn import_json(&mut self, text: &str) -> Result<u64, ImportError> {
        let partial = document_from_json(text)?;
        Ok(self.accept_import(repair_loaded(partial)))
    }

    /// Same as [`Self::import_json`] for an already parsed value.
    pub fn import_value(&mut self, value: Value) -> Result<u64, ImportError> {
        let partial = document_from_value(value)?;
        Ok(self.accept_import(repair_loaded(partial)))
    }

    fn accept_import(&mut self, document: RouteDocument) -> u64 {
        let rev = self.replace_document(document);
        tracing::info!(
            rev,
            slots = self.document.slots.len(),
            locations = self.document.locations.len(),
            "imported document"
        );
        rev
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        document_to_json(&self.document)
    }

    /// Runs a start-slot strategy; the revision only moves if the document changed.
    pub fn reconcile_start_slot(&mut self, strategy: StartSlotSync) -> bool {
        let mut document = self.document.clone();
        let changed = reconcile_start_slot(&mut document, strategy);
        if changed {
            self.replace_document(document);
        }
        changed
    }

    pub fn validate(&self) -> ValidationReport {
        validate(&self.document)
    }
}

impl Default for RouteSession {
    fn default() -> Self {
        Self::new(RouteDocument::new())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::RouteSession;
    use crate::model::RouteDocument;
    use crate::store::ImportError;
    use crate::sync::StartSlotSync;

    #[test]
    fn failed_import_leaves_document_and_rev_untouched() {
        let mut session = RouteSession::default();
        session.import_json(r#"{"slots": []}"#).expect("import");
        let before = session.clone();

        let err = session.import_json("[1, 2, 3]").expect_err("array is not a document");
        assert!(matches!(err, ImportError::NotAnObject));
        let err = session.import_json("{ not json").expect_err("malformed");
        assert!(matches!(err, ImportError::Json(_)));
        let err = session
            .import_value(json!({ "slots": "nope" }))
            .expect_err("wrong section shape");
        assert!(matches!(err, ImportError::InvalidSection { section: "slots", .. }));

        assert_eq!(session, before);
    }

    #[test]
    fn import_repairs_and_bumps_rev() {
        let mut session = RouteSession::default();
        let rev = session.import_value(json!({})).expect("import");

        assert_eq!(rev, 1);
        let doc = session.document();
        assert_eq!(doc.meta.title, "(import)");
        assert!(doc.has_start_slot());
        assert_eq!(doc.prestart.use_location_id.as_ref().map(|id| id.as_str()), Some("startloc"));
    }

    #[test]
    fn reconcile_only_bumps_rev_on_change() {
        let mut session = RouteSession::new(RouteDocument::new());
        assert!(session.reconcile_start_slot(StartSlotSync::Regenerate));
        assert_eq!(session.rev(), 1);
        assert!(!session.reconcile_start_slot(StartSlotSync::Regenerate));
        assert!(!session.reconcile_start_slot(StartSlotSync::FillGaps));
        assert_eq!(session.rev(), 1);
        assert!(session.validate().is_valid());
    }
}
