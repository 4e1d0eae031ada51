//! # Reconciliation Engine
//!
//! Computes the difference between a desired set of config keys (derived
//! from on-disk mirrors or a single added URL) and the stanzas present in
//! the managed document, then applies minimal edits so the document matches
//! the desired set. Running the same reconciliation twice yields an empty
//! [`ChangeSet`] and byte-identical output the second time.
//!
//! The desired set is a `BTreeSet`, so iteration (and therefore appended
//! stanza order and reporting) is deterministic regardless of how the
//! caller discovered the keys. Stale stanzas are deleted in descending
//! start-line order: the spans were computed once up front, and deleting
//! top-to-bottom would shift every later record's range.

use std::collections::BTreeSet;

use log::debug;
use serde::Serialize;

use crate::document::ConfigDocument;

/// Summary of one reconciliation run. Immutable result value.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    /// Keys for which a new stanza was appended.
    pub added: BTreeSet<String>,
    /// Keys whose existing stanza needed in-place normalization.
    pub updated: BTreeSet<String>,
    /// Keys whose stanza was deleted.
    pub pruned: BTreeSet<String>,
}

impl ChangeSet {
    /// True when the run left the document untouched.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.pruned.is_empty()
    }
}

/// Drift between the desired key set and the document, without mutation.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Drift {
    /// Desired keys with no stanza in the document.
    pub missing_in_config: BTreeSet<String>,
    /// Stanza keys with no corresponding desired entry.
    pub missing_on_disk: BTreeSet<String>,
}

impl Drift {
    /// True when config and desired set agree.
    pub fn is_empty(&self) -> bool {
        self.missing_in_config.is_empty() && self.missing_on_disk.is_empty()
    }
}

/// Make the document's stanza set match `desired`.
///
/// Every desired key is upserted (covering both pure additions and in-place
/// normalization of drifted stanzas); with `prune` set, stanzas for keys
/// outside the desired set are removed. Two runs with identical inputs
/// produce byte-identical documents and identical change sets.
pub fn reconcile(
    desired: &BTreeSet<String>,
    doc: &mut ConfigDocument,
    readers: &str,
    prune: bool,
) -> ChangeSet {
    let existing = doc.keys();
    let mut changes = ChangeSet::default();

    for key in desired {
        if doc.upsert(key, readers) {
            if existing.contains(key) {
                changes.updated.insert(key.clone());
            } else {
                changes.added.insert(key.clone());
            }
        }
    }

    if prune {
        let mut stale: Vec<_> = doc
            .records()
            .into_iter()
            .filter(|record| !desired.contains(&record.key))
            .collect();
        // Spans were computed once for the whole document; delete bottom-up
        // so earlier spans stay accurate.
        stale.sort_by(|a, b| b.start.cmp(&a.start));
        for record in stale {
            doc.remove_span(record.start, record.end);
            changes.pruned.insert(record.key);
        }
        if !changes.pruned.is_empty() {
            doc.normalize_tail();
        }
    }

    debug!(
        "reconciled: {} added, {} updated, {} pruned",
        changes.added.len(),
        changes.updated.len(),
        changes.pruned.len()
    );
    changes
}

/// Read-only variant of [`reconcile`]: report drift without editing.
pub fn diff(desired: &BTreeSet<String>, doc: &ConfigDocument) -> Drift {
    let existing = doc.keys();
    Drift {
        missing_in_config: desired.difference(&existing).cloned().collect(),
        missing_on_disk: existing.difference(desired).cloned().collect(),
    }
}
