//! Property-based tests for the config document model and the reconciler.
//!
//! These tests use proptest to generate random inputs and verify that the
//! engine's invariants hold for all possible inputs: parse/render identity,
//! reconciliation idempotence, prune order-independence, and byte-stability
//! of no-op upserts.

#[cfg(test)]
mod proptest_tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use crate::document::ConfigDocument;
    use crate::reconcile::{diff, reconcile};

    /// Short lowercase repo names, turned into realistic config keys.
    fn key_set() -> impl Strategy<Value = BTreeSet<String>> {
        proptest::collection::btree_set("[a-z]{1,8}", 0..6)
            .prop_map(|names| {
                names
                    .into_iter()
                    .map(|n| format!("mirrors/github.com/org/{}.git", n))
                    .collect()
            })
    }

    /// Reader lists: group names and user lists with internal spaces.
    fn readers() -> impl Strategy<Value = String> {
        "[a-z@][a-z @]{0,10}".prop_map(|s| s.trim().to_string()).prop_filter(
            "readers must be non-empty after trimming",
            |s| !s.is_empty(),
        )
    }

    /// Build a canonical document containing a stanza per key.
    fn document_with(keys: &BTreeSet<String>, readers: &str) -> ConfigDocument {
        let mut doc = ConfigDocument::parse("");
        for key in keys {
            doc.upsert(key, readers);
        }
        doc
    }

    proptest! {
        /// Property: render is the exact inverse of parse for any input text.
        #[test]
        fn parse_render_round_trips(text in ".*") {
            let doc = ConfigDocument::parse(&text);
            prop_assert_eq!(doc.render(), text);
        }

        /// Property: parsing never panics and spans cover disjoint ranges
        /// in document order.
        #[test]
        fn record_spans_are_ordered_and_disjoint(text in ".*") {
            let doc = ConfigDocument::parse(&text);
            let records = doc.records();
            let mut previous_end = 0;
            for record in &records {
                prop_assert!(record.start >= previous_end);
                prop_assert!(record.start < record.end);
                prop_assert!(record.end <= doc.line_count());
                previous_end = record.end;
            }
        }

        /// Property: reconciliation is idempotent. The second run reports
        /// no changes and leaves the rendered document byte-identical.
        #[test]
        fn reconcile_is_idempotent(
            desired in key_set(),
            stale in key_set(),
            readers in readers(),
            prune in proptest::bool::ANY,
        ) {
            let mut doc = document_with(&stale, "@old");

            let _ = reconcile(&desired, &mut doc, &readers, prune);
            let after_first = doc.render();

            let second = reconcile(&desired, &mut doc, &readers, prune);
            prop_assert!(second.is_empty(), "second pass changed: {:?}", second);
            prop_assert_eq!(doc.render(), after_first);
        }

        /// Property: after a pruning reconciliation the document keys equal
        /// the desired set exactly, and diff reports no drift.
        #[test]
        fn reconcile_with_prune_converges(
            desired in key_set(),
            stale in key_set(),
            readers in readers(),
        ) {
            let mut doc = document_with(&stale, "@old");
            reconcile(&desired, &mut doc, &readers, true);

            prop_assert_eq!(doc.keys(), desired.clone());
            prop_assert!(diff(&desired, &doc).is_empty());
        }

        /// Property: pruning via the reconciler (descending spans) produces
        /// the same bytes as removing the stale records one at a time in an
        /// arbitrary order.
        #[test]
        fn prune_is_order_independent(
            keep in key_set(),
            stale in key_set(),
            order in proptest::collection::vec(proptest::num::usize::ANY, 0..8),
        ) {
            let stale: BTreeSet<String> = stale.difference(&keep).cloned().collect();
            let mut all = keep.clone();
            all.extend(stale.iter().cloned());

            let mut reconciled = document_with(&all, "@all");
            reconcile(&keep, &mut reconciled, "@all", true);

            // Same starting point, but delete one record at a time in a
            // pseudo-random order; spans are recomputed per deletion.
            let mut sequential = document_with(&all, "@all");
            let mut remaining: Vec<String> = stale.iter().cloned().collect();
            let mut picks = order.into_iter();
            while !remaining.is_empty() {
                let idx = picks.next().unwrap_or(0) % remaining.len();
                let key = remaining.remove(idx);
                sequential.remove_record(&key);
            }

            prop_assert_eq!(sequential.render(), reconciled.render());
        }

        /// Property: an upsert that matches the existing record is a
        /// byte-level no-op.
        #[test]
        fn matching_upsert_is_byte_stable(
            keys in key_set(),
            readers in readers(),
        ) {
            let mut doc = document_with(&keys, &readers);
            let before = doc.render();

            for key in &keys {
                prop_assert!(!doc.upsert(key, &readers), "upsert of {} changed", key);
            }
            prop_assert_eq!(doc.render(), before);
        }

        /// Property: reconciliation is deterministic. Two independent runs
        /// from the same inputs agree on bytes and change sets.
        #[test]
        fn reconcile_is_deterministic(
            desired in key_set(),
            stale in key_set(),
            readers in readers(),
            prune in proptest::bool::ANY,
        ) {
            let mut doc_a = document_with(&stale, "@old");
            let mut doc_b = document_with(&stale, "@old");

            let changes_a = reconcile(&desired, &mut doc_a, &readers, prune);
            let changes_b = reconcile(&desired, &mut doc_b, &readers, prune);

            prop_assert_eq!(changes_a, changes_b);
            prop_assert_eq!(doc_a.render(), doc_b.render());
        }
    }
}
