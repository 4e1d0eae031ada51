//! # git-mirror Library
//!
//! Core functionality for mirroring Git repositories into a
//! `host/path.../repo.git` layout and keeping a Gitolite access-control
//! document synchronized with the set of mirrors on disk. The library backs
//! the `git-mirror` command-line tool but can be embedded anywhere a
//! declarative, idempotent config reconciliation is needed.
//!
//! ## Quick Example
//!
//! ```
//! use std::collections::BTreeSet;
//! use git_mirror::document::ConfigDocument;
//! use git_mirror::reconcile::reconcile;
//!
//! // The managed document starts empty; the desired set comes from disk.
//! let mut doc = ConfigDocument::parse("");
//! let desired: BTreeSet<String> =
//!     ["mirrors/github.com/psf/requests.git".to_string()].into();
//!
//! let changes = reconcile(&desired, &mut doc, "@all", true);
//! assert_eq!(changes.added.len(), 1);
//! assert!(doc.render().contains("repo mirrors/github.com/psf/requests.git"));
//!
//! // Reconciliation is idempotent: a second run changes nothing.
//! let again = reconcile(&desired, &mut doc, "@all", true);
//! assert!(again.is_empty());
//! ```
//!
//! ## Core Concepts
//!
//! - **Identity (`identity`)**: canonical `(host, path segments)` identity
//!   of a repository, resolved from SSH-shorthand, scheme URLs, or local
//!   mirror paths, and mapped to an on-disk layout and a config key.
//! - **Document Model (`document`)**: total, round-trip-exact parser for
//!   the stanza-based config document, with minimal byte-stable edits.
//! - **Reconciler (`reconcile`)**: desired-vs-existing diffing and the
//!   idempotent apply step producing a [`reconcile::ChangeSet`].
//! - **Inventory (`inventory`)**: discovery of mirror directories on disk
//!   and the last-sync ledger.
//! - **Collaborators (`git`, `admin`, `submodules`, `systemd`,
//!   `settings`)**: subprocess and filesystem wrappers around the engine,
//!   with no reconciliation logic of their own.
//!
//! The engine itself is single-threaded and synchronous: one document, one
//! writer, one pass. Callers serialize access (the `admin` collaborator
//! refreshes an exclusive checkout) and materialize inventory results
//! before reconciling so reporting stays deterministic.

pub mod admin;
pub mod document;
pub mod error;
pub mod git;
pub mod identity;
pub mod inventory;
pub mod output;
pub mod reconcile;
pub mod settings;
pub mod submodules;
pub mod systemd;

#[cfg(test)]
mod document_proptest;
