//! Repository identity resolution for git-mirror
//!
//! Maps a remote URL (SSH shorthand, scheme URL, or local mirror path) to a
//! canonical `(host, path segments)` identity, and derives the on-disk
//! mirror location and the Gitolite config key from it.
//!
//! Layout:
//!   `<base_dir>/<host>/<segments...>.git`
//!
//! Examples:
//!   `https://github.com/numpy/numpy.git` -> `base/github.com/numpy/numpy.git`
//!   `git@github.com:torvalds/linux.git`  -> `base/github.com/torvalds/linux.git`
//!   `https://gitlab.com/group/sub/repo`  -> `base/gitlab.com/group/sub/repo.git`
//!
//! Nested namespaces (e.g. GitLab subgroups) are preserved in full; the only
//! segment ever altered is the last, which loses a trailing `.git` suffix.

use std::path::{Path, PathBuf};

use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

/// Directory-name suffix that marks a bare mirror on disk.
pub const MIRROR_SUFFIX: &str = ".git";

/// Sentinel host used for mirrors resolved from local filesystem paths.
pub const LOCAL_HOST: &str = "_local";

const URL_SCHEMES: [&str; 4] = ["http", "https", "ssh", "git"];

/// Canonical identity of a mirrored repository.
///
/// Immutable once resolved. `host` plus the ordered path segments uniquely
/// identify the repository across disk layout and config document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    host: String,
    segments: Vec<String>,
}

impl RepoId {
    /// Resolve a Git URL into a [`RepoId`].
    ///
    /// Attempts, in order: SSH shorthand (`user@host:path`), a URL with an
    /// `http`, `https`, `ssh`, or `git` scheme, and finally an existing
    /// local mirror directory. Each shape has its own failure kind; a
    /// string matching none of them is [`Error::UnrecognizedUrl`].
    pub fn resolve(url: &str) -> Result<RepoId> {
        // SSH style: git@host:owner/repo(.git)
        let ssh_re = Regex::new(r"^[A-Za-z0-9._-]+@([A-Za-z0-9._-]+):(.+)$").unwrap();
        if let Some(caps) = ssh_re.captures(url) {
            return Ok(RepoId {
                host: caps[1].to_string(),
                segments: split_segments(&caps[2])?,
            });
        }

        // Scheme style: https://host/owner/repo(.git)
        if let Ok(parsed) = Url::parse(url) {
            if URL_SCHEMES.contains(&parsed.scheme()) {
                let host = match parsed.host_str() {
                    Some(h) if !h.is_empty() => h.to_string(),
                    _ => {
                        return Err(Error::MissingHost {
                            url: url.to_string(),
                        })
                    }
                };
                return Ok(RepoId {
                    host,
                    segments: split_segments(parsed.path())?,
                });
            }
        }

        // Local path fallback: an existing mirror directory. The owner is
        // the parent directory's name, the host a sentinel.
        let path = Path::new(url);
        if path.exists() {
            let dir_name = path.file_name().and_then(|n| n.to_str());
            if let Some(dir_name) = dir_name.filter(|n| path.is_dir() && n.ends_with(MIRROR_SUFFIX)) {
                let name = strip_mirror_suffix(dir_name);
                if name.is_empty() || name == "." || name == ".." {
                    return Err(Error::MalformedPath {
                        path: url.to_string(),
                    });
                }
                let owner = path
                    .parent()
                    .and_then(|p| p.file_name())
                    .and_then(|n| n.to_str())
                    .filter(|n| !n.is_empty())
                    .unwrap_or(LOCAL_HOST)
                    .to_string();
                return Ok(RepoId {
                    host: LOCAL_HOST.to_string(),
                    segments: vec![owner, name],
                });
            }
            return Err(Error::NotAMirrorPath {
                path: url.to_string(),
            });
        }

        Err(Error::UnrecognizedUrl {
            url: url.to_string(),
        })
    }

    /// Build an identity directly from host and path segments.
    ///
    /// Used by the inventory layer when mapping on-disk mirrors back to
    /// identities. Segments are taken as-is and must be non-empty.
    pub fn from_parts(host: impl Into<String>, segments: Vec<String>) -> RepoId {
        RepoId {
            host: host.into(),
            segments,
        }
    }

    /// Hostname component of the identity.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Ordered path segments; the last one is the repository name.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// First path segment (user, organization, or top-level group).
    pub fn owner(&self) -> &str {
        &self.segments[0]
    }

    /// Repository name without the `.git` suffix.
    pub fn name(&self) -> &str {
        self.segments.last().unwrap()
    }

    /// On-disk mirror location under `base_dir`.
    pub fn mirror_dir(&self, base_dir: &Path) -> PathBuf {
        let mut dir = base_dir.join(&self.host);
        for segment in &self.segments[..self.segments.len() - 1] {
            dir.push(segment);
        }
        dir.push(format!("{}{}", self.name(), MIRROR_SUFFIX));
        dir
    }

    /// Gitolite-visible config key for this mirror (matches the on-disk
    /// layout), e.g. `mirrors/github.com/psf/requests.git`.
    pub fn config_key(&self, prefix: &str) -> String {
        format!(
            "{}/{}/{}{}",
            prefix,
            self.host,
            self.segments.join("/"),
            MIRROR_SUFFIX
        )
    }
}

fn strip_mirror_suffix(name: &str) -> String {
    match name.strip_suffix(MIRROR_SUFFIX) {
        Some(stripped) => stripped.to_string(),
        None => name.to_string(),
    }
}

/// Split a URL path into identity segments.
///
/// Empty and `.` components are dropped, the trailing `.git` suffix is
/// stripped from the final segment exactly once. A path yielding no
/// segments, or whose final segment ends up empty, `.`, or `..`, is
/// rejected.
fn split_segments(path: &str) -> Result<Vec<String>> {
    let mut segments: Vec<String> = path
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .map(String::from)
        .collect();

    let last = match segments.last_mut() {
        Some(last) => last,
        None => {
            return Err(Error::MalformedPath {
                path: path.to_string(),
            })
        }
    };
    *last = strip_mirror_suffix(last);
    if last.is_empty() || last == "." || last == ".." {
        return Err(Error::MalformedPath {
            path: path.to_string(),
        });
    }
    Ok(segments)
}
