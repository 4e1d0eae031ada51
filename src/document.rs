//! # Config Document Model
//!
//! Line-range-indexed model of the managed Gitolite configuration document
//! (`mirrors.conf`). The parser is total: any text is accepted, lines that
//! are not part of a `repo` stanza are preserved verbatim in place, and
//! `render` reproduces the original bytes exactly for an unedited document.
//!
//! A stanza looks like:
//!
//! ```text
//! repo mirrors/github.com/psf/requests.git
//!     R   = @all
//!     RW+ =
//! ```
//!
//! A [`ConfigRecord`] is a view over a half-open line range `[start, end)`;
//! it stays valid only until the next edit, so record lookups are recomputed
//! per operation and bulk deletions must run in descending start order (see
//! [`crate::reconcile`]).
//!
//! Edits are minimal and idempotent: an upsert that finds the record already
//! in the desired shape leaves its lines byte-for-byte untouched, and a
//! document that needed no edit renders back to its original bytes.

use regex::Regex;

/// One `repo` stanza, addressed by its line range within the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigRecord {
    /// Config key exactly as written after the `repo` keyword.
    pub key: String,
    /// First line of the stanza (the header line).
    pub start: usize,
    /// One past the last line of the stanza.
    pub end: usize,
    /// Value of the first reader line within the stanza, if any.
    pub readers: Option<String>,
    /// Whether the stanza contains a write-clause (`RW+`) line.
    pub has_write_clause: bool,
}

/// The managed configuration document as an ordered line buffer.
///
/// Owned by exactly one reconciliation pass at a time; the caller is
/// responsible for serializing writers (e.g. via an exclusive checkout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDocument {
    lines: Vec<String>,
    trailing_newline: bool,
}

fn header_re() -> Regex {
    Regex::new(r"(?i)^\s*repo\s+(.+?)\s*$").unwrap()
}

fn reader_re() -> Regex {
    Regex::new(r"(?i)^\s*R\s*=\s*(.+?)\s*$").unwrap()
}

fn is_write_clause(line: &str) -> bool {
    line.trim().to_lowercase().starts_with("rw+")
}

/// A write clause counts as empty when nothing follows the keyword and the
/// optional `=`.
fn write_clause_is_empty(line: &str) -> bool {
    let rest = line.trim().to_lowercase();
    let rest = rest.strip_prefix("rw+").unwrap_or(&rest).trim_start();
    match rest.strip_prefix('=') {
        Some(value) => value.trim().is_empty(),
        None => rest.is_empty(),
    }
}

impl ConfigDocument {
    /// Parse document text. Never fails; unrecognized content is carried
    /// through untouched.
    pub fn parse(text: &str) -> ConfigDocument {
        if text.is_empty() {
            return ConfigDocument {
                lines: Vec::new(),
                trailing_newline: false,
            };
        }
        let trailing_newline = text.ends_with('\n');
        let mut lines: Vec<String> = text.split('\n').map(String::from).collect();
        if trailing_newline {
            lines.pop();
        }
        ConfigDocument {
            lines,
            trailing_newline,
        }
    }

    /// Render the document back to text. Exact inverse of [`parse`] as long
    /// as no edit was applied.
    ///
    /// [`parse`]: ConfigDocument::parse
    pub fn render(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut out = self.lines.join("\n");
        if self.trailing_newline {
            out.push('\n');
        }
        out
    }

    /// Number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Scan the document for stanzas, top to bottom.
    ///
    /// Each stanza extends from its header line up to (but excluding) the
    /// next header or end of input; headers never nest. The returned views
    /// are invalidated by any subsequent edit.
    pub fn records(&self) -> Vec<ConfigRecord> {
        let header = header_re();
        let reader = reader_re();
        let mut records = Vec::new();

        let mut i = 0;
        while i < self.lines.len() {
            let caps = match header.captures(&self.lines[i]) {
                Some(caps) => caps,
                None => {
                    i += 1;
                    continue;
                }
            };
            let key = caps[1].to_string();
            let mut j = i + 1;
            while j < self.lines.len() && !header.is_match(&self.lines[j]) {
                j += 1;
            }

            let body = &self.lines[i..j];
            let readers = body
                .iter()
                .find_map(|line| reader.captures(line))
                .map(|caps| caps[1].to_string());
            let has_write_clause = body.iter().any(|line| is_write_clause(line));

            records.push(ConfigRecord {
                key,
                start: i,
                end: j,
                readers,
                has_write_clause,
            });
            i = j;
        }
        records
    }

    /// Keys of all stanzas currently in the document.
    pub fn keys(&self) -> std::collections::BTreeSet<String> {
        self.records().into_iter().map(|r| r.key).collect()
    }

    /// First stanza with the given key, if any.
    pub fn record(&self, key: &str) -> Option<ConfigRecord> {
        self.records().into_iter().find(|r| r.key == key)
    }

    /// Ensure a stanza for `key` exists with the given readers and an empty
    /// write clause. Returns whether the document changed.
    ///
    /// A missing stanza is appended after the last existing content with one
    /// separating blank line. An existing stanza is updated minimally: the
    /// reader line is rewritten only when its value differs, the write
    /// clause only when it is absent or non-empty. When nothing needs to
    /// change the stanza's lines are left completely unmodified.
    pub fn upsert(&mut self, key: &str, readers: &str) -> bool {
        let readers = readers.trim();
        let record = match self.record(key) {
            Some(record) => record,
            None => {
                if self.lines.last().is_some_and(|l| !l.trim().is_empty()) {
                    self.lines.push(String::new());
                }
                self.lines.push(format!("repo {}", key));
                self.lines.push(format!("    R   = {}", readers));
                self.lines.push("    RW+ =".to_string());
                self.lines.push(String::new());
                self.trailing_newline = true;
                return true;
            }
        };

        let mut stanza: Vec<String> = self.lines[record.start..record.end].to_vec();
        let mut changed = false;

        let reader = reader_re();
        let reader_line = stanza
            .iter()
            .enumerate()
            .find_map(|(idx, line)| reader.captures(line).map(|caps| (idx, caps[1].to_string())));
        match reader_line {
            Some((idx, value)) => {
                if value != readers {
                    stanza[idx] = format!("    R   = {}", readers);
                    changed = true;
                }
            }
            None => {
                stanza.insert(1, format!("    R   = {}", readers));
                changed = true;
            }
        }

        let clause_pos = stanza.iter().position(|line| is_write_clause(line));
        match clause_pos {
            Some(idx) => {
                if !write_clause_is_empty(&stanza[idx]) {
                    stanza[idx] = "    RW+ =".to_string();
                    changed = true;
                }
            }
            None => {
                stanza.insert(2, "    RW+ =".to_string());
                changed = true;
            }
        }

        if changed {
            self.lines.splice(record.start..record.end, stanza);
            self.trailing_newline = true;
        }
        changed
    }

    /// Delete the stanza with the given key, if present.
    ///
    /// The full line range is removed, along with any blank lines left
    /// immediately at the splice point, so repeated add/remove cycles do not
    /// accumulate blank-line debris.
    pub fn remove_record(&mut self, key: &str) -> bool {
        match self.record(key) {
            Some(record) => {
                self.remove_span(record.start, record.end);
                self.normalize_tail();
                true
            }
            None => false,
        }
    }

    /// Delete a line range directly. Used by the reconciler, which holds a
    /// pre-computed set of record spans and deletes them in descending start
    /// order so the remaining spans stay valid. Only trims forward from the
    /// splice point; it never shortens the document tail, which would
    /// invalidate spans above.
    pub(crate) fn remove_span(&mut self, start: usize, end: usize) {
        self.lines.drain(start..end);
        while start < self.lines.len() && self.lines[start].trim().is_empty() {
            self.lines.remove(start);
        }
        self.trailing_newline = true;
    }

    /// Drop a blank final line left behind by a removal pass, so the
    /// rendered document ends with a single newline. Called once after all
    /// spans of a pass have been deleted.
    pub(crate) fn normalize_tail(&mut self) {
        if self.lines.last().is_some_and(|l| l.is_empty()) {
            self.lines.pop();
        }
    }
}
