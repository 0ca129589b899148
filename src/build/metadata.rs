//! Persistent publish-state tracking for posts.
//!
//! The metadata sidecar maps each post's source path to the title, publish
//! and modify timestamps, and content hash recorded on the last run. It is
//! loaded at the start of a build, pruned of entries for deleted files,
//! updated in memory as posts are processed, and written back at the end.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum MetadataError {
    #[error("failed to read metadata file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse metadata file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Publish state recorded for a single post, keyed by its source path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    /// Title extracted from the post's first line when it was first seen
    pub title: String,
    /// Timestamp of the post's first appearance; never rewritten
    pub published: String,
    /// Timestamp of the last content change; empty until the post changes
    pub modified: String,
    /// Hex digest of the post's raw bytes as of the last run
    pub hash: String,
}

/// How a post relates to the state recorded on the previous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostState {
    /// First encounter: a record was created
    New,
    /// Content hash changed: hash and modified timestamp updated
    Modified,
    /// Content hash unchanged: record untouched
    Stable,
}

/// The full metadata mapping, persisted as a single JSON document.
///
/// The map is ordered so serialized output is deterministic across runs.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    posts: BTreeMap<String, PostRecord>,
}

impl Metadata {
    /// Load the metadata mapping from disk.
    ///
    /// A missing or unreadable file is an I/O error; there is no implicit
    /// empty store on first run.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Drop entries whose source file no longer exists on disk.
    ///
    /// Returns the number of entries removed.
    pub fn prune(&mut self) -> usize {
        let before = self.posts.len();
        self.posts.retain(|key, _| Path::new(key).is_file());
        before - self.posts.len()
    }

    /// Record a post's current state, creating or updating its record.
    ///
    /// Unseen paths get a fresh record with `published` set to `now` and an
    /// empty `modified`. Seen paths with a differing hash get the new hash
    /// and `modified` set to `now`; `published` and `title` stay as first
    /// recorded. Seen paths with an equal hash are left untouched.
    pub fn track(
        &mut self,
        key: &str,
        title: &str,
        hash: &str,
        now: &str,
    ) -> (PostState, &PostRecord) {
        match self.posts.entry(key.to_string()) {
            Entry::Vacant(entry) => {
                let record = entry.insert(PostRecord {
                    title: title.to_string(),
                    published: now.to_string(),
                    modified: String::new(),
                    hash: hash.to_string(),
                });
                (PostState::New, record)
            }
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                if record.hash != hash {
                    record.hash = hash.to_string();
                    record.modified = now.to_string();
                    (PostState::Modified, record)
                } else {
                    (PostState::Stable, record)
                }
            }
        }
    }

    /// Look up the record for a post path.
    pub fn get(&self, key: &str) -> Option<&PostRecord> {
        self.posts.get(key)
    }

    /// Number of tracked posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// True when no posts are tracked.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Write the mapping back to disk, overwriting the previous file.
    pub fn save(&self, path: &Path) -> Result<(), MetadataError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

/// Current local time in the format stored in post records.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}
