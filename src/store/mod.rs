//! Shared application state.
//!
//! The [`Store`] is created once by the application and handed to every
//! screen through its context (`&Store` while rendering, `&mut Store` while
//! handling events). Nothing else holds on to it, so there is exactly one
//! writer at any point in time.
//!
//! Interactions are persisted as a JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "next_id": 4,
//!   "interactions": [ { "id": 1, "hcp_name": "...", ... }, ... ]
//! }
//! ```

pub mod interaction;
pub mod stats;

pub use interaction::{
    parse_attendees, Interaction, InteractionDraft, InteractionSource, InteractionType, Sentiment,
};
pub use stats::DashboardStats;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const STORE_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default = "default_version")]
    version: u32,
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    interactions: Vec<Interaction>,
}

fn default_version() -> u32 {
    STORE_FORMAT_VERSION
}

/// The interaction store.
#[derive(Debug)]
pub struct Store {
    /// Backing file; `None` for in-memory stores
    path: Option<PathBuf>,
    interactions: Vec<Interaction>,
    next_id: u64,
    /// Bumped on every mutation so screens can detect stale views
    revision: u64,
}

impl Store {
    /// Load the store from `path`. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        let mut store = Self {
            path: Some(path.to_path_buf()),
            interactions: Vec::new(),
            next_id: 1,
            revision: 0,
        };
        store.read_from_disk()?;
        info!(
            "Loaded {} interactions from {:?}",
            store.interactions.len(),
            path
        );
        Ok(store)
    }

    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            interactions: Vec::new(),
            next_id: 1,
            revision: 0,
        }
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.interactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactions.is_empty()
    }

    /// Re-read the backing file, discarding in-memory state.
    pub fn reload(&mut self) -> Result<()> {
        if self.path.is_none() {
            return Ok(());
        }
        self.read_from_disk()?;
        self.revision += 1;
        Ok(())
    }

    /// All interactions, newest first (by date, then by id).
    pub fn interactions(&self) -> Vec<&Interaction> {
        let mut all: Vec<&Interaction> = self.interactions.iter().collect();
        all.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        all
    }

    /// Interactions matching `query`, newest first.
    pub fn search(&self, query: &str) -> Vec<&Interaction> {
        self.interactions()
            .into_iter()
            .filter(|i| i.matches(query))
            .collect()
    }

    pub fn get(&self, id: u64) -> Option<&Interaction> {
        self.interactions.iter().find(|i| i.id == id)
    }

    /// Validate and insert a new interaction, then persist.
    pub fn add(&mut self, draft: InteractionDraft) -> Result<&Interaction> {
        let hcp_name = draft.hcp_name.trim().to_string();
        if hcp_name.is_empty() {
            anyhow::bail!("HCP name is required");
        }

        let interaction = Interaction {
            id: self.next_id,
            hcp_name,
            interaction_type: draft.interaction_type,
            date: draft.date,
            attendees: draft.attendees,
            topics: draft.topics.trim().to_string(),
            sentiment: draft.sentiment,
            outcomes: draft.outcomes.trim().to_string(),
            follow_up: draft
                .follow_up
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty()),
            follow_up_done: false,
            source: draft.source,
            created_at: Utc::now(),
        };

        let mut interactions = self.interactions.clone();
        interactions.push(interaction);
        self.write(self.next_id + 1, &interactions)?;

        self.next_id += 1;
        self.interactions = interactions;
        self.revision += 1;

        let added = &self.interactions[self.interactions.len() - 1];
        info!(
            "Logged interaction #{} with {} ({})",
            added.id, added.hcp_name, added.interaction_type
        );
        Ok(added)
    }

    /// Remove an interaction. Returns whether it existed.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        if self.get(id).is_none() {
            return Ok(false);
        }
        let remaining: Vec<Interaction> = self
            .interactions
            .iter()
            .filter(|i| i.id != id)
            .cloned()
            .collect();
        self.write(self.next_id, &remaining)?;

        self.interactions = remaining;
        self.revision += 1;
        info!("Removed interaction #{}", id);
        Ok(true)
    }

    /// Flip the follow-up completion flag. Returns whether the interaction exists.
    pub fn toggle_follow_up(&mut self, id: u64) -> Result<bool> {
        let Some(index) = self.interactions.iter().position(|i| i.id == id) else {
            return Ok(false);
        };
        let mut interactions = self.interactions.clone();
        let done = !interactions[index].follow_up_done;
        interactions[index].follow_up_done = done;
        self.write(self.next_id, &interactions)?;

        self.interactions = interactions;
        self.revision += 1;
        debug!("Interaction #{} follow-up done: {}", id, done);
        Ok(true)
    }

    /// Aggregate numbers for the dashboard relative to `today`.
    pub fn stats(&self, today: NaiveDate) -> DashboardStats {
        DashboardStats::compute(&self.interactions(), today)
    }

    fn read_from_disk(&mut self) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        if !path.exists() {
            self.interactions.clear();
            self.next_id = 1;
            return Ok(());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read interaction store: {:?}", path))?;
        let file: StoreFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse interaction store: {:?}", path))?;

        if file.version > STORE_FORMAT_VERSION {
            anyhow::bail!(
                "Interaction store {:?} has format version {}, newer than supported version {}",
                path,
                file.version,
                STORE_FORMAT_VERSION
            );
        }

        let max_id = file.interactions.iter().map(|i| i.id).max().unwrap_or(0);
        self.next_id = file.next_id.max(max_id + 1);
        self.interactions = file.interactions;
        Ok(())
    }

    /// Persist a candidate state. Callers commit it to `self` only on success,
    /// so a failed write leaves memory matching the file.
    fn write(&self, next_id: u64, interactions: &[Interaction]) -> Result<()> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };

        let file = StoreFile {
            version: STORE_FORMAT_VERSION,
            next_id,
            interactions: interactions.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file)
            .with_context(|| "Failed to serialize interaction store")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {:?}", parent))?;
        }

        // Write to a sibling temp file and rename so a crash never leaves half a file
        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write interaction store: {:?}", tmp_path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&tmp_path)
                .with_context(|| format!("Failed to get file metadata: {:?}", tmp_path))?
                .permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&tmp_path, perms)
                .with_context(|| format!("Failed to set file permissions: {:?}", tmp_path))?;
        }

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to replace interaction store: {:?}", path))?;
        debug!("Saved {} interactions to {:?}", interactions.len(), path);
        Ok(())
    }
}
