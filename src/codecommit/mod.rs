// src/codecommit/mod.rs
// =============================================================================
// This module talks to the remote source-control service.
//
// It defines:
// - The data the service hands back (folder listings, repository pages)
// - The `SourceControl` trait: the three remote calls everything else uses
// - The `Connector` trait: builds a `SourceControl` from profile/region
//
// Implementations:
// - client: the real AWS CodeCommit client
// - memory: an in-memory repository used by the tests
// =============================================================================

mod client;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::ConnectionSettings;
use crate::error::Result;

pub use client::AwsConnector;

/// A file or folder as the service reports it inside a folder listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathEntry {
    /// Path relative to the folder that was listed (e.g. "lib.rs")
    pub relative_path: String,
    /// Path from the repository root (e.g. "src/lib.rs")
    pub absolute_path: String,
}

impl PathEntry {
    pub fn new(relative_path: impl Into<String>, absolute_path: impl Into<String>) -> Self {
        Self {
            relative_path: relative_path.into(),
            absolute_path: absolute_path.into(),
        }
    }
}

/// Immediate children of one folder, in the order the service returned them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderListing {
    pub sub_folders: Vec<PathEntry>,
    pub files: Vec<PathEntry>,
}

/// A repository visible to the current credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Repository {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
        }
    }
}

/// One page of a repository listing.
///
/// `next_token` is `Some` while more pages remain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryPage {
    pub repositories: Vec<Repository>,
    pub next_token: Option<String>,
}

/// The remote calls the explorer needs. Read-only by construction.
#[async_trait]
pub trait SourceControl: Send + Sync {
    /// Lists the files and immediate subfolders of `folder_path`.
    async fn get_folder(&self, repository: &str, folder_path: &str) -> Result<FolderListing>;

    /// Fetches the raw bytes of the file at `file_path`.
    async fn get_file(&self, repository: &str, file_path: &str) -> Result<Vec<u8>>;

    /// Fetches one page of repositories, sorted by name ascending.
    async fn list_repositories(&self, next_token: Option<&str>) -> Result<RepositoryPage>;
}

/// Builds a `SourceControl` handle for a profile/region pair.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, settings: &ConnectionSettings) -> Result<Arc<dyn SourceControl>>;
}
