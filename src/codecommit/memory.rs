// src/codecommit/memory.rs
// =============================================================================
// An in-memory `SourceControl`, used by the tests.
//
// Repositories are a list of (absolute path, bytes) pairs. Folder listings are
// derived from the paths, keeping the order in which files were added, so
// tests can check that the explorer preserves the service's ordering.
// Paths follow the service's convention: no leading '/', "/" is the root.
// =============================================================================

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{Connector, FolderListing, PathEntry, Repository, RepositoryPage, SourceControl};
use crate::config::ConnectionSettings;
use crate::error::{ExplorerError, Result};

#[derive(Debug, Default)]
pub struct MemorySourceControl {
    repositories: Vec<(String, Vec<(String, Vec<u8>)>)>,
    page_size: Option<usize>,
    folder_fetches: AtomicUsize,
    repository_page_fetches: AtomicUsize,
}

impl MemorySourceControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a repository with the given files, in order.
    pub fn with_repository(mut self, name: &str, files: &[(&str, &str)]) -> Self {
        let files = files
            .iter()
            .map(|(path, content)| (path.trim_start_matches('/').to_string(), content.as_bytes().to_vec()))
            .collect();
        self.repositories.push((name.to_string(), files));
        self
    }

    /// Adds a raw file to an existing repository.
    pub fn with_raw_file(mut self, repository: &str, path: &str, bytes: Vec<u8>) -> Self {
        if let Some((_, files)) = self.repositories.iter_mut().find(|(n, _)| n == repository) {
            files.push((path.trim_start_matches('/').to_string(), bytes));
        }
        self
    }

    /// Splits repository listings into pages of `size` records.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size.max(1));
        self
    }

    pub fn folder_fetches(&self) -> usize {
        self.folder_fetches.load(Ordering::SeqCst)
    }

    pub fn repository_page_fetches(&self) -> usize {
        self.repository_page_fetches.load(Ordering::SeqCst)
    }

    fn files_of(&self, repository: &str) -> Result<&[(String, Vec<u8>)]> {
        self.repositories
            .iter()
            .find(|(name, _)| name == repository)
            .map(|(_, files)| files.as_slice())
            .ok_or_else(|| {
                ExplorerError::remote(
                    "GetFolder",
                    format!("RepositoryDoesNotExistException: {}", repository),
                )
            })
    }
}

fn join(folder: &str, name: &str) -> String {
    if folder.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", folder, name)
    }
}

#[async_trait]
impl SourceControl for MemorySourceControl {
    async fn get_folder(&self, repository: &str, folder_path: &str) -> Result<FolderListing> {
        self.folder_fetches.fetch_add(1, Ordering::SeqCst);

        let files = self.files_of(repository)?;
        let folder = folder_path.trim_matches('/');
        let prefix = if folder.is_empty() {
            String::new()
        } else {
            format!("{}/", folder)
        };

        let mut listing = FolderListing::default();
        let mut found = folder.is_empty();

        for (path, _) in files {
            let Some(rest) = path.strip_prefix(&prefix) else {
                continue;
            };
            found = true;

            match rest.split_once('/') {
                Some((sub, _)) => {
                    let absolute = join(folder, sub);
                    if !listing.sub_folders.iter().any(|f| f.absolute_path == absolute) {
                        listing.sub_folders.push(PathEntry::new(sub, absolute));
                    }
                }
                None => listing.files.push(PathEntry::new(rest, path.clone())),
            }
        }

        if !found {
            return Err(ExplorerError::remote(
                "GetFolder",
                format!("FolderDoesNotExistException: {}", folder_path),
            ));
        }

        Ok(listing)
    }

    async fn get_file(&self, repository: &str, file_path: &str) -> Result<Vec<u8>> {
        let wanted = file_path.trim_start_matches('/');

        self.files_of(repository)?
            .iter()
            .find(|(path, _)| path == wanted)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| {
                ExplorerError::remote(
                    "GetFile",
                    format!("FileDoesNotExistException: {}", file_path),
                )
            })
    }

    async fn list_repositories(&self, next_token: Option<&str>) -> Result<RepositoryPage> {
        self.repository_page_fetches.fetch_add(1, Ordering::SeqCst);

        let mut names: Vec<&str> = self.repositories.iter().map(|(n, _)| n.as_str()).collect();
        names.sort_unstable();

        // Tokens are "tok1", "tok2", ...: the index of the page they point to
        let page = match next_token {
            None => 0,
            Some(token) => token
                .strip_prefix("tok")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| {
                    ExplorerError::remote(
                        "ListRepositories",
                        format!("InvalidContinuationTokenException: {}", token),
                    )
                })?,
        };

        let size = self.page_size.unwrap_or(names.len().max(1));
        let start = page * size;
        let end = (start + size).min(names.len());

        let repositories = names
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|n| Repository::named(*n))
            .collect();

        let next_token = (end < names.len()).then(|| format!("tok{}", page + 1));

        Ok(RepositoryPage {
            repositories,
            next_token,
        })
    }
}

/// Hands out the same in-memory source for every connection.
pub struct MemoryConnector {
    pub source: Arc<MemorySourceControl>,
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, _settings: &ConnectionSettings) -> Result<Arc<dyn SourceControl>> {
        let source: Arc<dyn SourceControl> = self.source.clone();
        Ok(source)
    }
}
