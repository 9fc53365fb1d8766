// src/explorer/cache.rs
// =============================================================================
// Session cache for the expensive remote walks.
//
// - The repository list is fetched once and reused
// - Each repository's tree is fetched once and kept in a map keyed by name
// - `refresh` drops entries so the next request walks again
//
// Snapshots are handed out as `Arc`s and never mutated afterwards. A full
// refresh bumps a generation counter; walks that started before it finish
// normally but do not store their (stale) result.
// =============================================================================

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::lister::list_all_repositories;
use super::tree::{build_repository_tree, TreeNode};
use crate::codecommit::{Repository, SourceControl};
use crate::error::Result;

#[derive(Debug, Default)]
pub struct ExplorerCache {
    repositories: RwLock<Option<Arc<Vec<Repository>>>>,
    trees: RwLock<HashMap<String, Arc<TreeNode>>>,
    generation: AtomicU64,
}

impl ExplorerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// All repositories, listed on first use.
    pub async fn repositories(&self, source: &dyn SourceControl) -> Result<Arc<Vec<Repository>>> {
        if let Some(cached) = self.repositories.read().await.as_ref() {
            return Ok(Arc::clone(cached));
        }

        let generation = self.generation();
        let listed = Arc::new(list_all_repositories(source).await?);

        let mut slot = self.repositories.write().await;
        if self.generation() == generation {
            *slot = Some(Arc::clone(&listed));
        }
        Ok(listed)
    }

    /// The tree of `repository`, walked on first use.
    pub async fn tree(&self, source: &dyn SourceControl, repository: &str) -> Result<Arc<TreeNode>> {
        if let Some(cached) = self.trees.read().await.get(repository) {
            debug!(repository, "tree cache hit");
            return Ok(Arc::clone(cached));
        }

        let generation = self.generation();
        let tree = Arc::new(build_repository_tree(source, repository).await?);

        let mut trees = self.trees.write().await;
        if self.generation() == generation {
            trees.insert(repository.to_string(), Arc::clone(&tree));
        } else {
            debug!(repository, "cache cleared during walk, not storing tree");
        }
        Ok(tree)
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Forgets one repository's tree, or everything when `repository` is None.
    pub async fn refresh(&self, repository: Option<&str>) {
        match repository {
            Some(name) => {
                info!(repository = name, "refreshing tree");
                self.trees.write().await.remove(name);
            }
            None => {
                info!("refreshing repository list and all trees");
                let mut repositories = self.repositories.write().await;
                let mut trees = self.trees.write().await;
                self.generation.fetch_add(1, Ordering::SeqCst);
                *repositories = None;
                trees.clear();
            }
        }
    }
}
