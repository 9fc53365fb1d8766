// src/app.rs
// =============================================================================
// The application context: the session state every handler works against.
//
// Holds:
// - the active source-control handle (None until the user connects)
// - the explored repository: set once the user has asked to explore, and kept
//   so later interactions (ticking files, a page reload) still show the tree
// - the explorer cache
//
// The CLI builds one per run; the server shares one between requests.
// =============================================================================

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::codecommit::{Connector, Repository, SourceControl};
use crate::config::ConnectionSettings;
use crate::error::{ExplorerError, Result};
use crate::explorer::{resolve_selection, ExplorerCache, SelectionOutcome, TreeNode};

struct Connection {
    settings: ConnectionSettings,
    source: Arc<dyn SourceControl>,
}

pub struct AppContext {
    connector: Arc<dyn Connector>,
    defaults: ConnectionSettings,
    connection: RwLock<Option<Connection>>,
    explored: RwLock<Option<String>>,
    cache: ExplorerCache,
}

impl AppContext {
    /// A context that connects lazily with `connector`.
    ///
    /// `defaults` are the profile/region found in the environment or on the
    /// command line.
    pub fn new(connector: Arc<dyn Connector>, defaults: ConnectionSettings) -> Self {
        Self {
            connector,
            defaults,
            connection: RwLock::new(None),
            explored: RwLock::new(None),
            cache: ExplorerCache::new(),
        }
    }

    pub fn defaults(&self) -> &ConnectionSettings {
        &self.defaults
    }

    /// Connects with the form's values (or the defaults, when complete).
    ///
    /// Reconnecting with the same settings keeps the cache; different
    /// settings start a fresh session.
    pub async fn connect(&self, form: &ConnectionSettings) -> Result<()> {
        let settings = self.defaults.resolve(form);

        let mut connection = self.connection.write().await;
        if let Some(current) = connection.as_ref() {
            if current.settings == settings {
                return Ok(());
            }
        }

        let source = self.connector.connect(&settings).await?;

        if connection.is_some() {
            info!("connection settings changed, clearing session cache");
            self.cache.refresh(None).await;
            *self.explored.write().await = None;
        }

        *connection = Some(Connection { settings, source });
        Ok(())
    }

    pub async fn is_connected(&self) -> bool {
        self.connection.read().await.is_some()
    }

    async fn source(&self) -> Result<Arc<dyn SourceControl>> {
        self.connection
            .read()
            .await
            .as_ref()
            .map(|c| Arc::clone(&c.source))
            .ok_or(ExplorerError::NotConnected)
    }

    pub async fn repositories(&self) -> Result<Arc<Vec<Repository>>> {
        let source = self.source().await?;
        self.cache.repositories(source.as_ref()).await
    }

    /// Handles the "Explore" submit: remembers that the user asked for a
    /// traversal and returns the repository's tree.
    pub async fn explore(&self, repository: &str) -> Result<Arc<TreeNode>> {
        let source = self.source().await?;
        *self.explored.write().await = Some(repository.to_string());
        self.cache.tree(source.as_ref(), repository).await
    }

    pub async fn traverse_requested(&self) -> bool {
        self.explored.read().await.is_some()
    }

    /// The repository of the last "Explore" in this session.
    pub async fn explored_repository(&self) -> Option<String> {
        self.explored.read().await.clone()
    }

    /// Handles a change of ticked files in the tree.
    pub async fn select(&self, repository: &str, checked: &[String]) -> Result<SelectionOutcome> {
        let source = self.source().await?;
        resolve_selection(source.as_ref(), repository, checked).await
    }

    pub async fn refresh(&self, repository: Option<&str>) {
        self.cache.refresh(repository).await;
    }
}
