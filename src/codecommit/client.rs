// src/codecommit/client.rs
// =============================================================================
// The real source-control backend: AWS CodeCommit through the AWS SDK.
//
// Credentials are resolved by the SDK's default chain for the chosen profile
// (shared config files, SSO, environment, instance roles, ...). Nothing here
// retries on its own; the SDK's default retry policy applies.
// =============================================================================

use async_trait::async_trait;
use aws_sdk_codecommit::error::DisplayErrorContext;
use aws_sdk_codecommit::types::{OrderEnum, SortByEnum};
use aws_sdk_codecommit::Client;
use std::sync::Arc;
use tracing::{debug, info};

use super::{Connector, FolderListing, PathEntry, Repository, RepositoryPage, SourceControl};
use crate::config::ConnectionSettings;
use crate::error::{ExplorerError, Result};

/// CodeCommit-backed `SourceControl`.
#[derive(Clone, Debug)]
pub struct CodeCommitClient {
    client: Client,
}

impl CodeCommitClient {
    /// Builds a client for the given profile/region.
    ///
    /// Missing values fall back to whatever the SDK finds on its own.
    pub async fn connect(settings: &ConnectionSettings) -> Result<Self> {
        let endpoint = settings.validated_endpoint()?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(profile) = &settings.profile {
            loader = loader.profile_name(profile);
        }

        if let Some(region) = &settings.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }

        if let Some(endpoint) = &endpoint {
            loader = loader.endpoint_url(endpoint.as_str());
        }

        let sdk_config = loader.load().await;

        info!(
            profile = settings.profile.as_deref().unwrap_or("<default>"),
            region = settings.region.as_deref().unwrap_or("<default>"),
            "connected to CodeCommit"
        );

        Ok(Self {
            client: Client::new(&sdk_config),
        })
    }
}

#[async_trait]
impl SourceControl for CodeCommitClient {
    async fn get_folder(&self, repository: &str, folder_path: &str) -> Result<FolderListing> {
        debug!(repository, folder_path, "GetFolder");

        let output = self
            .client
            .get_folder()
            .repository_name(repository)
            .folder_path(folder_path)
            .send()
            .await
            .map_err(|e| ExplorerError::remote("GetFolder", DisplayErrorContext(e)))?;

        let sub_folders = output
            .sub_folders()
            .iter()
            .map(|f| {
                PathEntry::new(
                    f.relative_path().unwrap_or_default(),
                    f.absolute_path().unwrap_or_default(),
                )
            })
            .collect();

        let files = output
            .files()
            .iter()
            .map(|f| {
                PathEntry::new(
                    f.relative_path().unwrap_or_default(),
                    f.absolute_path().unwrap_or_default(),
                )
            })
            .collect();

        Ok(FolderListing { sub_folders, files })
    }

    async fn get_file(&self, repository: &str, file_path: &str) -> Result<Vec<u8>> {
        debug!(repository, file_path, "GetFile");

        let output = self
            .client
            .get_file()
            .repository_name(repository)
            .file_path(file_path)
            .send()
            .await
            .map_err(|e| ExplorerError::remote("GetFile", DisplayErrorContext(e)))?;

        Ok(output.file_content().as_ref().to_vec())
    }

    async fn list_repositories(&self, next_token: Option<&str>) -> Result<RepositoryPage> {
        debug!(next_token, "ListRepositories");

        let output = self
            .client
            .list_repositories()
            .sort_by(SortByEnum::RepositoryName)
            .order(OrderEnum::Ascending)
            .set_next_token(next_token.map(str::to_string))
            .send()
            .await
            .map_err(|e| ExplorerError::remote("ListRepositories", DisplayErrorContext(e)))?;

        let repositories = output
            .repositories()
            .iter()
            .filter_map(|pair| {
                pair.repository_name().map(|name| Repository {
                    name: name.to_string(),
                    id: pair.repository_id().map(str::to_string),
                })
            })
            .collect();

        Ok(RepositoryPage {
            repositories,
            next_token: output.next_token().map(str::to_string),
        })
    }
}

/// Connects real CodeCommit clients; used by the server's sidebar form.
#[derive(Debug, Default, Clone, Copy)]
pub struct AwsConnector;

#[async_trait]
impl Connector for AwsConnector {
    async fn connect(&self, settings: &ConnectionSettings) -> Result<Arc<dyn SourceControl>> {
        let client: Arc<dyn SourceControl> = Arc::new(CodeCommitClient::connect(settings).await?);
        Ok(client)
    }
}
