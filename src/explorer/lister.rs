// src/explorer/lister.rs
// =============================================================================
// Lists every repository the current credentials can see.
//
// ListRepositories is paginated: each response may carry a continuation
// token, and we keep asking until a response comes back without one.
// =============================================================================

use tracing::debug;

use crate::codecommit::{Repository, SourceControl};
use crate::error::Result;

/// Fetches all pages and returns the repositories in the order served
/// (ascending by name).
pub async fn list_all_repositories(source: &dyn SourceControl) -> Result<Vec<Repository>> {
    let mut repositories = Vec::new();
    let mut next_token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = source.list_repositories(next_token.as_deref()).await?;
        pages += 1;
        repositories.extend(page.repositories);

        // an empty token means the same as no token
        match page.next_token.filter(|t| !t.is_empty()) {
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    debug!(pages, count = repositories.len(), "listed repositories");
    Ok(repositories)
}
