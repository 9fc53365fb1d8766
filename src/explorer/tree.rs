// src/explorer/tree.rs
// =============================================================================
// Builds the checkbox-tree structure for a repository.
//
// How it works:
// 1. Fetch the listing of a folder (files + immediate subfolders)
// 2. Recurse into each subfolder, depth first, building folder nodes
// 3. Append the folder's own files as leaves after its subfolders
//
// One GetFolder call is made per folder visited. Folder paths form a tree on
// the service side, so the recursion always terminates.
// =============================================================================

use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codecommit::SourceControl;
use crate::error::Result;

/// Path of the repository root in folder listings.
pub const ROOT_PATH: &str = "/";

/// A file or folder in the checkbox tree.
///
/// Files have no `children` at all (the field is left out of the JSON);
/// folders always carry a list, even an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// What the user sees: the path relative to the parent folder
    pub label: String,
    /// Unique key: the absolute path (the repository name for the root)
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,
}

impl TreeNode {
    pub fn file(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            children: None,
        }
    }

    pub fn folder(label: impl Into<String>, value: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            children: Some(children),
        }
    }

    pub fn is_folder(&self) -> bool {
        self.children.is_some()
    }

    /// Absolute paths of every file below this node, in tree order.
    pub fn file_values(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_file_values(&mut out);
        out
    }

    fn collect_file_values<'a>(&'a self, out: &mut Vec<&'a str>) {
        match &self.children {
            None => out.push(&self.value),
            Some(children) => {
                for child in children {
                    child.collect_file_values(out);
                }
            }
        }
    }
}

/// Builds the whole tree of `repository`, wrapped in a single root node
/// whose label and value are the repository name.
pub async fn build_repository_tree(source: &dyn SourceControl, repository: &str) -> Result<TreeNode> {
    let children = traverse_folder(source, repository, ROOT_PATH.to_string()).await?;
    Ok(TreeNode::folder(repository, repository, children))
}

/// Builds the nodes below `absolute_path`: subfolders first, then files,
/// each group in the order the service listed them.
pub fn traverse_folder<'a>(
    source: &'a dyn SourceControl,
    repository: &'a str,
    absolute_path: String,
) -> BoxFuture<'a, Result<Vec<TreeNode>>> {
    // async recursion needs the future boxed
    async move {
        debug!(repository, folder = %absolute_path, "walking folder");

        let listing = source.get_folder(repository, &absolute_path).await?;

        let mut children = Vec::with_capacity(listing.sub_folders.len() + listing.files.len());

        for folder in listing.sub_folders {
            let grandchildren =
                traverse_folder(source, repository, folder.absolute_path.clone()).await?;
            children.push(TreeNode::folder(
                folder.relative_path,
                folder.absolute_path,
                grandchildren,
            ));
        }

        children.extend(
            listing
                .files
                .into_iter()
                .map(|f| TreeNode::file(f.relative_path, f.absolute_path)),
        );

        Ok(children)
    }
    .boxed()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does traverse_folder return a BoxFuture instead of being `async fn`?
//    - An async fn compiles to a state machine that contains the futures it
//      awaits; a recursive one would have to contain itself, infinite size
//    - Boxing the future puts each level on the heap, so the size is known
//    - `.boxed()` (from futures::FutureExt) does the boxing and adds `Send`
//
// 2. Why `&dyn SourceControl`?
//    - The walk does not care whether it talks to AWS or to the in-memory
//      test repository; a trait object lets both plug in
// -----------------------------------------------------------------------------
