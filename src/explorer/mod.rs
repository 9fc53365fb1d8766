// src/explorer/mod.rs
// =============================================================================
// The explorer core: everything between the remote calls and the surfaces
// (CLI and browser page).
//
// Submodules:
// - tree: repository folder walk -> checkbox tree
// - lister: paginated repository listing
// - language: file extension -> highlighting mode
// - cache: session memo of the above, with refresh
// - selection: ticked files -> halt / warning / file view
// =============================================================================

mod cache;
mod language;
mod lister;
mod selection;
mod tree;

pub use cache::ExplorerCache;
pub use selection::{resolve_selection, SelectionOutcome};
pub use tree::TreeNode;
