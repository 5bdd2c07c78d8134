//! Workspace identity, repository selection, lifecycle and state

pub mod identity;
pub mod lifecycle;
pub mod repo;
pub mod state;

pub use identity::WorkspaceIdentity;
pub use lifecycle::{Reconciler, RunningWorkspace};
pub use repo::RepositorySelection;
pub use state::{Cardinality, WorkspaceRecord};
