pub mod ancestry;
pub mod diff;
pub mod exclude;
pub mod external;
pub mod refs;
pub mod repository;
pub mod walk;

#[cfg(test)]
pub mod test_repo;

pub use ancestry::{TraversalState, probe_ancestry};
pub use diff::{DiffStatProvider, TreeDiff};
pub use exclude::PathExclusionSet;
pub use external::ExternalDiff;
pub use refs::{RefNames, load_ref_names, resolve_base};
pub use repository::RepoInfo;
pub use walk::CommitLog;
