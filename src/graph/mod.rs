//! Task graph consolidation: sanitize edges, merge chunked or same-typed tasks,
//! and derive the reverse (dependents) adjacency for graph consumers.

pub mod dependents;
pub mod merge;
pub mod node;
pub mod pipeline;
pub mod sanitize;
pub mod timing;

pub use dependents::{DependentsIndex, build_dependents_index};
pub use merge::{MergeKey, MergeStrategy, merge_chunks, merge_pass, merge_task_type};
pub use node::{TaskNode, task_type_prefix};
pub use pipeline::consolidate;
pub use sanitize::remove_missing_dependencies;
pub use timing::{TaskTiming, task_timing};
