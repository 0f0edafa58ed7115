//! Source layer: Taskcluster JSON records + loading them from disk.
//!
//! This module is intentionally separate from graph consolidation and trace
//! synthesis. It owns:
//! - the serde shapes of task-group listings and task definitions
//! - file loading with path context
//! - task-group id validation

pub mod load;
pub mod task;

pub use load::{is_valid_task_group_id, load_task_definition, load_task_groups};
pub use task::{Run, TaskAndStatus, TaskDefinition, TaskGroupListing, TaskStatus};
