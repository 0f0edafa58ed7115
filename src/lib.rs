//! taskgraph-profiler: consolidate CI task graphs and turn task logs into
//! timeline traces.
//!
//! Two engines:
//! - [`graph`]: dependency sanitizing, chunk / task-type merges, dependents index
//! - [`log`] + [`trace`]: live-log parsing and instant-event trace synthesis
//!
//! [`source`] decodes the Taskcluster records both engines start from, and
//! [`render`] writes their results as JSON.

pub mod config;
pub mod graph;
pub mod log;
pub mod render;
pub mod source;
pub mod trace;

pub type Result<T> = anyhow::Result<T>;
