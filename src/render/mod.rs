//! Serialize consolidated graphs and trace documents for their consumers.

pub mod graph;
pub mod profile;

pub use graph::{GraphReport, build_graph_report, render_graph_report};
pub use profile::render_profile;
