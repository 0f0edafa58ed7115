//! Log parsing for Taskcluster live logs (`live_backing.log`).

pub mod fixup;
pub mod parse;
pub mod row;

pub use fixup::{fixup_log_rows, strip_leading_datetime};
pub use parse::{parse_line, parse_log_file, parse_log_text};
pub use row::LogRow;
