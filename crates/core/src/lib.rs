pub mod api;
pub mod clear;
pub mod entry;
pub mod paths;
pub mod reader;

pub use api::{ClearResponse, DEFAULT_LIMIT, LogsQuery, LogsResponse, load_logs, parse_limit};
pub use clear::{ClearError, clear_logs};
pub use entry::{LogEntry, UNKNOWN_KEY};
pub use paths::{ClearTarget, LogFiles, LogKind, PathError};
pub use reader::{parse_log_lines, read_last_lines};
