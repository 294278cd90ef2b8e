mod discovery;
mod parser;
mod reader;

pub use discovery::{LatestLog, find_latest_log};
pub use parser::{LineParser, ParsedEntry};
pub use reader::{LogLines, LogReader};
