use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref REQUEST_PATTERN: Regex =
        Regex::new(r#""(?:GET|POST|PUT|DELETE|HEAD) (\S+).*\s(\d+\.\d+)$"#).unwrap();
}

/// One successfully parsed log line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    pub url: String,
    /// Response time in seconds
    pub time: f64,
}

pub struct LineParser;

impl LineParser {
    /// Extract the request path and trailing response time from a log line
    ///
    /// Lines that don't look like a request entry return `None`; that is the
    /// normal outcome for noise in the log, not a failure.
    pub fn parse(line: &str) -> Option<ParsedEntry> {
        let captures = REQUEST_PATTERN.captures(line)?;
        let time = captures[2].parse::<f64>().ok()?;

        Some(ParsedEntry {
            url: captures[1].to_string(),
            time,
        })
    }
}
