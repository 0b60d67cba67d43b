// Parser for formatted host log lines such as
// "\x1b[0;32m[I][wifi:102]: Connected\x1b[0m".
use super::level::HostLevel;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

const HOST_LINE_PATTERN: &str =
    r"^(?:\x1b\[[0-9;]*m)?\[(?P<level>VV|[EWICDV])\]\[(?P<tag>[^\]]+?)(?::\d+)?\]";

static HOST_LINE: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();

#[derive(Error, Debug, Clone)]
pub enum LineError {
    #[error("Host line pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}

fn host_line_regex() -> Result<&'static Regex, LineError> {
    match HOST_LINE.get_or_init(|| Regex::new(HOST_LINE_PATTERN)) {
        Ok(regex) => Ok(regex),
        Err(e) => Err(LineError::Pattern(e.clone())),
    }
}

/// A host log line split into the triple the callback registry delivers.
///
/// `message` is the whole line, color codes included, exactly as the host
/// hands it to its callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLine {
    pub level: HostLevel,
    pub tag: String,
    pub message: String,
}

/// Parses one formatted line. Returns `Ok(None)` for lines that do not carry a
/// `[L][tag]` header.
pub fn parse_line(line: &str) -> Result<Option<HostLine>, LineError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(captures) = host_line_regex()?.captures(line) else {
        return Ok(None);
    };

    let level = captures
        .name("level")
        .and_then(|m| HostLevel::from_letter(m.as_str()));
    let tag = captures.name("tag").map(|m| m.as_str().to_string());

    Ok(match (level, tag) {
        (Some(level), Some(tag)) => Some(HostLine {
            level,
            tag,
            message: line.to_string(),
        }),
        _ => None,
    })
}
