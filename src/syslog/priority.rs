/// Highest level on the host's scale; anything above is clamped to it.
pub const MAX_HOST_LEVEL: u8 = 7;

// Index is the host level (NONE, ERROR, WARN, INFO, CONFIG, DEBUG, VERBOSE,
// VERY_VERBOSE), value the syslog severity. Downstream tooling relies on these
// exact numbers.
const HOST_TO_SYSLOG_PRIORITY: [u8; 8] = [0, 3, 4, 6, 5, 7, 7, 7];

/// Maps a host log level to a syslog priority.
pub fn to_priority(level: u8) -> u8 {
    HOST_TO_SYSLOG_PRIORITY[usize::from(level.min(MAX_HOST_LEVEL))]
}
