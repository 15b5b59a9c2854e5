/// Maps a hub severity name to a numeric syslog priority.
///
/// Total over all inputs: an unrecognized level forwards as informational
/// (6) rather than being dropped.
pub fn severity_to_priority(level: &str) -> u8 {
    match level {
        "error" => 3,
        "warn" => 4,
        "info" => 6,
        "debug" | "trace" => 7,
        _ => 6,
    }
}
