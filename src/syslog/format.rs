use chrono::{Local, NaiveDateTime, SecondsFormat, TimeZone};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::Facility;

/// Input pattern of the hub's embedded event timestamp.
const EVENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Legacy RFC 3164 timestamp: month, day, time. No year, no zone.
const BSD_TIME_FORMAT: &str = "%b %d %H:%M:%S";

/// Output dialect for the rendered syslog line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Legacy BSD syslog (RFC 3164)
    #[default]
    Bsd,
    /// Structured syslog (RFC 5424)
    Ietf,
}

/// Parses the hub's "yyyy-MM-dd HH:mm:ss.SSS" timestamp. Failure is a hard
/// error for that message: the caller drops it and logs.
pub fn parse_event_time(time: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(time, EVENT_TIME_FORMAT)
}

/// PRI encoding per RFC 3164 §4.1.1: facility code times eight plus
/// severity.
pub const fn encode_pri(facility: Facility, priority: u8) -> u8 {
    facility.code() * 8 + priority
}

/// Renders one RFC 3164 line:
/// `<pri>MMM dd HH:mm:ss {hub_ip} hubitat: {name}: {msg}`.
///
/// Pure function of its inputs; identical inputs yield byte-identical
/// output.
pub fn format_bsd(
    facility: Facility,
    priority: u8,
    timestamp: NaiveDateTime,
    hub_ip: &str,
    name: &str,
    msg: &str,
) -> String {
    format!(
        "<{}>{} {} hubitat: {}: {}",
        encode_pri(facility, priority),
        timestamp.format(BSD_TIME_FORMAT),
        hub_ip,
        name,
        msg
    )
}

/// Renders one RFC 5424 line:
/// `<pri>1 {rfc3339} {hostname} hubitat {procid} - - {name}: {msg}`
/// with nil MSGID and nil structured data.
///
/// The event timestamp carries no zone, so it is stamped with the local
/// offset; a nonexistent local time (DST gap) falls back to rendering the
/// naive value as UTC.
pub fn format_ietf(
    facility: Facility,
    priority: u8,
    timestamp: NaiveDateTime,
    hostname: &str,
    procid: &str,
    name: &str,
    msg: &str,
) -> String {
    let stamped = match Local.from_local_datetime(&timestamp).earliest() {
        Some(local) => local.to_rfc3339_opts(SecondsFormat::Millis, false),
        None => timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
    };
    format!(
        "<{}>1 {} {} hubitat {} - - {}: {}",
        encode_pri(facility, priority),
        stamped,
        hostname,
        procid,
        name,
        msg
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_time() -> NaiveDateTime {
        parse_event_time("2020-05-01 12:00:00.000").unwrap()
    }

    #[test]
    fn parses_hub_timestamp() {
        let ts = sample_time();
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2020-05-01 12:00:00");
    }

    #[test]
    fn rejects_malformed_timestamp() {
        assert!(parse_event_time("May 1st, noon").is_err());
        assert!(parse_event_time("2020-05-01T12:00:00.000").is_err());
    }

    #[test]
    fn pri_encoding() {
        assert_eq!(encode_pri(Facility::Local0, 3), 131);
        assert_eq!(encode_pri(Facility::Kern, 0), 0);
        assert_eq!(encode_pri(Facility::Local7, 7), 191);
    }

    #[test]
    fn bsd_golden_line() {
        let line = format_bsd(
            Facility::Local0,
            3,
            sample_time(),
            "192.168.1.50",
            "Motion Sensor",
            "triggered",
        );
        assert_eq!(
            line,
            "<131>May 01 12:00:00 192.168.1.50 hubitat: Motion Sensor: triggered"
        );
    }

    #[test]
    fn bsd_formatting_is_pure() {
        let a = format_bsd(Facility::Local3, 4, sample_time(), "10.0.0.2", "Lock", "jammed");
        let b = format_bsd(Facility::Local3, 4, sample_time(), "10.0.0.2", "Lock", "jammed");
        assert_eq!(a, b);
    }

    #[test]
    fn ietf_header_grammar() {
        let line = format_ietf(
            Facility::Local0,
            6,
            sample_time(),
            "hub-01",
            "412",
            "Motion Sensor",
            "active",
        );
        assert!(line.starts_with("<134>1 2020-05-01T12:00:00.000"), "line: {line}");
        assert!(line.ends_with(" hub-01 hubitat 412 - - Motion Sensor: active"));
    }

    #[test]
    fn ietf_formatting_is_pure() {
        let a = format_ietf(Facility::User, 7, sample_time(), "hub", "1", "n", "m");
        let b = format_ietf(Facility::User, 7, sample_time(), "hub", "1", "n", "m");
        assert_eq!(a, b);
    }
}
