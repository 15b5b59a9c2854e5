use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The 24 standard syslog facilities.
///
/// A facility's numeric code is its position in this table; the order must
/// match RFC 3164 facility numbering exactly (kern = 0 .. local7 = 23).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facility {
    Kern,
    User,
    Mail,
    Daemon,
    Auth,
    Syslog,
    Lpr,
    News,
    Uucp,
    Cron,
    Authpriv,
    Ftp,
    Ntp,
    Audit,
    Alert,
    Clock,
    #[default]
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl Facility {
    /// Numeric facility code, i.e. the position in the fixed table.
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl std::fmt::Display for Facility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self
            .to_possible_value()
            .map(|v| v.get_name().to_string())
            .unwrap_or_default();
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_table_order() {
        for (index, facility) in Facility::value_variants().iter().enumerate() {
            assert_eq!(facility.code() as usize, index);
        }
    }

    #[test]
    fn local0_is_sixteen() {
        assert_eq!(Facility::Local0.code(), 16);
        assert_eq!(Facility::default(), Facility::Local0);
    }
}
