pub mod facility;
pub mod format;
pub mod severity;

pub use facility::Facility;
pub use format::{Dialect, encode_pri, format_bsd, format_ietf, parse_event_time};
pub use severity::severity_to_priority;
