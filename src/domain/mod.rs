pub mod error;
pub mod event;

pub use error::ForwarderError;
pub use event::Event;
