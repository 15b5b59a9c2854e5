use tracing::{debug, warn};

use crate::app::Config;
use crate::domain::{Event, ForwarderError};
use crate::sender::UdpSender;
use crate::syslog::{self, Dialect};

/// Connection state of the inbound subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// The single-threaded message transform: parse, filter, format, send.
///
/// One forwarder owns one connection flag and one outbound socket. All
/// state is mutated between handled messages by the one control thread, so
/// no locking is involved anywhere.
pub struct Forwarder {
    config: Config,
    sender: UdpSender,
    state: ConnectionState,
    hub_ip: String,
    hostname: String,
    procid: String,
}

impl Forwarder {
    pub fn new(config: Config, sender: UdpSender) -> Self {
        let hub_ip = config
            .hub_ip
            .clone()
            .or_else(|| sender.local_ip())
            .unwrap_or_else(|| "127.0.0.1".to_string());
        let hostname = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| hub_ip.clone());

        Self {
            config,
            sender,
            state: ConnectionState::Disconnected,
            hub_ip,
            hostname,
            procid: std::process::id().to_string(),
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    /// Marks the inbound subscription active. No-op if already connected.
    pub fn connect(&mut self) {
        if self.is_connected() {
            warn!("connect called while already connected");
            return;
        }
        self.state = ConnectionState::Connected;
        debug!("inbound subscription connected");
    }

    /// Marks the inbound subscription inactive. No-op if not connected.
    pub fn disconnect(&mut self) {
        if !self.is_connected() {
            warn!("disconnect called while not connected");
            return;
        }
        self.state = ConnectionState::Disconnected;
        debug!("inbound subscription disconnected");
    }

    /// Tears down any existing subscription and starts fresh. Always ends
    /// connected, guaranteeing at most one active subscription.
    pub fn initialize(&mut self) {
        if self.is_connected() {
            self.disconnect();
        }
        self.connect();
    }

    /// Processes one raw inbound message end to end.
    ///
    /// Returns the line that was sent, `Ok(None)` when the message was
    /// deliberately dropped (disconnected, or self-originated), and an
    /// error when it was malformed. The caller logs errors and moves on;
    /// nothing here is fatal.
    pub async fn handle(&mut self, raw: &str) -> Result<Option<String>, ForwarderError> {
        if !self.is_connected() {
            return Ok(None);
        }

        let event: Event = serde_json::from_str(raw)?;

        if self.is_self_origin(&event) {
            debug!(device_id = event.device_id, "dropping self-originated event");
            return Ok(None);
        }

        let line = self.render(&event)?;
        self.sender.send(&line).await;
        Ok(Some(line))
    }

    /// Anti-feedback rule: the forwarder's own log lines come back on the
    /// event stream tagged with its source type and device id. Forwarding
    /// those would amplify without bound.
    fn is_self_origin(&self, event: &Event) -> bool {
        match self.config.self_device_id {
            Some(id) => {
                event.source_type == self.config.self_source_type && event.device_id == id
            }
            None => false,
        }
    }

    /// Renders the syslog line for one event. Pure with respect to the
    /// event and this forwarder's identity fields.
    pub fn render(&self, event: &Event) -> Result<String, ForwarderError> {
        let priority = syslog::severity_to_priority(&event.level);
        let timestamp = syslog::parse_event_time(&event.time)?;

        let line = match self.config.dialect {
            Dialect::Bsd => syslog::format_bsd(
                self.config.facility,
                priority,
                timestamp,
                &self.hub_ip,
                &event.name,
                &event.msg,
            ),
            Dialect::Ietf => syslog::format_ietf(
                self.config.facility,
                priority,
                timestamp,
                &self.hostname,
                &self.procid,
                &event.name,
                &event.msg,
            ),
        };
        Ok(line)
    }

    /// Handles a raw status notification from the inbound transport, e.g.
    /// "status: open" or "status: closing". The second whitespace token
    /// carries the state; the connection flag tracks it so a dead transport
    /// cannot leave the forwarder believing it is subscribed.
    pub fn transport_status(&mut self, status: &str) {
        let Some(state) = status.split_whitespace().nth(1) else {
            warn!("unrecognized transport status line: {status:?}");
            return;
        };
        debug!("transport status: {state}");

        match state {
            "open" => {
                if !self.is_connected() {
                    self.state = ConnectionState::Connected;
                }
            }
            "closing" | "closed" => {
                if self.is_connected() {
                    self.state = ConnectionState::Disconnected;
                }
            }
            other => debug!("ignoring transport status {other:?}"),
        }
    }
}
