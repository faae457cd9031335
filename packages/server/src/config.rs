//! Runtime settings of the server process.

use std::time::Duration;

/// Tunables shared by every room and connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerSettings {
    /// Period of one timer tick
    pub tick_interval: Duration,
    /// Upper bound for enqueueing one outbound message on a connection
    pub send_timeout: Duration,
    /// Outbound queue depth per connection
    pub outbound_buffer: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            send_timeout: Duration::from_secs(2),
            outbound_buffer: 64,
        }
    }
}
