use serde::{Serialize, Deserialize};

/// Connectivity of a [PrintSession](crate::PrintSession) to the print service
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum SessionStatus {
    #[default]
    Disconnected,
    /// Waiting for the service to report the connection as open
    Connecting,
    Connected,
    /// The service refused this client. Only a new [start](crate::PrintSession::start) leaves this state
    Blocked
}

/// Connection status, as reported by the print service
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ServiceStatus {
    Open,
    Closed,
    Blocked
}
