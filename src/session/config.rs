use serde::{Serialize, Deserialize};

/// Behaviour of a [PrintSession](crate::PrintSession)
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct SessionConfig {
    /// Asks the service to connect again when an open connection closes on its own
    pub auto_reconnect: bool
}

impl Default for SessionConfig {
    fn default() -> SessionConfig {
        SessionConfig {
            auto_reconnect: true
        }
    }
}
