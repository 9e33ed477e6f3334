use serde::{Deserialize, Serialize};

/// Identity only; the engine never looks past the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    /// Milliseconds since the epoch, assigned by the transport at join time.
    pub joined_at: u64,
}

impl Player {
    pub fn new(name: impl Into<String>, joined_at: u64) -> Self {
        Self {
            name: name.into(),
            joined_at,
        }
    }
}
