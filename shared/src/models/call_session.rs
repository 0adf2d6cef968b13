//! Call Session Model
//!
//! Lifecycle record of one voice/video call between a kiosk and an
//! operator. Status only moves forward: waiting → connected → ended,
//! or waiting → ended when abandoned before pickup.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Call session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Waiting,
    Connected,
    Ended,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Connected => "connected",
            Self::Ended => "ended",
        }
    }

    /// `ended` is terminal; no transitions leave it
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Ended)
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "waiting" => Ok(Self::Waiting),
            "connected" => Ok(Self::Connected),
            "ended" => Ok(Self::Ended),
            _ => Err(()),
        }
    }
}

/// Which side initiated the call (drives notification routing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallerType {
    /// Guest at the kiosk asked for help
    Kiosk,
    /// Operator cold-called the kiosk
    Manager,
}

impl CallerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kiosk => "kiosk",
            Self::Manager => "manager",
        }
    }
}

impl fmt::Display for CallerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CallerType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kiosk" => Ok(Self::Kiosk),
            "manager" => Ok(Self::Manager),
            _ => Err(()),
        }
    }
}

/// Call session row (call_sessions table)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CallSession {
    pub id: i64,
    pub kiosk_id: i64,
    pub project_id: i64,
    /// Operator who picked up; null until status is connected
    pub staff_id: Option<String>,
    /// Signaling room name, unique per session
    pub room_name: String,
    /// Status string (see [`CallStatus`])
    pub status: String,
    /// Caller type string (see [`CallerType`])
    pub caller_type: String,
    pub started_at: i64,
    /// Set exactly once, iff status is ended
    pub ended_at: Option<i64>,
    pub notes: Option<String>,
}
