//! Command Model
//!
//! One queued instruction for a specific kiosk device. A command is
//! claimed at most once by that device's poll; `processed` never resets.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of commands a kiosk knows how to execute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Sign the kiosk UI out of its current operator session
    Logout,
    /// Reboot the device
    Reboot,
    /// Cancel a payment on the kiosk's local terminal
    CancelPayment,
    /// Re-fetch content (room rates, signage, translations)
    RefreshContent,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Logout => "logout",
            Self::Reboot => "reboot",
            Self::CancelPayment => "cancel_payment",
            Self::RefreshContent => "refresh_content",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "logout" => Ok(Self::Logout),
            "reboot" => Ok(Self::Reboot),
            "cancel_payment" => Ok(Self::CancelPayment),
            "refresh_content" => Ok(Self::RefreshContent),
            _ => Err(()),
        }
    }
}

/// Command row (commands table)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Command {
    pub id: i64,
    pub kiosk_id: i64,
    /// Command kind string (see [`CommandKind`])
    pub kind: String,
    /// Free-form JSON document, shape depends on kind
    pub payload: serde_json::Value,
    pub processed: bool,
    /// Issuing operator's user id
    pub created_by: String,
    pub created_at: i64,
}

/// What the kiosk receives from a poll — the execution obligation only
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimedCommand {
    pub id: i64,
    pub command: String,
    pub payload: serde_json::Value,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        for kind in [
            CommandKind::Logout,
            CommandKind::Reboot,
            CommandKind::CancelPayment,
            CommandKind::RefreshContent,
        ] {
            assert_eq!(kind.as_str().parse::<CommandKind>(), Ok(kind));
        }
        assert!("format_disk".parse::<CommandKind>().is_err());
    }

    #[test]
    fn test_kind_serde_snake_case() {
        let json = serde_json::to_string(&CommandKind::CancelPayment).unwrap();
        assert_eq!(json, "\"cancel_payment\"");
    }
}
