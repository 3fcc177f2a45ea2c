//! Workflow phase of a single prediction invocation

use serde::{Deserialize, Serialize};

/// Phase of a prediction invocation
///
/// ```text
/// Idle -> Authenticating -> Authenticated -> Requesting -> ResponseReceived -> Parsed
///              |                                  |                        \-> ParseFailed
///              \--------------> Idle <------------/
/// ```
///
/// Transitions only move forward; nothing loops back for a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionPhase {
    Idle,
    Authenticating,
    Authenticated,
    Requesting,
    ResponseReceived,
    Parsed,
    /// Response could not be read as a table (non-fatal)
    ParseFailed,
}

impl PredictionPhase {
    pub fn as_str(&self) -> &str {
        match self {
            PredictionPhase::Idle => "idle",
            PredictionPhase::Authenticating => "authenticating",
            PredictionPhase::Authenticated => "authenticated",
            PredictionPhase::Requesting => "requesting",
            PredictionPhase::ResponseReceived => "response_received",
            PredictionPhase::Parsed => "parsed",
            PredictionPhase::ParseFailed => "parse_failed",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            PredictionPhase::Idle => "Idle",
            PredictionPhase::Authenticating => "Authenticating",
            PredictionPhase::Authenticated => "Authenticated",
            PredictionPhase::Requesting => "Requesting prediction",
            PredictionPhase::ResponseReceived => "Response received",
            PredictionPhase::Parsed => "Parsed",
            PredictionPhase::ParseFailed => "Unexpected response shape",
        }
    }

    /// Whether the invocation ends in this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, PredictionPhase::Parsed | PredictionPhase::ParseFailed)
    }

    pub fn can_transition_to(&self, next: PredictionPhase) -> bool {
        use PredictionPhase::*;
        matches!(
            (self, next),
            (Idle, Authenticating)
                | (Authenticating, Authenticated)
                | (Authenticating, Idle)
                | (Authenticated, Requesting)
                | (Requesting, ResponseReceived)
                | (Requesting, Idle)
                | (ResponseReceived, Parsed)
                | (ResponseReceived, ParseFailed)
        )
    }
}

impl Default for PredictionPhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl std::fmt::Display for PredictionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
