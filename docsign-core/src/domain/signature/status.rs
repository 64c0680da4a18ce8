use serde::{Deserialize, Serialize};

pub const LOADING_MESSAGE: &str = "Loading signatures...";
pub const COMPLETE_MESSAGE: &str = "Document fully signed";
pub const YOUR_TURN_MESSAGE: &str = "Your signature is required";

/// What the viewer should be told about a document's signing progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SignatureStatus {
    Loading,
    Complete,
    YourTurn,
    Pending(String),
}

impl SignatureStatus {
    pub fn message(&self) -> &str {
        match self {
            SignatureStatus::Loading => LOADING_MESSAGE,
            SignatureStatus::Complete => COMPLETE_MESSAGE,
            SignatureStatus::YourTurn => YOUR_TURN_MESSAGE,
            SignatureStatus::Pending(message) => message,
        }
    }
}
