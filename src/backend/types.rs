//! Wire and outcome types for the collaborator endpoints.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Outcomes handed back to the session layer
// ---------------------------------------------------------------------------

/// Acknowledgement of an accepted start or email request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    /// Informational text from the collaborator ("Recording started"),
    /// when it sends one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Successful stop-recording outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Composed visit summary, destined for the editable note.
    pub summary: String,
    /// Where the collaborator archived the visit PDF, if it says.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<String>,
}

/// Body of `/send_email`: a projection of the record, not the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub email: String,
    pub name: String,
    pub summary: String,
    pub tests: Vec<String>,
}

// ---------------------------------------------------------------------------
// Raw replies
// ---------------------------------------------------------------------------

/// Reply shape of `/start_recording` and `/send_email`:
/// `{"success": bool, "message"?: .., "error"?: ..}`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct AckReply {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply shape of `/stop_recording`:
/// `{"success": bool, "summary"?: .., "pdf_path"?: .., "error"?: ..}`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct StopReply {
    pub success: bool,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub pdf_path: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
