use serde::Serialize;

/// Result of a `get_current_time` tool call, serialized with a `status` tag
/// so the model sees either `{"status":"success","report":..}` or
/// `{"status":"error","error_message":..}`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TimeResponse {
    Success {
        /// Local time formatted as `YYYY-MM-DD HH:MM:SS <zone abbreviation>`
        report: String,
    },
    Error { error_message: String },
}
