pub mod add_doc;
pub mod init;
pub mod show;
pub mod status;
pub mod vote;

/// Header carrying the caller's account identity, matching the node.
pub const CALLER_HEADER: &str = "x-caller-id";

/// Default node endpoint.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:7501";

/// Error body returned by the node for rejected operations.
#[derive(serde::Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}
