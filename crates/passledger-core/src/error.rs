/// Core type errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid account id: {0}")]
    InvalidAccountId(String),

    #[error("invalid document fingerprint: {0}")]
    InvalidFingerprint(String),
}
