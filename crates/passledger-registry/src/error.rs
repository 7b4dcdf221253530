use passledger_core::{AccountId, DocumentFingerprint};

/// Registry errors: one variant per rejected state transition.
///
/// Every precondition violation is detected before any mutation, so an
/// error always means the registry is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("passport already initialized for {0}")]
    AlreadyInitialized(AccountId),

    #[error("no passport found at {0}")]
    PassportNotFound(AccountId),

    #[error("caller {caller} is not the controller of passport {passport}")]
    NotController {
        passport: AccountId,
        caller: AccountId,
    },

    #[error("document {0} is already attached to this passport")]
    DuplicateDocument(DocumentFingerprint),

    #[error("document {0} not found in passport")]
    DocumentNotFound(DocumentFingerprint),

    #[error("{voter} has already voted for document {fingerprint}")]
    AlreadyVoted {
        fingerprint: DocumentFingerprint,
        voter: AccountId,
    },
}

impl RegistryError {
    /// Stable machine-readable name of the violated precondition.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyInitialized(_) => "AlreadyInitialized",
            Self::PassportNotFound(_) => "PassportNotFound",
            Self::NotController { .. } => "NotController",
            Self::DuplicateDocument(_) => "DuplicateDocument",
            Self::DocumentNotFound(_) => "DocumentNotFound",
            Self::AlreadyVoted { .. } => "AlreadyVoted",
        }
    }
}
