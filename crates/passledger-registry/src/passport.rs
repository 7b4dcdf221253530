use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use passledger_core::{AccountId, DocumentFingerprint};

/// Trust score assigned to a document the moment it is attached.
pub const INITIAL_TRUST_SCORE: u64 = 1;

/// A content-addressed identity document attached to a passport.
///
/// The score only ever moves upward: it starts at
/// [`INITIAL_TRUST_SCORE`] and each distinct voter adds exactly 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Content hash of the document, supplied by the controller.
    pub fingerprint: DocumentFingerprint,
    /// Current trust score.
    pub trust_score: u64,
    /// Identities that have already cast their vote.
    pub voters: HashSet<AccountId>,
    /// When the document was attached.
    pub added_at: DateTime<Utc>,
}

impl DocumentRecord {
    /// Create a fresh record with the initial score and no voters.
    pub fn new(fingerprint: DocumentFingerprint) -> Self {
        Self {
            fingerprint,
            trust_score: INITIAL_TRUST_SCORE,
            voters: HashSet::new(),
            added_at: Utc::now(),
        }
    }

    /// Whether the given identity has already voted for this record.
    pub fn has_voted(&self, voter: &AccountId) -> bool {
        self.voters.contains(voter)
    }
}

/// A per-identity passport: a nickname plus attached document records.
///
/// `controller` and `nickname` are fixed at creation; `documents` grows
/// monotonically and is never pruned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passport {
    /// The identity that owns this passport.
    pub controller: AccountId,
    /// Human-readable label, immutable after creation.
    pub nickname: String,
    /// Attached documents, keyed by fingerprint.
    pub documents: HashMap<DocumentFingerprint, DocumentRecord>,
    /// When the passport was created.
    pub created_at: DateTime<Utc>,
}

impl Passport {
    /// Create an empty passport owned by `controller`.
    pub fn new(controller: AccountId, nickname: impl Into<String>) -> Self {
        Self {
            controller,
            nickname: nickname.into(),
            documents: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Look up a document record by fingerprint.
    pub fn document(&self, fingerprint: &DocumentFingerprint) -> Option<&DocumentRecord> {
        self.documents.get(fingerprint)
    }

    /// Number of attached documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }
}
