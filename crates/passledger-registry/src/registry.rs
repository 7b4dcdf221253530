use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use passledger_core::{AccountId, CallContext, DocumentFingerprint};

use crate::error::RegistryError;
use crate::passport::{DocumentRecord, Passport, INITIAL_TRUST_SCORE};

/// Tuple returned by `init_passport`: (nickname, controller).
pub type InitTuple = (String, AccountId);

/// Tuple returned by the document operations:
/// (passport address, fingerprint, trust score).
pub type DocumentTuple = (AccountId, DocumentFingerprint, u64);

/// The passport registry state machine.
///
/// Owns the mapping from account to passport and enforces every
/// authorization rule: only a fresh account may init a passport, only the
/// controller may attach documents, and each identity gets one vote per
/// document.
///
/// Backed by a `DashMap` keyed by controller account; the map's per-shard
/// locking serializes mutations per passport, and every committing
/// operation re-runs its validation while holding the entry's write
/// guard. Preview forms take only read guards and never mutate.
pub struct PassportRegistry {
    passports: DashMap<AccountId, Passport>,
}

impl PassportRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            passports: DashMap::new(),
        }
    }

    // --- Shared validation ---
    //
    // Each operation's preconditions live in exactly one function, used
    // by both the preview and the commit form.

    fn check_init(
        existing: Option<&Passport>,
        ctx: &CallContext,
        nickname: &str,
    ) -> Result<InitTuple, RegistryError> {
        if existing.is_some() {
            return Err(RegistryError::AlreadyInitialized(ctx.caller.clone()));
        }
        Ok((nickname.to_string(), ctx.caller.clone()))
    }

    fn check_add(
        passport: &Passport,
        ctx: &CallContext,
        passport_address: &AccountId,
        fingerprint: DocumentFingerprint,
    ) -> Result<DocumentTuple, RegistryError> {
        if passport.controller != ctx.caller {
            return Err(RegistryError::NotController {
                passport: passport_address.clone(),
                caller: ctx.caller.clone(),
            });
        }
        if passport.documents.contains_key(&fingerprint) {
            return Err(RegistryError::DuplicateDocument(fingerprint));
        }
        Ok((passport_address.clone(), fingerprint, INITIAL_TRUST_SCORE))
    }

    fn check_vote(
        passport: &Passport,
        ctx: &CallContext,
        passport_address: &AccountId,
        fingerprint: DocumentFingerprint,
    ) -> Result<DocumentTuple, RegistryError> {
        let record = passport
            .documents
            .get(&fingerprint)
            .ok_or(RegistryError::DocumentNotFound(fingerprint))?;
        if record.has_voted(&ctx.caller) {
            return Err(RegistryError::AlreadyVoted {
                fingerprint,
                voter: ctx.caller.clone(),
            });
        }
        Ok((passport_address.clone(), fingerprint, record.trust_score + 1))
    }

    // --- init_passport ---

    /// Preview creating a passport for the caller. Pure read.
    pub fn preview_init_passport(
        &self,
        ctx: &CallContext,
        nickname: &str,
    ) -> Result<InitTuple, RegistryError> {
        let existing = self.passports.get(&ctx.caller);
        Self::check_init(existing.as_deref(), ctx, nickname)
    }

    /// Create a passport for the caller.
    ///
    /// Returns `(nickname, controller)` so the caller can confirm what
    /// was recorded.
    pub fn init_passport(
        &self,
        ctx: &CallContext,
        nickname: &str,
    ) -> Result<InitTuple, RegistryError> {
        match self.passports.entry(ctx.caller.clone()) {
            Entry::Occupied(occupied) => Self::check_init(Some(occupied.get()), ctx, nickname),
            Entry::Vacant(vacant) => {
                let tuple = Self::check_init(None, ctx, nickname)?;
                vacant.insert(Passport::new(ctx.caller.clone(), nickname));
                tracing::debug!(controller = %ctx.caller, nickname, "passport initialized");
                Ok(tuple)
            }
        }
    }

    // --- add_id_file ---

    /// Preview attaching a document fingerprint. Pure read.
    pub fn preview_add_id_file(
        &self,
        ctx: &CallContext,
        passport_address: &AccountId,
        fingerprint: DocumentFingerprint,
    ) -> Result<DocumentTuple, RegistryError> {
        let passport = self
            .passports
            .get(passport_address)
            .ok_or_else(|| RegistryError::PassportNotFound(passport_address.clone()))?;
        Self::check_add(&passport, ctx, passport_address, fingerprint)
    }

    /// Attach a document fingerprint to the caller's own passport.
    ///
    /// Returns `(passport address, fingerprint, 1)`.
    pub fn add_id_file(
        &self,
        ctx: &CallContext,
        passport_address: &AccountId,
        fingerprint: DocumentFingerprint,
    ) -> Result<DocumentTuple, RegistryError> {
        let mut passport = self
            .passports
            .get_mut(passport_address)
            .ok_or_else(|| RegistryError::PassportNotFound(passport_address.clone()))?;
        let tuple = Self::check_add(&passport, ctx, passport_address, fingerprint)?;
        passport
            .documents
            .insert(fingerprint, DocumentRecord::new(fingerprint));
        tracing::debug!(
            passport = %passport_address,
            fingerprint = %fingerprint,
            "document attached"
        );
        Ok(tuple)
    }

    // --- vote_for_doc ---

    /// Preview a trust vote. Pure read.
    pub fn preview_vote_for_doc(
        &self,
        ctx: &CallContext,
        passport_address: &AccountId,
        fingerprint: DocumentFingerprint,
    ) -> Result<DocumentTuple, RegistryError> {
        let passport = self
            .passports
            .get(passport_address)
            .ok_or_else(|| RegistryError::PassportNotFound(passport_address.clone()))?;
        Self::check_vote(&passport, ctx, passport_address, fingerprint)
    }

    /// Cast a trust vote for a document: score +1, voter recorded.
    ///
    /// Returns `(passport address, fingerprint, new trust score)`. Any
    /// identity may vote, including the controller; what it may not do is
    /// vote twice.
    pub fn vote_for_doc(
        &self,
        ctx: &CallContext,
        passport_address: &AccountId,
        fingerprint: DocumentFingerprint,
    ) -> Result<DocumentTuple, RegistryError> {
        let mut passport = self
            .passports
            .get_mut(passport_address)
            .ok_or_else(|| RegistryError::PassportNotFound(passport_address.clone()))?;
        let tuple = Self::check_vote(&passport, ctx, passport_address, fingerprint)?;
        if let Some(record) = passport.documents.get_mut(&fingerprint) {
            record.trust_score += 1;
            record.voters.insert(ctx.caller.clone());
        }
        tracing::debug!(
            passport = %passport_address,
            fingerprint = %fingerprint,
            trust_score = tuple.2,
            voter = %ctx.caller,
            "trust vote recorded"
        );
        Ok(tuple)
    }

    // --- Read accessors ---

    /// Clone a passport out of the registry.
    pub fn passport(&self, account: &AccountId) -> Option<Passport> {
        self.passports.get(account).map(|p| p.clone())
    }

    /// Number of passports in the registry.
    pub fn passport_count(&self) -> usize {
        self.passports.len()
    }

    /// Whether the registry holds no passports.
    pub fn is_empty(&self) -> bool {
        self.passports.is_empty()
    }

    /// Clone every passport, for persistence.
    pub fn snapshot(&self) -> Vec<Passport> {
        self.passports.iter().map(|p| p.clone()).collect()
    }

    /// Re-insert a previously persisted passport, keyed by its
    /// controller. Intended for storage loading at startup only.
    pub fn load_passport(&self, passport: Passport) {
        self.passports.insert(passport.controller.clone(), passport);
    }
}

impl Default for PassportRegistry {
    fn default() -> Self {
        Self::new()
    }
}
