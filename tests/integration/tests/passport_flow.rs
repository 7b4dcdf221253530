//! Integration test: the full passport lifecycle across core and registry.
//!
//! Exercises initPassport, addIDFileToPassport and voteForDocInPassport
//! end to end, through both the preview and the committing forms.

use passledger_core::{AccountId, CallContext, DocumentFingerprint};
use passledger_registry::{PassportRegistry, RegistryError, INITIAL_TRUST_SCORE};

const FP_HEX: &str = "0x21f3a9de43f07d855f49b946a10c30df432e8af95311435f77daf894216dcd41";

fn account(s: &str) -> AccountId {
    AccountId::new(s).unwrap()
}

fn ctx(s: &str) -> CallContext {
    CallContext::new(account(s))
}

fn fingerprint() -> DocumentFingerprint {
    DocumentFingerprint::from_hex(FP_HEX).unwrap()
}

// =========================================================================
// Passport initialization
// =========================================================================

#[test]
fn test_init_then_read_back() {
    let registry = PassportRegistry::new();

    let (nickname, controller) = registry.init_passport(&ctx("alice"), "John Doe").unwrap();
    assert_eq!(nickname, "John Doe");
    assert_eq!(controller, account("alice"));

    let passport = registry.passport(&account("alice")).unwrap();
    assert_eq!(passport.nickname, "John Doe");
    assert_eq!(passport.controller, account("alice"));
    assert_eq!(passport.document_count(), 0);
}

#[test]
fn test_one_passport_per_account() {
    let registry = PassportRegistry::new();
    registry.init_passport(&ctx("alice"), "John Doe").unwrap();

    // Re-init fails and never overwrites the original nickname.
    let err = registry
        .init_passport(&ctx("alice"), "Theocharis Iordanidis")
        .unwrap_err();
    assert_eq!(err, RegistryError::AlreadyInitialized(account("alice")));
    assert_eq!(
        registry.passport(&account("alice")).unwrap().nickname,
        "John Doe"
    );

    // A different account is unaffected.
    registry
        .init_passport(&ctx("bob"), "Theocharis Iordanidis")
        .unwrap();
    assert_eq!(registry.passport_count(), 2);
}

#[test]
fn test_preview_init_is_pure_and_agrees_with_commit() {
    let registry = PassportRegistry::new();

    let previewed = registry
        .preview_init_passport(&ctx("alice"), "John Doe")
        .unwrap();
    assert!(registry.is_empty());

    let committed = registry.init_passport(&ctx("alice"), "John Doe").unwrap();
    assert_eq!(previewed, committed);
}

// =========================================================================
// Document attachment
// =========================================================================

#[test]
fn test_document_flow_through_registry() {
    let registry = PassportRegistry::new();
    registry.init_passport(&ctx("alice"), "John Doe").unwrap();

    // Preview first, then commit; both report the same tuple.
    let previewed = registry
        .preview_add_id_file(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap();
    let committed = registry
        .add_id_file(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap();
    assert_eq!(previewed, committed);
    assert_eq!(committed, (account("alice"), fingerprint(), INITIAL_TRUST_SCORE));

    let passport = registry.passport(&account("alice")).unwrap();
    let record = passport.document(&fingerprint()).unwrap();
    assert_eq!(record.trust_score, INITIAL_TRUST_SCORE);
    assert!(record.voters.is_empty());
}

#[test]
fn test_only_controller_attaches_documents() {
    let registry = PassportRegistry::new();
    registry.init_passport(&ctx("alice"), "John Doe").unwrap();
    registry
        .init_passport(&ctx("bob"), "Theocharis Iordanidis")
        .unwrap();

    // Bob holds a passport of his own but still may not touch Alice's.
    let err = registry
        .add_id_file(&ctx("bob"), &account("alice"), fingerprint())
        .unwrap_err();
    assert_eq!(
        err,
        RegistryError::NotController {
            passport: account("alice"),
            caller: account("bob"),
        }
    );
    assert_eq!(
        registry.passport(&account("alice")).unwrap().document_count(),
        0
    );
}

#[test]
fn test_duplicate_fingerprint_rejected_across_preview_and_commit() {
    let registry = PassportRegistry::new();
    registry.init_passport(&ctx("alice"), "John Doe").unwrap();
    registry
        .add_id_file(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap();

    let commit_err = registry
        .add_id_file(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap_err();
    let preview_err = registry
        .preview_add_id_file(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap_err();
    assert_eq!(commit_err, RegistryError::DuplicateDocument(fingerprint()));
    assert_eq!(preview_err, commit_err);
}

// =========================================================================
// Full lifecycle
// =========================================================================

#[test]
fn test_lifecycle_init_attach_vote() {
    let registry = PassportRegistry::new();

    registry.init_passport(&ctx("alice"), "John Doe").unwrap();
    registry
        .add_id_file(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap();

    // Two distinct identities vouch for the document.
    let first = registry
        .vote_for_doc(&ctx("bob"), &account("alice"), fingerprint())
        .unwrap();
    let second = registry
        .vote_for_doc(&ctx("carol"), &account("alice"), fingerprint())
        .unwrap();
    assert_eq!(first.2, 2);
    assert_eq!(second.2, 3);

    let passport = registry.passport(&account("alice")).unwrap();
    let record = passport.document(&fingerprint()).unwrap();
    assert_eq!(record.trust_score, 3);
    assert_eq!(record.voters.len(), 2);
    assert!(record.has_voted(&account("bob")));
    assert!(record.has_voted(&account("carol")));
}

#[test]
fn test_failed_calls_leave_no_partial_state() {
    let registry = PassportRegistry::new();
    registry.init_passport(&ctx("alice"), "John Doe").unwrap();
    registry
        .add_id_file(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap();
    registry
        .vote_for_doc(&ctx("bob"), &account("alice"), fingerprint())
        .unwrap();

    let before = registry.passport(&account("alice")).unwrap();

    // Every failing call in the book.
    let _ = registry.init_passport(&ctx("alice"), "Other");
    let _ = registry.add_id_file(&ctx("bob"), &account("alice"), fingerprint());
    let _ = registry.add_id_file(&ctx("alice"), &account("alice"), fingerprint());
    let _ = registry.vote_for_doc(&ctx("bob"), &account("alice"), fingerprint());
    let _ = registry.vote_for_doc(&ctx("dave"), &account("ghost"), fingerprint());

    let after = registry.passport(&account("alice")).unwrap();
    assert_eq!(after.nickname, before.nickname);
    assert_eq!(after.document_count(), before.document_count());
    assert_eq!(
        after.document(&fingerprint()).unwrap().trust_score,
        before.document(&fingerprint()).unwrap().trust_score
    );
    assert_eq!(
        after.document(&fingerprint()).unwrap().voters,
        before.document(&fingerprint()).unwrap().voters
    );
    assert_eq!(registry.passport_count(), 1);
}

// =========================================================================
// Serialization round trip
// =========================================================================

#[test]
fn test_passport_survives_json_round_trip() {
    let registry = PassportRegistry::new();
    registry.init_passport(&ctx("alice"), "John Doe").unwrap();
    registry
        .add_id_file(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap();
    registry
        .vote_for_doc(&ctx("bob"), &account("alice"), fingerprint())
        .unwrap();

    let passport = registry.passport(&account("alice")).unwrap();
    let json = serde_json::to_string(&passport).unwrap();
    // Fingerprints serialize as 0x-prefixed hex map keys.
    assert!(json.contains(FP_HEX));

    let restored = PassportRegistry::new();
    restored.load_passport(serde_json::from_str(&json).unwrap());

    // The restored registry enforces the same rules on the same state.
    let err = restored
        .vote_for_doc(&ctx("bob"), &account("alice"), fingerprint())
        .unwrap_err();
    assert_eq!(err.kind(), "AlreadyVoted");
    let tuple = restored
        .vote_for_doc(&ctx("carol"), &account("alice"), fingerprint())
        .unwrap();
    assert_eq!(tuple.2, 3);
}
