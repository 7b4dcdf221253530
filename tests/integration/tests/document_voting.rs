//! Integration test: trust voting semantics under contention.
//!
//! The registry promises one vote per identity per document and a strictly
//! increasing score. These tests hammer those promises from multiple
//! threads.

use std::sync::Arc;

use passledger_core::{AccountId, CallContext, DocumentFingerprint};
use passledger_registry::{PassportRegistry, RegistryError};

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

fn registry_with_document() -> PassportRegistry {
    let registry = PassportRegistry::new();
    registry.init_passport(&ctx("alice"), "John Doe").unwrap();
    registry
        .add_id_file(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap();
    registry
}

// =========================================================================
// Vote accounting
// =========================================================================

#[test]
fn test_each_voter_counted_exactly_once() {
    let registry = registry_with_document();

    for (i, voter) in ["bob", "carol", "dave", "erin"].iter().enumerate() {
        let tuple = registry
            .vote_for_doc(&ctx(voter), &account("alice"), fingerprint())
            .unwrap();
        assert_eq!(tuple.2, 2 + i as u64);
    }

    // Every repeat vote is refused, no matter the order.
    for voter in ["dave", "bob", "erin", "carol"] {
        let err = registry
            .vote_for_doc(&ctx(voter), &account("alice"), fingerprint())
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::AlreadyVoted {
                fingerprint: fingerprint(),
                voter: account(voter),
            }
        );
    }

    let record = registry
        .passport(&account("alice"))
        .unwrap()
        .document(&fingerprint())
        .cloned()
        .unwrap();
    assert_eq!(record.trust_score, 5);
    assert_eq!(record.voters.len(), 4);
}

#[test]
fn test_controller_votes_like_anyone_else() {
    let registry = registry_with_document();

    let tuple = registry
        .vote_for_doc(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap();
    assert_eq!(tuple.2, 2);

    let err = registry
        .vote_for_doc(&ctx("alice"), &account("alice"), fingerprint())
        .unwrap_err();
    assert_eq!(err.kind(), "AlreadyVoted");
}

#[test]
fn test_preview_vote_never_consumes_the_vote() {
    let registry = registry_with_document();

    // Previewing ten times consumes nothing.
    for _ in 0..10 {
        let tuple = registry
            .preview_vote_for_doc(&ctx("bob"), &account("alice"), fingerprint())
            .unwrap();
        assert_eq!(tuple.2, 2);
    }

    // The real vote still lands, and matches the preview.
    let tuple = registry
        .vote_for_doc(&ctx("bob"), &account("alice"), fingerprint())
        .unwrap();
    assert_eq!(tuple.2, 2);
}

// =========================================================================
// Contention
// =========================================================================

#[test]
fn test_parallel_distinct_voters_all_land() {
    let registry = Arc::new(registry_with_document());

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry
                    .vote_for_doc(&ctx(&format!("voter-{}", i)), &account("alice"), fingerprint())
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let record = registry
        .passport(&account("alice"))
        .unwrap()
        .document(&fingerprint())
        .cloned()
        .unwrap();
    assert_eq!(record.trust_score, 17);
    assert_eq!(record.voters.len(), 16);
}

#[test]
fn test_parallel_same_voter_lands_once() {
    let registry = Arc::new(registry_with_document());

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry
                    .vote_for_doc(&ctx("bob"), &account("alice"), fingerprint())
                    .is_ok()
            })
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    let record = registry
        .passport(&account("alice"))
        .unwrap()
        .document(&fingerprint())
        .cloned()
        .unwrap();
    assert_eq!(record.trust_score, 2);
    assert_eq!(record.voters.len(), 1);
}

#[test]
fn test_parallel_duplicate_attach_lands_once() {
    let registry = Arc::new(PassportRegistry::new());
    registry.init_passport(&ctx("alice"), "John Doe").unwrap();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || {
                registry
                    .add_id_file(&ctx("alice"), &account("alice"), fingerprint())
                    .is_ok()
            })
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    let passport = registry.passport(&account("alice")).unwrap();
    assert_eq!(passport.document_count(), 1);
    assert_eq!(passport.document(&fingerprint()).unwrap().trust_score, 1);
}
