//! Passledger Core — Fundamental types for the Passledger passport
//! registry.
//!
//! Provides the identifier newtypes shared by every other crate:
//! - `AccountId` — opaque participant identity
//! - `DocumentFingerprint` — 32-byte content hash of an identity document
//! - `CallContext` — explicit "who is calling" for registry operations

pub mod error;
pub mod types;

pub use error::CoreError;
pub use types::{AccountId, CallContext, DocumentFingerprint};
