//! Passledger Registry — the passport/document/trust-score state machine.
//!
//! One passport per account, content-addressed document fingerprints
//! attached by the passport's controller, and one trust vote per document
//! per identity. The model is append-only: no operation removes a
//! passport, removes a document, or lowers a trust score.
//!
//! Every operation comes in two forms sharing one validation routine:
//! a `preview_*` form that is a pure function over current state, and a
//! committing form that mutates. They return identical tuples for
//! identical state, so a caller can verify an outcome before committing.

pub mod error;
pub mod passport;
pub mod registry;

pub use error::RegistryError;
pub use passport::{DocumentRecord, Passport, INITIAL_TRUST_SCORE};
pub use registry::PassportRegistry;
