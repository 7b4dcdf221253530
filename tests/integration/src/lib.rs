//! Placeholder library target. The actual tests live in `tests/`.
