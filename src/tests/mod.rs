//! Integration tests over the crate internals.
//!
//! Byte-level wire scenarios live in `tests/wire_format.rs`; the tests here
//! reach into the probe to check the invariants that tie the phases together.

mod integration;
