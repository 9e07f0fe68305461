//! Unit tests for the board module.
//!
//! Domain tests exercise the pure board and policy rules; service tests run
//! the workflow against the in-memory backend and a mocked gateway.

mod support;
