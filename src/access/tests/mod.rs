//! Unit tests for the access module.
//!
//! Tests are organised by concern: role parsing, route guarding, navigation,
//! action permissions and the session lifecycle.
