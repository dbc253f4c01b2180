//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use qubit_core::{Whitelist, validate};
use qubit_types::ErrorCode;

/// Error code for `input` under the stock whitelist, `None` when accepted.
pub fn code_of(input: &str) -> Option<ErrorCode> {
    validate(input, &Whitelist::default()).map(|err| err.code())
}

/// Offending token for `input` under the stock whitelist.
pub fn token_of(input: &str) -> Option<String> {
    validate(input, &Whitelist::default()).map(|err| err.token().to_string())
}

/// Write `content` to a fresh `config.toml` in a temp dir.
pub fn temp_config(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("write config");
    (dir, path)
}
