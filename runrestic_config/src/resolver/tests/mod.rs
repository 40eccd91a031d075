//! Unit tests for candidate tagging and directory expansion.
//!
//! Covers provenance and deduplication, the existence rules for default and
//! explicit candidates, the `.toml` and permission filters applied inside
//! directories, and the two failure policies.

mod fixtures;
