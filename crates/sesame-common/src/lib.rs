//! # sesame-common
//!
//! Shared configuration, error handling, and primitives used across all
//! sesame crates. This is the foundation layer — no business logic, just
//! contracts.

pub mod config;
pub mod error;
pub mod testaccount;
pub mod validation;
