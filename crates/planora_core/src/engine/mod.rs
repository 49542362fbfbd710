//! Rule-based extraction engine.
//!
//! # Responsibility
//! - Recognize time expressions (`time_parser`).
//! - Turn free text into candidate events (`extractor`, `keywords`).
//! - Enforce the event schema (`validator`) and canonical order (`normalizer`).
//!
//! # Invariants
//! - Every function here is pure and synchronous.
//! - Lookup tables are immutable statics shared across threads.

pub mod extractor;
pub mod keywords;
pub mod normalizer;
pub mod time_parser;
pub mod validator;
