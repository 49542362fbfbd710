//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate candidate sources and the engine into use-case level APIs.
//! - Classify failures for transport layers.
//!
//! # Invariants
//! - Every event leaving this module has passed the validator.

pub mod error;
pub mod fallback;
pub mod model_source;
pub mod schedule_service;
pub mod source;
