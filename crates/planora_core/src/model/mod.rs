//! Schedule domain model.
//!
//! # Responsibility
//! - Define canonical data structures shared by the engine and its callers.
//! - Keep clock arithmetic in one place (`clock`).
//!
//! # Invariants
//! - A `ScheduleEvent` only exists after validation.
//! - End times are derived, never stored.

pub mod clock;
pub mod event;
