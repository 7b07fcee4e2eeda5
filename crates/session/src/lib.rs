//! Per-drop cycle orchestration.
//!
//! This crate implements the business logic between a "drop" (a set of
//! top-level entries handed in by the front end) and a finished transfer:
//!
//! 1. **Guard** — reject multi-item drops and re-entrant calls
//! 2. **Locate** — walk the tree for the one qualifying app image
//! 3. **Inspect** — read the payload, compute digest and header name
//! 4. **Upload** — one multipart POST with streamed progress
//! 5. **Reset** — return to idle on every exit path
//!
//! It is a library crate with no UI dependencies; the front end consumes
//! [`CycleEvent`]s to drive its display.

mod cycle;
mod error;
mod types;

pub use cycle::DropSession;
pub use error::SessionError;
pub use types::{CycleEvent, CycleOutcome};
