//! Resilient element interaction.
//!
//! The portal renders different internal field ids per contracting profile,
//! so nothing here relies on a single locator. Every interaction takes an
//! ordered candidate list and reports plain success or failure; the first
//! candidate that works wins and no error escapes to the caller.

mod actions;
mod locator;

// Re-export public API
pub use actions::{first_success, Interactor};
pub use locator::{candidate_budget_ms, Locator};
