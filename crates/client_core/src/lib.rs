//! Client-side cake order capture: size selection, photo encoding, draft
//! validation and submission to the order service.

pub mod error;
pub mod form;
pub mod image;
pub mod selector;
pub mod service;

pub use error::OrderError;
pub use form::{DraftOrder, DraftStatus, FormEvent, OrderForm, SkipReason, SubmitOutcome};
pub use selector::{Selector, Storefront, View};
pub use service::{HttpOrderService, OrderService, ServiceConfig};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
