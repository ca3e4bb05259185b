//! # tscat Common
//!
//! Shared functionality for the tscat workspace.
//!
//! This crate owns the logging bootstrap used by the command-line front end
//! and, behind the `testing` feature, the fixtures and helpers that the other
//! crates' test suites share.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod logging;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use logging::*;
