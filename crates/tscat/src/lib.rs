//! # tscat
//!
//! Command-line front end for Qt Linguist translation catalogs: look up
//! strings, audit resources, print completion statistics and normalize
//! formatting.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::*;
pub use commands::*;
pub use error::*;
