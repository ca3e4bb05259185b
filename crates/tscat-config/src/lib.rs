//! # tscat Config
//!
//! Configuration for the tscat command-line tool.
//!
//! Settings come from a YAML file, then environment variables override
//! individual fields, then the result is validated. Without a file the
//! defaults apply, still subject to environment overrides.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::*;
pub use schema::*;
pub use validator::*;
