//! relicdex
//!
//! Local HTTP service that lists, fetches, and searches a directory tree
//! of JSON item records.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod server;

pub use catalog::Catalog;
pub use config::Config;
pub use error::{Error, Result};
