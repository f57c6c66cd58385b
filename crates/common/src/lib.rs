//! Common utilities and types shared across privsweep crates.

pub mod error;

pub use error::{Error, Result};
