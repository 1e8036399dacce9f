//! Core types, sanitization, and validation for lead intake.

pub mod error;
pub mod limits;
pub mod sanitize;
pub mod submission;
pub mod validation;

pub use error::{Error, Field, Result};
pub use sanitize::*;
pub use submission::*;
pub use validation::*;
