//! Core operations.
//!
//! This module contains the business logic for starcgen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod extract;

pub use check::check;
pub use extract::extract;
