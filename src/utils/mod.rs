//! Utility functions and helpers.

pub mod text;
pub mod time;
pub mod url;
