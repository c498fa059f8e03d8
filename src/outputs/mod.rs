//! Output generation.
//!
//! - [`json`]: writes the final [`crate::models::ResultSet`] as a pretty JSON
//!   array, overwriting the previous run's file

pub mod json;
