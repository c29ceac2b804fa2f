//! Input records module
//! Handles the typed profile / job records and loading them from disk

pub mod file_detector;
pub mod manager;
pub mod records;

pub use records::{Education, Experience, Job, Profile};
