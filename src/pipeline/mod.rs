//! Pipeline entry points for scanner operations.
//!
//! - `run_scan`: Walk a release tree and assemble the job matrix

pub mod scan;

pub use scan::run_scan;
