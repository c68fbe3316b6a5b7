//! Input/output helpers.
//!
//! - row reading (`rows`)
//! - file-level ingest + metadata injection (`ingest`)
//! - table exports to CSV (`export`)
//! - sweep JSON read/write (`sweep_json`)

pub mod export;
pub mod ingest;
pub mod rows;
pub mod sweep_json;

pub use export::*;
pub use ingest::*;
pub use rows::*;
pub use sweep_json::*;
