//! Output generation for a run's records.
//!
//! # Submodules
//!
//! - [`xlsx`]: Serializes records to the `Events.xlsx` workbook
//! - [`json`]: Writes records to dated JSON files
//! - [`table`]: Renders records as a text table for the terminal
//!
//! # Output Structure
//!
//! ```text
//! output_dir/
//! └── Events.xlsx
//!
//! json_output_dir/
//! └── 2025-06-10/
//!     └── meetup.json
//! ```

pub mod json;
pub mod table;
pub mod xlsx;
