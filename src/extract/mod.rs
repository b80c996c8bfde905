// src/extract/mod.rs
//! HTML table extraction: locate tables, then pull headers and data rows.

pub mod document;
pub mod headers;
pub mod rows;
pub mod types;

pub use document::{Document, Node};
pub use headers::extract_headers;
pub use rows::extract_rows;
pub use types::{DataRow, HeaderRow, TabularRecordSet};
