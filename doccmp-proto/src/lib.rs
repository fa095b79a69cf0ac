//! Wire types for the document comparison service
//!
//! The server answers `POST /upload` with a JSON object; this crate models
//! that object so every consumer (controller, renderer, viewer) shares one
//! definition.
//!
//! - [`result`] - [`ComparisonResult`] and the tagged [`DiffEntry`] list
//! - [`excel`] - [`ExcelData`], the sheet payload or its embedded error

pub mod excel;
pub mod result;

pub use excel::{ExcelData, Row, Sheet};
pub use result::{ComparisonResult, DiffEntry};
