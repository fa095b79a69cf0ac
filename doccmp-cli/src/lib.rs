//! doccmp client library
//!
//! Upload controller, difference renderer and presentation layers used by
//! the `doccmp` binary.

pub mod client;
pub mod controller;
pub mod error;
pub mod render;
pub mod tui;
