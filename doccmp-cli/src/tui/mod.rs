//! Interactive three-pane viewer

mod app;
pub mod theme;
mod ui;

pub use app::{run, App, Focus};
