//! UI layer for the desktop app: application shell and views.

pub mod app;

pub use app::{ClienteleApp, StartupConfig};
