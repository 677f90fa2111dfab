//! UI layer: the application window and description rendering.

pub mod app;
pub mod description;
