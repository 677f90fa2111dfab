//! Controller layer: backend events and command dispatch for the window.

pub mod events;
pub mod orchestration;
