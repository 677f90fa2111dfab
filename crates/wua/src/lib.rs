//! Windows Update Agent bindings: the COM-backed `UpdateService`.
//!
//! The agent only exists on Windows, so the whole implementation is
//! gated; on other targets this crate compiles to nothing and the rest of
//! the workspace still builds and runs its tests.

#[cfg(windows)]
mod agent;

#[cfg(windows)]
pub use agent::WuaService;
