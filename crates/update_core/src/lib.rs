//! Core domain for the manual update GUI: plain-data snapshots of the
//! OS-supplied update records, their user-facing projections, the service
//! trait seam, and the pure text/selection logic around search and install.
//!
//! Nothing in this crate touches COM or a window, so all of it runs and
//! tests on any platform.

pub mod domain;
pub mod error;
pub mod item;
pub mod plan;
pub mod report;
pub mod service;

pub use domain::{
    InstallReport, OperationResult, UpdateId, UpdateRecord, UpdateResult, DEFAULT_SEARCH_CRITERIA,
};
pub use error::ServiceError;
pub use item::UpdateItem;
pub use plan::{build_install_request, confirmation_text, reboot_may_be_required, InstallRequest};
pub use report::format_install_report;
pub use service::UpdateService;
