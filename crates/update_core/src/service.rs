//! Trait seam over the operating-system update agent.

use crate::domain::{InstallReport, UpdateId, UpdateRecord};
use crate::error::ServiceError;

/// The OS update-management collaborator. Implementations own whatever
/// native handles they need and must stay on the thread that created
/// them; every call blocks until the service finishes or fails.
///
/// `UpdateId` arguments refer to positions in the most recent `search`
/// result; passing an id from an older search is an error.
pub trait UpdateService {
    fn search(&mut self, criteria: &str) -> Result<Vec<UpdateRecord>, ServiceError>;

    /// Records EULA acceptance on the service side for one update.
    fn accept_eula(&mut self, id: UpdateId) -> Result<(), ServiceError>;

    /// Downloads the given set; returns once every download finished.
    fn download(&mut self, ids: &[UpdateId]) -> Result<(), ServiceError>;

    /// Installs the given (already downloaded) set.
    fn install(&mut self, ids: &[UpdateId]) -> Result<InstallReport, ServiceError>;
}
