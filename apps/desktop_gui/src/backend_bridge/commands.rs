//! Commands queued from the UI to the backend worker.

use update_core::InstallRequest;

#[derive(Debug)]
pub enum BackendCommand {
    /// Run the fixed-criteria search and replace the current list.
    Search,
    /// Accept the recorded EULAs and download the selected set.
    BeginInstall(InstallRequest),
    /// Install the set prepared by the last `BeginInstall`.
    ConfirmInstall,
    /// Discard the prepared set without installing.
    CancelInstall,
}
