//! Events flowing from the backend worker to the UI thread.

use update_core::{InstallReport, ServiceError, UpdateRecord};

pub enum UiEvent {
    /// The service connected; the UI kicks off the initial search.
    ServiceReady,
    SearchFinished(Vec<UpdateRecord>),
    DownloadFinished { reboot_may_be_required: bool },
    InstallFinished(InstallReport),
    InstallAborted,
    Error(UiError),
}

/// Where an operation failed; selects the dialog title and the state the
/// window falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Startup,
    Search,
    Install,
}

impl UiErrorContext {
    pub fn dialog_title(self) -> &'static str {
        match self {
            Self::Startup => "Update service unavailable",
            Self::Search => "Search failed",
            Self::Install => "Installation failed",
        }
    }
}

/// A service failure carried to the UI verbatim; there is no retry, the
/// dialog shows the raw message and the window returns to idle.
#[derive(Debug, Clone)]
pub struct UiError {
    pub context: UiErrorContext,
    pub message: String,
}

impl UiError {
    pub fn new(context: UiErrorContext, error: &ServiceError) -> Self {
        Self {
            context,
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_the_service_message_verbatim() {
        let err = UiError::new(
            UiErrorContext::Search,
            &ServiceError::Service("0x80240044: access denied".to_string()),
        );
        assert_eq!(err.message, "0x80240044: access denied");
        assert_eq!(err.context.dialog_title(), "Search failed");
    }
}
