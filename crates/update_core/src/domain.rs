//! Snapshots of externally supplied update records and install outcomes.

use std::fmt;

/// Fixed search filter: not installed, software type, not hidden.
pub const DEFAULT_SEARCH_CRITERIA: &str = "IsInstalled=0 and Type='Software' and IsHidden=0";

/// Position of a top-level update within the most recent search result.
/// A new search invalidates every previously issued id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UpdateId(pub usize);

/// One update record as reported by the OS update agent, captured at
/// search time. Optional fields stay `None` when the agent reports
/// nothing for them. Bundled children are captured recursively and are
/// not individually installable.
#[derive(Debug, Clone, Default)]
pub struct UpdateRecord {
    pub title: String,
    pub description: Option<String>,
    pub more_info_urls: Vec<String>,
    pub eula_text: Option<String>,
    pub eula_accepted: bool,
    pub is_mandatory: bool,
    pub requires_user_input: bool,
    /// Raw reboot-behavior code; nonzero means installing may reboot.
    pub reboot_behavior: i32,
    pub bundled: Vec<UpdateRecord>,
}

impl UpdateRecord {
    pub fn may_require_reboot(&self) -> bool {
        self.reboot_behavior != 0
    }
}

/// Operation result code reported by the update agent per update and for
/// the whole install pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationResult {
    NotStarted,
    InProgress,
    Succeeded,
    SucceededWithErrors,
    Failed,
    Aborted,
    Unknown(i32),
}

impl OperationResult {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::NotStarted,
            1 => Self::InProgress,
            2 => Self::Succeeded,
            3 => Self::SucceededWithErrors,
            4 => Self::Failed,
            5 => Self::Aborted,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for OperationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("Not started"),
            Self::InProgress => f.write_str("In progress"),
            Self::Succeeded => f.write_str("Succeeded"),
            Self::SucceededWithErrors => f.write_str("Succeeded with errors"),
            Self::Failed => f.write_str("Failed"),
            Self::Aborted => f.write_str("Aborted"),
            Self::Unknown(code) => write!(f, "Unknown ({code})"),
        }
    }
}

/// Per-update entry of the post-install report.
#[derive(Debug, Clone)]
pub struct UpdateResult {
    pub result: OperationResult,
    pub title: String,
}

/// Outcome of one install pass over the selected update set.
#[derive(Debug, Clone)]
pub struct InstallReport {
    pub overall: OperationResult,
    pub reboot_required: bool,
    pub updates: Vec<UpdateResult>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_operation_result_codes() {
        assert_eq!(OperationResult::from_code(2), OperationResult::Succeeded);
        assert_eq!(OperationResult::from_code(4), OperationResult::Failed);
        assert_eq!(OperationResult::from_code(9), OperationResult::Unknown(9));
    }

    #[test]
    fn nonzero_reboot_behavior_means_possible_reboot() {
        let mut record = UpdateRecord::default();
        assert!(!record.may_require_reboot());
        record.reboot_behavior = 2;
        assert!(record.may_require_reboot());
    }
}
