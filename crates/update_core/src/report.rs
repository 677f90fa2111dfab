//! Rendering of the post-install report dialog body.

use crate::domain::InstallReport;

/// One line per installed update plus the overall code, prefixed with a
/// reboot marker when the agent asked for one.
pub fn format_install_report(report: &InstallReport) -> String {
    let mut out = String::new();
    if report.reboot_required {
        out.push_str("[REBOOT REQUIRED] ");
    }
    out.push_str(&format!("Code: {}\n", report.overall));
    out.push_str("Listing of updates installed:\n");
    for update in &report.updates {
        out.push_str(&format!("{} : {}\n", update.result, update.title));
    }
    out
}
