//! Pure selection logic: which checked rows actually reach the installer.

use crate::domain::{UpdateId, UpdateRecord};
use crate::item::UpdateItem;

/// Outcome of walking the checked rows. `accept_eulas` lists the updates
/// whose license the user just agreed to; acceptance is recorded on the
/// service before anything is downloaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallRequest {
    pub updates: Vec<UpdateId>,
    pub accept_eulas: Vec<UpdateId>,
}

impl InstallRequest {
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Builds the install set from the current list. Unchecked rows are
/// skipped, rows that can request user input are never installed from
/// here regardless of their checked state, and rows without EULA
/// acceptance are kept only when `confirm_eula` answers yes (a modal
/// dialog in the application, a closure in tests).
pub fn build_install_request(
    items: &[UpdateItem],
    mut confirm_eula: impl FnMut(&UpdateItem) -> bool,
) -> InstallRequest {
    let mut request = InstallRequest::default();
    for item in items {
        if !item.checked {
            continue;
        }
        if item.record.requires_user_input {
            continue;
        }
        if !item.record.eula_accepted {
            if !confirm_eula(item) {
                continue;
            }
            request.accept_eulas.push(item.id);
        }
        request.updates.push(item.id);
    }
    request
}

/// True when any record in the install set carries a nonzero
/// reboot-behavior code.
pub fn reboot_may_be_required<'a>(records: impl IntoIterator<Item = &'a UpdateRecord>) -> bool {
    records.into_iter().any(UpdateRecord::may_require_reboot)
}

/// Text of the pre-install confirmation dialog.
pub fn confirmation_text(reboot_may_be_required: bool) -> &'static str {
    if reboot_may_be_required {
        "These updates may require a reboot. Continue?"
    } else {
        "Installation ready. Continue?"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(index: usize, checked: bool) -> UpdateItem {
        let mut item = UpdateItem::new(
            UpdateId(index),
            UpdateRecord {
                title: format!("KB{index}"),
                eula_accepted: true,
                ..UpdateRecord::default()
            },
        );
        item.checked = checked;
        item
    }

    #[test]
    fn unchecked_rows_are_skipped() {
        let items = vec![item(0, false), item(1, true)];
        let request = build_install_request(&items, |_| panic!("no EULA prompt expected"));
        assert_eq!(request.updates, vec![UpdateId(1)]);
        assert!(request.accept_eulas.is_empty());
    }

    #[test]
    fn nothing_checked_yields_an_empty_request() {
        let items = vec![item(0, false), item(1, false)];
        let request = build_install_request(&items, |_| true);
        assert!(request.is_empty());
    }

    #[test]
    fn user_input_rows_are_excluded_even_when_checked() {
        let mut needs_input = item(0, true);
        needs_input.record.requires_user_input = true;
        let items = vec![needs_input, item(1, true)];
        let request = build_install_request(&items, |_| true);
        assert_eq!(request.updates, vec![UpdateId(1)]);
    }

    #[test]
    fn declined_eula_skips_the_row() {
        let mut unaccepted = item(0, true);
        unaccepted.record.eula_accepted = false;
        let items = vec![unaccepted, item(1, true)];
        let request = build_install_request(&items, |_| false);
        assert_eq!(request.updates, vec![UpdateId(1)]);
        assert!(request.accept_eulas.is_empty());
    }

    #[test]
    fn accepted_eula_is_recorded_and_the_row_kept() {
        let mut unaccepted = item(0, true);
        unaccepted.record.eula_accepted = false;
        let items = vec![unaccepted];
        let request = build_install_request(&items, |_| true);
        assert_eq!(request.updates, vec![UpdateId(0)]);
        assert_eq!(request.accept_eulas, vec![UpdateId(0)]);
    }

    #[test]
    fn eula_prompt_only_fires_for_unaccepted_rows() {
        let mut unaccepted = item(0, true);
        unaccepted.record.eula_accepted = false;
        let items = vec![unaccepted, item(1, true)];
        let mut prompts = 0;
        build_install_request(&items, |_| {
            prompts += 1;
            true
        });
        assert_eq!(prompts, 1);
    }

    #[test]
    fn confirmation_text_mentions_reboot_only_when_flagged() {
        assert_eq!(
            confirmation_text(true),
            "These updates may require a reboot. Continue?"
        );
        assert_eq!(confirmation_text(false), "Installation ready. Continue?");
    }

    #[test]
    fn reboot_flag_is_any_nonzero_behavior_code() {
        let quiet = UpdateRecord::default();
        let mut noisy = UpdateRecord::default();
        noisy.reboot_behavior = 1;
        assert!(!reboot_may_be_required([&quiet]));
        assert!(reboot_may_be_required([&quiet, &noisy]));
    }
}
