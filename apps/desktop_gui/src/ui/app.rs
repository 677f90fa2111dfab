//! Application shell: window state, backend event processing, and frame
//! rendering.

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use update_core::{format_install_report, plan, UpdateId, UpdateItem};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::description::render_description;

/// Which long-running phase the window is in. The install trigger is
/// only enabled in `Idle`, which is what keeps a single operation in
/// flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OperationState {
    Starting,
    Idle,
    Searching,
    Downloading,
    ConfirmPending,
    Installing,
}

pub struct DesktopGuiApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    items: Vec<UpdateItem>,
    selected: Option<usize>,
    status: String,
    op: OperationState,
}

impl DesktopGuiApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            items: Vec::new(),
            selected: None,
            status: "Connecting to the update service...".to_string(),
            op: OperationState::Starting,
        }
    }

    fn begin_search(&mut self) {
        self.op = OperationState::Searching;
        self.status = "Searching for updates...".to_string();
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Search, &mut self.status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::ServiceReady => self.begin_search(),
                UiEvent::SearchFinished(records) => {
                    self.items = records
                        .into_iter()
                        .enumerate()
                        .map(|(index, record)| UpdateItem::new(UpdateId(index), record))
                        .collect();
                    // Nothing is selected until the user clicks a row.
                    self.selected = None;
                    self.status = if self.items.is_empty() {
                        "There are no applicable updates.".to_string()
                    } else {
                        "Search completed.".to_string()
                    };
                    self.op = OperationState::Idle;
                }
                UiEvent::DownloadFinished {
                    reboot_may_be_required,
                } => {
                    self.op = OperationState::ConfirmPending;
                    let confirmed = rfd::MessageDialog::new()
                        .set_title("Notice")
                        .set_description(plan::confirmation_text(reboot_may_be_required))
                        .set_level(rfd::MessageLevel::Info)
                        .set_buttons(rfd::MessageButtons::YesNo)
                        .show()
                        == rfd::MessageDialogResult::Yes;
                    if confirmed {
                        self.op = OperationState::Installing;
                        self.status = "Installing updates...".to_string();
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::ConfirmInstall,
                            &mut self.status,
                        );
                    } else {
                        dispatch_backend_command(
                            &self.cmd_tx,
                            BackendCommand::CancelInstall,
                            &mut self.status,
                        );
                    }
                }
                UiEvent::InstallAborted => {
                    self.op = OperationState::Idle;
                    self.status = "Installation cancelled.".to_string();
                }
                UiEvent::InstallFinished(report) => {
                    rfd::MessageDialog::new()
                        .set_title("Installation Result")
                        .set_description(format_install_report(&report))
                        .set_level(rfd::MessageLevel::Info)
                        .set_buttons(rfd::MessageButtons::Ok)
                        .show();
                    // Refresh only happens along this accepted path.
                    self.begin_search();
                }
                UiEvent::Error(err) => self.show_error(err),
            }
        }
    }

    fn show_error(&mut self, err: UiError) {
        rfd::MessageDialog::new()
            .set_title(err.context.dialog_title())
            .set_description(err.message.as_str())
            .set_level(rfd::MessageLevel::Error)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
        self.status = err.message;
        self.op = OperationState::Idle;
    }

    /// Walks the checked rows, prompting per missing EULA, and hands the
    /// resulting set to the worker. An empty set never reaches the
    /// service.
    fn on_install_clicked(&mut self) {
        let request = plan::build_install_request(&self.items, |item| {
            let eula = item
                .record
                .eula_text
                .as_deref()
                .unwrap_or_else(|| item.title());
            rfd::MessageDialog::new()
                .set_title("Do you accept this license agreement?")
                .set_description(eula)
                .set_level(rfd::MessageLevel::Warning)
                .set_buttons(rfd::MessageButtons::YesNo)
                .show()
                == rfd::MessageDialogResult::Yes
        });

        if request.is_empty() {
            self.status = "All applicable updates were skipped.".to_string();
            return;
        }

        self.op = OperationState::Downloading;
        self.status = "Downloading updates...".to_string();
        dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::BeginInstall(request),
            &mut self.status,
        );
    }

    fn can_install(&self) -> bool {
        self.op == OperationState::Idle && !self.items.is_empty()
    }

    fn show_update_list(&mut self, ui: &mut egui::Ui) {
        let selected_index = self.selected;
        let mut clicked = None;
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for (index, item) in self.items.iter_mut().enumerate() {
                    ui.horizontal(|ui| {
                        ui.checkbox(&mut item.checked, "");
                        let row = ui.selectable_label(
                            selected_index == Some(index),
                            item.title(),
                        );
                        if row.clicked() {
                            clicked = Some(index);
                        }
                    });
                }
            });
        if clicked.is_some() {
            self.selected = clicked;
        }
    }

    fn show_description_pane(&self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                match self.selected.and_then(|index| self.items.get(index)) {
                    Some(item) => render_description(ui, item.description()),
                    None => {
                        ui.weak("Select an update to see its details.");
                    }
                }
            });
    }
}

impl eframe::App for DesktopGuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("status_line").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status);
                if !matches!(self.op, OperationState::Idle | OperationState::Starting) {
                    ui.spinner();
                }
            });
        });

        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(self.can_install(), egui::Button::new("Install selected updates"))
                    .clicked()
                {
                    self.on_install_clicked();
                }
            });
        });

        egui::SidePanel::left("update_list")
            .default_width(380.0)
            .show(ctx, |ui| {
                self.show_update_list(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_description_pane(ui);
        });

        // Worker events arrive between frames; keep polling for them.
        ctx.request_repaint_after(std::time::Duration::from_millis(200));
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use update_core::UpdateRecord;

    use super::*;

    fn app() -> (DesktopGuiApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(16);
        let (ui_tx, ui_rx) = bounded(16);
        (DesktopGuiApp::new(cmd_tx, ui_rx), cmd_rx, ui_tx)
    }

    fn accepted_record(title: &str) -> UpdateRecord {
        UpdateRecord {
            title: title.to_string(),
            eula_accepted: true,
            ..UpdateRecord::default()
        }
    }

    #[test]
    fn service_ready_kicks_off_the_initial_search() {
        let (mut app, cmd_rx, ui_tx) = app();
        ui_tx.send(UiEvent::ServiceReady).unwrap();
        app.process_ui_events();

        assert!(matches!(cmd_rx.try_recv(), Ok(BackendCommand::Search)));
        assert_eq!(app.status, "Searching for updates...");
        assert_eq!(app.op, OperationState::Searching);
    }

    #[test]
    fn empty_search_result_disables_install_and_says_so() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx.send(UiEvent::SearchFinished(Vec::new())).unwrap();
        app.process_ui_events();

        assert_eq!(app.status, "There are no applicable updates.");
        assert!(app.items.is_empty());
        assert_eq!(app.op, OperationState::Idle);
        assert!(!app.can_install());
    }

    #[test]
    fn search_results_enable_install_and_select_nothing() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::SearchFinished(vec![accepted_record("KB1")]))
            .unwrap();
        app.process_ui_events();

        assert_eq!(app.status, "Search completed.");
        assert_eq!(app.items.len(), 1);
        assert_eq!(app.selected, None);
        assert!(app.can_install());
    }

    #[test]
    fn all_skipped_selection_sends_no_command() {
        let (mut app, cmd_rx, _ui_tx) = app();
        // Not mandatory, so the row starts unchecked.
        app.items = vec![UpdateItem::new(UpdateId(0), accepted_record("KB1"))];
        app.op = OperationState::Idle;

        app.on_install_clicked();

        assert_eq!(app.status, "All applicable updates were skipped.");
        assert!(cmd_rx.try_recv().is_err());
        assert_eq!(app.op, OperationState::Idle);
    }

    #[test]
    fn checked_rows_with_accepted_eulas_start_the_download() {
        let (mut app, cmd_rx, _ui_tx) = app();
        let mut item = UpdateItem::new(UpdateId(0), accepted_record("KB1"));
        item.checked = true;
        app.items = vec![item];
        app.op = OperationState::Idle;

        app.on_install_clicked();

        match cmd_rx.try_recv() {
            Ok(BackendCommand::BeginInstall(request)) => {
                assert_eq!(request.updates, vec![UpdateId(0)]);
                assert!(request.accept_eulas.is_empty());
            }
            other => panic!("expected a begin-install command, got {other:?}"),
        }
        assert_eq!(app.op, OperationState::Downloading);
        assert_eq!(app.status, "Downloading updates...");
    }

    #[test]
    fn an_aborted_install_returns_to_idle() {
        let (mut app, _cmd_rx, ui_tx) = app();
        app.op = OperationState::Installing;
        ui_tx.send(UiEvent::InstallAborted).unwrap();
        app.process_ui_events();

        assert_eq!(app.status, "Installation cancelled.");
        assert_eq!(app.op, OperationState::Idle);
    }
}
