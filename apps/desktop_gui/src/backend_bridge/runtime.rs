//! Backend worker: owns the update-service handle and processes commands
//! strictly one at a time, so a single external call is in flight while
//! the UI thread keeps painting.

use std::thread;

use crossbeam_channel::{Receiver, Sender};
use update_core::{
    plan, ServiceError, UpdateId, UpdateRecord, UpdateService, DEFAULT_SEARCH_CRITERIA,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Spawns the worker thread. `connect` runs on that thread because the
/// native service handles must not cross threads; on failure the UI gets
/// a startup error and the worker exits.
pub fn launch<F>(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, connect: F)
where
    F: FnOnce() -> Result<Box<dyn UpdateService>, ServiceError> + Send + 'static,
{
    thread::spawn(move || {
        let mut service = match connect() {
            Ok(service) => service,
            Err(err) => {
                tracing::error!("update service startup failed: {err}");
                let _ = ui_tx.send(UiEvent::Error(UiError::new(UiErrorContext::Startup, &err)));
                return;
            }
        };
        let _ = ui_tx.send(UiEvent::ServiceReady);
        worker_loop(&cmd_rx, &ui_tx, service.as_mut());
    });
}

fn worker_loop(
    cmd_rx: &Receiver<BackendCommand>,
    ui_tx: &Sender<UiEvent>,
    service: &mut dyn UpdateService,
) {
    // Ids selected for install, held across the download -> confirmation
    // -> install handshake. Any error or cancellation discards them.
    let mut prepared: Option<Vec<UpdateId>> = None;
    // Snapshot backing the ids; needed for the reboot-behavior check.
    let mut last_search: Vec<UpdateRecord> = Vec::new();

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Search => {
                prepared = None;
                match service.search(DEFAULT_SEARCH_CRITERIA) {
                    Ok(records) => {
                        tracing::debug!(count = records.len(), "update search finished");
                        last_search = records.clone();
                        let _ = ui_tx.send(UiEvent::SearchFinished(records));
                    }
                    Err(err) => {
                        tracing::error!("update search failed: {err}");
                        let _ = ui_tx
                            .send(UiEvent::Error(UiError::new(UiErrorContext::Search, &err)));
                    }
                }
            }
            BackendCommand::BeginInstall(request) => {
                match prepare_install(service, &request) {
                    Ok(()) => {
                        let reboot_may_be_required = plan::reboot_may_be_required(
                            request.updates.iter().filter_map(|id| last_search.get(id.0)),
                        );
                        prepared = Some(request.updates);
                        let _ = ui_tx.send(UiEvent::DownloadFinished {
                            reboot_may_be_required,
                        });
                    }
                    Err(err) => {
                        tracing::error!("update download failed: {err}");
                        prepared = None;
                        let _ = ui_tx
                            .send(UiEvent::Error(UiError::new(UiErrorContext::Install, &err)));
                    }
                }
            }
            BackendCommand::ConfirmInstall => {
                let Some(ids) = prepared.take() else {
                    tracing::debug!("confirm without a prepared install set; ignoring");
                    continue;
                };
                match service.install(&ids) {
                    Ok(report) => {
                        let _ = ui_tx.send(UiEvent::InstallFinished(report));
                    }
                    Err(err) => {
                        tracing::error!("update install failed: {err}");
                        let _ = ui_tx
                            .send(UiEvent::Error(UiError::new(UiErrorContext::Install, &err)));
                    }
                }
            }
            BackendCommand::CancelInstall => {
                prepared = None;
                let _ = ui_tx.send(UiEvent::InstallAborted);
            }
        }
    }
}

fn prepare_install(
    service: &mut dyn UpdateService,
    request: &plan::InstallRequest,
) -> Result<(), ServiceError> {
    for id in &request.accept_eulas {
        service.accept_eula(*id)?;
    }
    service.download(&request.updates)
}
