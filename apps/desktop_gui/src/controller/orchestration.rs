//! Command dispatch from UI actions to the backend queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Queues a command without blocking the frame. Failures land in the
/// status line; the worker processes one command at a time so the queue
/// only fills if the worker is wedged.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) {
    let cmd_name = match &cmd {
        BackendCommand::Search => "search",
        BackendCommand::BeginInstall(_) => "begin_install",
        BackendCommand::ConfirmInstall => "confirm_install",
        BackendCommand::CancelInstall => "cancel_install",
    };

    match cmd_tx.try_send(cmd) {
        Ok(()) => tracing::debug!(command = cmd_name, "queued ui->backend command"),
        Err(TrySendError::Full(_)) => {
            *status = "The update worker is busy; please retry".to_string();
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "The update worker disconnected; restart the application".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;

    use super::*;

    #[test]
    fn reports_a_disconnected_worker_in_the_status_line() {
        let (cmd_tx, cmd_rx) = bounded(1);
        drop(cmd_rx);
        let mut status = String::new();
        dispatch_backend_command(&cmd_tx, BackendCommand::Search, &mut status);
        assert!(status.contains("disconnected"));
    }

    #[test]
    fn queued_commands_leave_the_status_line_alone() {
        let (cmd_tx, _cmd_rx) = bounded(1);
        let mut status = "Search completed.".to_string();
        dispatch_backend_command(&cmd_tx, BackendCommand::Search, &mut status);
        assert_eq!(status, "Search completed.");
    }
}
