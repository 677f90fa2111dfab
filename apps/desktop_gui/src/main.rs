//! Manual Windows Update: a small desktop front-end over the OS update
//! agent. Searching, downloading, and installing all happen inside the
//! agent; this application only presents the results and asks for
//! confirmation.

#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

mod backend_bridge;
mod controller;
mod ui;

use crossbeam_channel::bounded;
use eframe::egui;

use backend_bridge::commands::BackendCommand;
use backend_bridge::runtime;
use controller::events::UiEvent;
use ui::app::DesktopGuiApp;
use update_core::{ServiceError, UpdateService};

#[cfg(windows)]
fn connect_service() -> Result<Box<dyn UpdateService>, ServiceError> {
    Ok(Box::new(wua::WuaService::connect()?))
}

#[cfg(not(windows))]
fn connect_service() -> Result<Box<dyn UpdateService>, ServiceError> {
    Err(ServiceError::Unsupported)
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    runtime::launch(cmd_rx, ui_tx, connect_service);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Manual Windows Update")
            .with_inner_size([900.0, 600.0])
            .with_min_inner_size([640.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Manual Windows Update",
        options,
        Box::new(|_cc| Ok(Box::new(DesktopGuiApp::new(cmd_tx, ui_rx)))),
    )
}
