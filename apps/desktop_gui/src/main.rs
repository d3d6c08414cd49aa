//! Clientele Desktop: an egui front end over the customer directory API.

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::app::{ClienteleApp, StartupConfig};

#[derive(Debug, Parser)]
#[command(name = "clientele-desktop", about = "Customer directory desktop client")]
struct Cli {
    /// Base URL of the customer directory API server.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let cli = Cli::parse();
    let startup = StartupConfig {
        server_url: cli.server_url,
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, startup);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Clientele Desktop")
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Clientele Desktop",
        options,
        Box::new(move |_cc| Ok(Box::new(ClienteleApp::bootstrap(cmd_tx, ui_rx)))),
    )
}
